//! Parameter sets sent to the monitoring service

use serde::{Deserialize, Serialize};

use crate::types::{AlertPolicyId, CheckType, Resolution};

/// Optional check settings shared by create and modify
///
/// Unset fields are left untouched by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSettings {
    /// Path requested on the target host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Use HTTPS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<bool>,
    /// Target port
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Polling interval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    /// Alerting policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_policy: Option<AlertPolicyId>,
}

/// Parameters for creating a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCheck {
    pub name: String,
    pub host: String,
    pub check_type: CheckType,
    /// Create the check in paused state
    pub paused: bool,
    #[serde(flatten)]
    pub settings: CheckSettings,
}

/// Parameters for modifying an existing check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckUpdate {
    /// Requested pause flag, always sent
    pub paused: bool,
    /// New target host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(flatten)]
    pub settings: CheckSettings,
}
