//! Type definitions for monitoring checks

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Identifier assigned to a check by the monitoring service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(pub u64);

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CheckId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseError::CheckId(s.to_string()))
    }
}

/// Identifier of an alerting policy on the monitoring service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertPolicyId(pub u64);

impl fmt::Display for AlertPolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AlertPolicyId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseError::AlertPolicyId(s.to_string()))
    }
}

/// Status reported by the monitoring service for a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// Target is responding
    Up,
    /// Target is down
    Down,
    /// Down, awaiting confirmation from another location
    UnconfirmedDown,
    /// Paused by the account owner
    Paused,
    /// No result yet, or a status this client does not know
    #[serde(other)]
    Unknown,
}

impl CheckStatus {
    /// Whether the check is paused (every other status counts as running)
    #[must_use]
    pub fn is_paused(self) -> bool {
        self == CheckStatus::Paused
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Up => write!(f, "up"),
            CheckStatus::Down => write!(f, "down"),
            CheckStatus::UnconfirmedDown => write!(f, "unconfirmed_down"),
            CheckStatus::Paused => write!(f, "paused"),
            CheckStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Kind of check; only HTTP checks are supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    #[default]
    Http,
}

impl CheckType {
    /// Name used by the monitoring API
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CheckType::Http => "http",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(CheckType::Http),
            _ => Err(ParseError::CheckType(s.to_string())),
        }
    }
}

/// Polling interval of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Resolution {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
}

impl Resolution {
    /// Interval in minutes
    #[must_use]
    pub fn minutes(self) -> u32 {
        match self {
            Resolution::OneMinute => 1,
            Resolution::FiveMinutes => 5,
            Resolution::FifteenMinutes => 15,
            Resolution::ThirtyMinutes => 30,
            Resolution::SixtyMinutes => 60,
        }
    }
}

impl From<Resolution> for u32 {
    fn from(resolution: Resolution) -> Self {
        resolution.minutes()
    }
}

impl TryFrom<u32> for Resolution {
    type Error = ParseError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            1 => Ok(Resolution::OneMinute),
            5 => Ok(Resolution::FiveMinutes),
            15 => Ok(Resolution::FifteenMinutes),
            30 => Ok(Resolution::ThirtyMinutes),
            60 => Ok(Resolution::SixtyMinutes),
            other => Err(ParseError::Resolution(other.to_string())),
        }
    }
}

impl FromStr for Resolution {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let minutes = s
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseError::Resolution(s.to_string()))?;
        Resolution::try_from(minutes)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

/// A check as known to the monitoring service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResource {
    /// Service-assigned identifier
    pub id: CheckId,
    /// Display name
    pub name: String,
    /// Current status
    pub status: CheckStatus,
    /// Target host
    pub host: String,
    /// Check type
    pub check_type: CheckType,
    /// Path requested on the target host
    pub url: Option<String>,
    /// Whether the check uses HTTPS
    pub encryption: Option<bool>,
    /// Target port (only meaningful with encryption)
    pub port: Option<u16>,
    /// Polling interval
    pub resolution: Option<Resolution>,
    /// Alerting policy
    pub alert_policy: Option<AlertPolicyId>,
    /// Creation time
    pub created: Option<DateTime<Utc>>,
    /// Time of the most recent test
    pub last_test_time: Option<DateTime<Utc>>,
}

impl CheckResource {
    /// Create a check with the required attributes; optional ones start unset
    pub fn new(id: CheckId, name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: CheckStatus::Unknown,
            host: host.into(),
            check_type: CheckType::Http,
            url: None,
            encryption: None,
            port: None,
            resolution: None,
            alert_policy: None,
            created: None,
            last_test_time: None,
        }
    }

    /// Set status
    #[must_use]
    pub fn with_status(mut self, status: CheckStatus) -> Self {
        self.status = status;
        self
    }

    /// Set alert policy
    #[must_use]
    pub fn with_alert_policy(mut self, policy: AlertPolicyId) -> Self {
        self.alert_policy = Some(policy);
        self
    }

    /// Whether the check is paused
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status.is_paused()
    }
}
