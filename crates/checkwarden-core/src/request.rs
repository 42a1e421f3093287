//! Caller input for one reconciliation

use checkwarden_api::{
    AlertPolicyId, CheckId, CheckSettings, CheckType, CheckUpdate, NewCheck, Resolution,
};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::state::DesiredState;

/// How the target check is located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey<'a> {
    /// Exact id; a miss is an error
    Id(CheckId),
    /// Name search; a miss means the check is absent
    Name(&'a str),
}

/// Optional creation/modification parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckParams {
    pub check_type: Option<CheckType>,
    pub host: Option<String>,
    pub url: Option<String>,
    pub encryption: Option<bool>,
    pub port: Option<u16>,
    pub resolution: Option<Resolution>,
    pub alert_policy: Option<AlertPolicyId>,
}

impl CheckParams {
    fn settings(&self) -> CheckSettings {
        CheckSettings {
            url: self.url.clone(),
            encryption: self.encryption,
            port: self.port,
            resolution: self.resolution,
            alert_policy: self.alert_policy,
        }
    }
}

/// Desired state of one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredStateRequest {
    pub check_id: Option<CheckId>,
    pub check_name: Option<String>,
    pub state: DesiredState,
    #[serde(default)]
    pub params: CheckParams,
}

impl DesiredStateRequest {
    /// Request addressing a check by id
    #[must_use]
    pub fn by_id(id: CheckId, state: DesiredState) -> Self {
        Self {
            check_id: Some(id),
            check_name: None,
            state,
            params: CheckParams::default(),
        }
    }

    /// Request addressing a check by name
    pub fn by_name(name: impl Into<String>, state: DesiredState) -> Self {
        Self {
            check_id: None,
            check_name: Some(name.into()),
            state,
            params: CheckParams::default(),
        }
    }

    /// Set creation/modification parameters
    #[must_use]
    pub fn with_params(mut self, params: CheckParams) -> Self {
        self.params = params;
        self
    }

    /// Lookup path; the id wins when both id and name are given
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingLookupKey`] if neither is set.
    pub fn lookup_key(&self) -> Result<LookupKey<'_>, ValidationError> {
        match (&self.check_id, &self.check_name) {
            (Some(id), _) => Ok(LookupKey::Id(*id)),
            (None, Some(name)) => Ok(LookupKey::Name(name)),
            (None, None) => Err(ValidationError::MissingLookupKey),
        }
    }

    /// Parameters for creating the check
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if host, check type or name is missing.
    pub fn new_check(&self, paused: bool) -> Result<NewCheck, ValidationError> {
        let host = self
            .params
            .host
            .clone()
            .ok_or(ValidationError::MissingHost)?;
        let check_type = self
            .params
            .check_type
            .ok_or(ValidationError::MissingCheckType)?;
        // Only a name lookup can come back absent
        let name = self
            .check_name
            .clone()
            .ok_or(ValidationError::MissingLookupKey)?;

        Ok(NewCheck {
            name,
            host,
            check_type,
            paused,
            settings: self.params.settings(),
        })
    }

    /// Parameters for modifying the check
    #[must_use]
    pub fn update(&self, paused: bool) -> CheckUpdate {
        CheckUpdate {
            paused,
            host: self.params.host.clone(),
            settings: self.params.settings(),
        }
    }
}
