//! Desired and current check states

use std::fmt;
use std::str::FromStr;

use checkwarden_api::CheckResource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state requested by the caller
///
/// `Started` and `Stopped` are accepted synonyms of `Running` and `Paused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesiredState {
    Running,
    Started,
    Paused,
    Stopped,
    Absent,
}

impl DesiredState {
    /// Collapse synonyms
    #[must_use]
    pub fn normalize(self) -> TargetState {
        match self {
            DesiredState::Running | DesiredState::Started => TargetState::Running,
            DesiredState::Paused | DesiredState::Stopped => TargetState::Paused,
            DesiredState::Absent => TargetState::Absent,
        }
    }
}

/// Error for an unrecognised desired state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid state {0:?} (expected running, started, paused, stopped or absent)")]
pub struct ParseStateError(String);

impl FromStr for DesiredState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "running" => Ok(DesiredState::Running),
            "started" => Ok(DesiredState::Started),
            "paused" => Ok(DesiredState::Paused),
            "stopped" => Ok(DesiredState::Stopped),
            "absent" => Ok(DesiredState::Absent),
            _ => Err(ParseStateError(s.to_string())),
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesiredState::Running => write!(f, "running"),
            DesiredState::Started => write!(f, "started"),
            DesiredState::Paused => write!(f, "paused"),
            DesiredState::Stopped => write!(f, "stopped"),
            DesiredState::Absent => write!(f, "absent"),
        }
    }
}

/// Normalized desired state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetState {
    Running,
    Paused,
    Absent,
}

impl TargetState {
    /// Whether the check should exist afterwards
    #[must_use]
    pub fn exists(self) -> bool {
        self != TargetState::Absent
    }

    /// Pause flag to send for an existing check
    #[must_use]
    pub fn paused(self) -> bool {
        self == TargetState::Paused
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetState::Running => write!(f, "running"),
            TargetState::Paused => write!(f, "paused"),
            TargetState::Absent => write!(f, "absent"),
        }
    }
}

/// Classified remote state of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentState {
    Absent,
    Running,
    Paused,
}

impl CurrentState {
    /// Classify a resolved check; anything not paused is running
    #[must_use]
    pub fn of(check: Option<&CheckResource>) -> Self {
        match check {
            None => CurrentState::Absent,
            Some(c) if c.is_paused() => CurrentState::Paused,
            Some(_) => CurrentState::Running,
        }
    }
}

impl fmt::Display for CurrentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrentState::Absent => write!(f, "absent"),
            CurrentState::Running => write!(f, "running"),
            CurrentState::Paused => write!(f, "paused"),
        }
    }
}

#[cfg(test)]
mod tests {
    use checkwarden_api::{CheckId, CheckStatus};

    use super::*;

    #[test]
    fn test_synonyms_normalize() {
        assert_eq!(DesiredState::Started.normalize(), TargetState::Running);
        assert_eq!(DesiredState::Running.normalize(), TargetState::Running);
        assert_eq!(DesiredState::Stopped.normalize(), TargetState::Paused);
        assert_eq!(DesiredState::Paused.normalize(), TargetState::Paused);
        assert_eq!(DesiredState::Absent.normalize(), TargetState::Absent);
    }

    #[test]
    fn test_parse_desired_state() {
        assert_eq!("Stopped".parse::<DesiredState>(), Ok(DesiredState::Stopped));
        assert_eq!(" absent ".parse::<DesiredState>(), Ok(DesiredState::Absent));
        assert!("deleted".parse::<DesiredState>().is_err());
    }

    #[test]
    fn test_classify_current_state() {
        assert_eq!(CurrentState::of(None), CurrentState::Absent);

        let check = CheckResource::new(CheckId(1), "site", "www.example.com");
        for (status, expected) in [
            (CheckStatus::Paused, CurrentState::Paused),
            (CheckStatus::Up, CurrentState::Running),
            (CheckStatus::Down, CurrentState::Running),
            (CheckStatus::Unknown, CurrentState::Running),
        ] {
            let check = check.clone().with_status(status);
            assert_eq!(CurrentState::of(Some(&check)), expected);
        }
    }
}
