//! Action decision table

use std::fmt;

use checkwarden_api::CheckResource;
use serde::Serialize;

use crate::state::{CurrentState, TargetState};

/// Action that converges a check to its target state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Check is absent and should exist
    Create { paused: bool },
    /// Check exists and should exist; settings and pause flag are sent
    Modify { paused: bool },
    /// Check exists and should be absent
    Delete,
    /// Check is absent and should stay absent
    NoOp,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create { .. } => write!(f, "create"),
            Action::Modify { .. } => write!(f, "modify"),
            Action::Delete => write!(f, "delete"),
            Action::NoOp => write!(f, "none"),
        }
    }
}

/// Decide the action for a classified check and a normalized target
#[must_use]
pub fn decide(current: CurrentState, target: TargetState) -> Action {
    match (current, target) {
        (CurrentState::Absent, TargetState::Absent) => Action::NoOp,
        (CurrentState::Absent, target) => Action::Create {
            paused: target.paused(),
        },
        (_, TargetState::Absent) => Action::Delete,
        (_, target) => Action::Modify {
            paused: target.paused(),
        },
    }
}

/// Decision for one request, computed without mutating anything
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub current: CurrentState,
    pub target: TargetState,
    pub action: Action,
    /// Resolved check, if any
    pub check: Option<CheckResource>,
}

impl Plan {
    #[must_use]
    pub fn new(check: Option<CheckResource>, target: TargetState) -> Self {
        let current = CurrentState::of(check.as_ref());
        Self {
            current,
            target,
            action: decide(current, target),
            check,
        }
    }

    /// Change flag the action would report
    ///
    /// A modify only counts as a change when the pause flag flips; other
    /// settings are sent but not compared.
    #[must_use]
    pub fn would_change(&self) -> bool {
        match self.action {
            Action::Create { .. } | Action::Delete => true,
            Action::Modify { paused } => (self.current == CurrentState::Paused) != paused,
            Action::NoOp => false,
        }
    }
}
