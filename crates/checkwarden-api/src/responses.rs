//! Report emitted after a reconciliation

use serde::{Deserialize, Serialize};

use crate::types::{CheckId, CheckResource, CheckStatus};

/// Outcome of one invocation as printed for automation
///
/// Resource fields are omitted when the outcome has no check
/// (already absent, or deleted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkid: Option<CheckId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CheckStatus>,
}

impl CheckReport {
    /// Build a report from an optional post-action check
    #[must_use]
    pub fn new(check: Option<&CheckResource>, changed: bool) -> Self {
        Self {
            changed,
            checkid: check.map(|c| c.id),
            name: check.map(|c| c.name.clone()),
            status: check.map(|c| c.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_without_check_only_has_changed() {
        let json = serde_json::to_value(CheckReport::new(None, false)).unwrap();
        assert_eq!(json, serde_json::json!({ "changed": false }));
    }

    #[test]
    fn test_report_with_check() {
        let check = CheckResource::new(CheckId(555), "my website", "www.example.com")
            .with_status(CheckStatus::Paused);
        let json = serde_json::to_value(CheckReport::new(Some(&check), true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "changed": true,
                "checkid": 555,
                "name": "my website",
                "status": "paused"
            })
        );
    }
}
