//! Pingdom 2.0 wire format
//!
//! The list endpoint reports `type` as a bare string while the detail
//! endpoint nests the HTTP settings under `type.http`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use checkwarden_api::{
    AlertPolicyId, CheckId, CheckResource, CheckSettings, CheckStatus, CheckType, CheckUpdate,
    NewCheck, Resolution,
};

use crate::error::GatewayError;

/// `GET checks/{id}`
#[derive(Debug, Deserialize)]
pub(crate) struct CheckEnvelope {
    pub check: WireCheck,
}

/// `GET checks`
#[derive(Debug, Deserialize)]
pub(crate) struct CheckListEnvelope {
    #[serde(default)]
    pub checks: Vec<WireCheck>,
}

/// `POST checks`
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedEnvelope {
    pub check: CreatedCheck,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedCheck {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCheck {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub status: Option<CheckStatus>,
    pub hostname: String,
    #[serde(default, rename = "type")]
    pub check_type: Option<WireType>,
    #[serde(default)]
    pub resolution: Option<u32>,
    #[serde(default)]
    pub alert_policy: Option<u64>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub lasttesttime: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireType {
    Name(String),
    Detailed {
        #[serde(default)]
        http: Option<WireHttp>,
    },
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WireHttp {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub encryption: Option<bool>,
    #[serde(default)]
    pub port: Option<u16>,
}

impl TryFrom<WireCheck> for CheckResource {
    type Error = GatewayError;

    fn try_from(wire: WireCheck) -> Result<Self, Self::Error> {
        let http = match wire.check_type {
            None => WireHttp::default(),
            Some(WireType::Name(name)) => {
                name.parse::<CheckType>()
                    .map_err(|e| GatewayError::InvalidResponse(format!("check {}: {e}", wire.id)))?;
                WireHttp::default()
            }
            Some(WireType::Detailed { http: Some(http) }) => http,
            Some(WireType::Detailed { http: None }) => {
                return Err(GatewayError::InvalidResponse(format!(
                    "check {} is not an http check",
                    wire.id
                )));
            }
        };

        Ok(CheckResource {
            id: CheckId(wire.id),
            name: wire.name,
            status: wire.status.unwrap_or(CheckStatus::Unknown),
            host: wire.hostname,
            check_type: CheckType::Http,
            url: http.url,
            encryption: http.encryption,
            port: http.port,
            resolution: wire.resolution.and_then(|r| Resolution::try_from(r).ok()),
            // 0 means no policy attached
            alert_policy: wire.alert_policy.filter(|p| *p != 0).map(AlertPolicyId),
            created: wire.created,
            last_test_time: wire.lasttesttime,
        })
    }
}

/// Check as known right after creation, before the authoritative re-read
pub(crate) fn created_resource(created: CreatedCheck, new: &NewCheck) -> CheckResource {
    let status = if new.paused {
        CheckStatus::Paused
    } else {
        CheckStatus::Unknown
    };
    CheckResource {
        id: CheckId(created.id),
        name: created.name,
        status,
        host: new.host.clone(),
        check_type: new.check_type,
        url: new.settings.url.clone(),
        encryption: new.settings.encryption,
        port: new.settings.port,
        resolution: new.settings.resolution,
        alert_policy: new.settings.alert_policy,
        created: None,
        last_test_time: None,
    }
}

/// Form fields for `POST checks`
pub(crate) fn create_form(new: &NewCheck) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("name", new.name.clone()),
        ("host", new.host.clone()),
        ("type", new.check_type.to_string()),
        ("paused", new.paused.to_string()),
    ];
    push_settings(&mut form, &new.settings);
    form
}

/// Form fields for `PUT checks/{id}`
pub(crate) fn update_form(update: &CheckUpdate) -> Vec<(&'static str, String)> {
    let mut form = vec![("paused", update.paused.to_string())];
    if let Some(host) = &update.host {
        form.push(("host", host.clone()));
    }
    push_settings(&mut form, &update.settings);
    form
}

fn push_settings(form: &mut Vec<(&'static str, String)>, settings: &CheckSettings) {
    if let Some(url) = &settings.url {
        form.push(("url", url.clone()));
    }
    if let Some(encryption) = settings.encryption {
        form.push(("encryption", encryption.to_string()));
    }
    if let Some(port) = settings.port {
        form.push(("port", port.to_string()));
    }
    if let Some(resolution) = settings.resolution {
        form.push(("resolution", resolution.to_string()));
    }
    if let Some(policy) = settings.alert_policy {
        form.push(("alert_policy", policy.to_string()));
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errormessage: Option<String>,
    #[serde(default)]
    statusdesc: Option<String>,
}

/// Extract the service's error message from a failed response body
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => error
            .errormessage
            .or(error.statusdesc)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: &str = r#"{
        "check": {
            "id": 85975,
            "name": "my website",
            "resolution": 5,
            "sendnotificationwhendown": 2,
            "lasttesttime": 1240394682,
            "status": "up",
            "created": 1240394000,
            "hostname": "www.example.com",
            "alert_policy": 12345,
            "type": {
                "http": {
                    "url": "/health",
                    "encryption": true,
                    "port": 443
                }
            }
        }
    }"#;

    #[test]
    fn test_detail_response_maps_nested_http_settings() {
        let envelope: CheckEnvelope = serde_json::from_str(DETAIL).unwrap();
        let check = CheckResource::try_from(envelope.check).unwrap();

        assert_eq!(check.id, CheckId(85975));
        assert_eq!(check.host, "www.example.com");
        assert_eq!(check.status, CheckStatus::Up);
        assert_eq!(check.url.as_deref(), Some("/health"));
        assert_eq!(check.encryption, Some(true));
        assert_eq!(check.port, Some(443));
        assert_eq!(check.resolution, Some(Resolution::FiveMinutes));
        assert_eq!(check.alert_policy, Some(AlertPolicyId(12345)));
        assert_eq!(check.created.map(|t| t.timestamp()), Some(1_240_394_000));
        assert_eq!(check.last_test_time.map(|t| t.timestamp()), Some(1_240_394_682));
    }

    #[test]
    fn test_list_response_keeps_order() {
        let body = r#"{"checks": [
            {"id": 2, "name": "dup", "type": "http", "hostname": "a.example.com", "status": "paused"},
            {"id": 1, "name": "dup", "type": "http", "hostname": "b.example.com", "status": "down"}
        ]}"#;
        let envelope: CheckListEnvelope = serde_json::from_str(body).unwrap();
        let checks: Vec<CheckResource> = envelope
            .checks
            .into_iter()
            .map(CheckResource::try_from)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(checks[0].id, CheckId(2));
        assert!(checks[0].is_paused());
        assert_eq!(checks[1].id, CheckId(1));
        assert_eq!(checks[1].url, None);
    }

    #[test]
    fn test_non_http_check_is_rejected() {
        let body = r#"{"id": 3, "name": "dns", "type": "dns", "hostname": "ns.example.com"}"#;
        let wire: WireCheck = serde_json::from_str(body).unwrap();
        assert!(matches!(
            CheckResource::try_from(wire),
            Err(GatewayError::InvalidResponse(_))
        ));

        let body = r#"{"id": 4, "name": "tcp", "type": {"tcp": {"port": 22}}, "hostname": "h"}"#;
        let wire: WireCheck = serde_json::from_str(body).unwrap();
        assert!(CheckResource::try_from(wire).is_err());
    }

    #[test]
    fn test_zero_alert_policy_means_none() {
        let body = r#"{"id": 5, "name": "x", "hostname": "h", "alert_policy": 0, "resolution": 7}"#;
        let wire: WireCheck = serde_json::from_str(body).unwrap();
        let check = CheckResource::try_from(wire).unwrap();
        assert_eq!(check.alert_policy, None);
        assert_eq!(check.resolution, None);
        assert_eq!(check.status, CheckStatus::Unknown);
    }

    #[test]
    fn test_create_form_omits_unset_settings() {
        let new = NewCheck {
            name: "my website".to_string(),
            host: "www.example.com".to_string(),
            check_type: CheckType::Http,
            paused: false,
            settings: CheckSettings {
                url: Some("/".to_string()),
                alert_policy: Some(AlertPolicyId(12345)),
                ..CheckSettings::default()
            },
        };

        assert_eq!(
            create_form(&new),
            vec![
                ("name", "my website".to_string()),
                ("host", "www.example.com".to_string()),
                ("type", "http".to_string()),
                ("paused", "false".to_string()),
                ("url", "/".to_string()),
                ("alert_policy", "12345".to_string()),
            ]
        );
    }

    #[test]
    fn test_update_form_always_sends_paused() {
        let update = CheckUpdate {
            paused: true,
            host: None,
            settings: CheckSettings::default(),
        };
        assert_eq!(update_form(&update), vec![("paused", "true".to_string())]);

        let update = CheckUpdate {
            paused: false,
            host: Some("new.example.com".to_string()),
            settings: CheckSettings {
                encryption: Some(true),
                port: Some(8443),
                resolution: Some(Resolution::OneMinute),
                ..CheckSettings::default()
            },
        };
        assert_eq!(
            update_form(&update),
            vec![
                ("paused", "false".to_string()),
                ("host", "new.example.com".to_string()),
                ("encryption", "true".to_string()),
                ("port", "8443".to_string()),
                ("resolution", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_error_message_prefers_service_message() {
        let body = r#"{"error": {"statuscode": 403, "statusdesc": "Forbidden", "errormessage": "Invalid application key"}}"#;
        assert_eq!(error_message(body), "Invalid application key");

        let body = r#"{"error": {"statuscode": 400, "statusdesc": "Bad Request"}}"#;
        assert_eq!(error_message(body), "Bad Request");

        assert_eq!(error_message("gateway timeout\n"), "gateway timeout");
    }
}
