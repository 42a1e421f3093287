//! checkwarden CLI
//!
//! Converges one Pingdom HTTP check to a desired state and prints a JSON
//! report (`changed`, `checkid`, `name`, `status`) on stdout.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use eyre::{WrapErr, eyre};

use checkwarden_api::{AlertPolicyId, CheckId, CheckReport, CheckType, Resolution};
use checkwarden_client::{CheckGateway, Credentials, PingdomClient};
use checkwarden_core::{CheckParams, DesiredState, DesiredStateRequest, Reconciler};

mod config;
mod logging;

use config::Config;
use logging::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "checkwarden", version)]
#[command(about = "Converge a Pingdom HTTP check to a desired state", long_about = None)]
struct Cli {
    /// Desired state: running, started, paused, stopped or absent
    #[arg(long)]
    state: DesiredState,

    /// Id of an existing check
    #[arg(long = "checkid")]
    check_id: Option<CheckId>,

    /// Check name, used for lookup when no id is given and for creation
    #[arg(long = "checkname")]
    check_name: Option<String>,

    /// Check type (required for creation)
    #[arg(long = "checktype")]
    check_type: Option<CheckType>,

    /// Target host (required for creation)
    #[arg(long)]
    host: Option<String>,

    /// URL path on the target host, e.g. /
    #[arg(long)]
    url: Option<String>,

    /// Use HTTPS (yes/no)
    #[arg(long, value_parser = parse_bool)]
    encryption: Option<bool>,

    /// Target port, typically 443 with encryption
    #[arg(long)]
    port: Option<u16>,

    /// Check resolution in minutes (1, 5, 15, 30, 60)
    #[arg(long)]
    resolution: Option<Resolution>,

    /// Alert policy id
    #[arg(long = "alert-policy", alias = "alert_policy")]
    alert_policy: Option<AlertPolicyId>,

    /// Pingdom account e-mail
    #[arg(long, env = "PINGDOM_USER")]
    user: Option<String>,

    /// Pingdom account password
    #[arg(long, env = "PINGDOM_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Pingdom application key
    #[arg(long = "app-key", env = "PINGDOM_APP_KEY", hide_env_values = true)]
    app_key: Option<String>,

    /// Account owner e-mail for multi-user accounts
    #[arg(long, env = "PINGDOM_ACCOUNT_EMAIL")]
    account_email: Option<String>,

    /// API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report the planned action without changing anything
    #[arg(long)]
    dry_run: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Cli {
    fn request(&self) -> DesiredStateRequest {
        DesiredStateRequest {
            check_id: self.check_id,
            check_name: self.check_name.clone(),
            state: self.state,
            params: CheckParams {
                check_type: self.check_type,
                host: self.host.clone(),
                url: self.url.clone(),
                encryption: self.encryption,
                port: self.port,
                resolution: self.resolution,
                alert_policy: self.alert_policy,
            },
        }
    }

    /// Flags win over the configuration file
    fn credentials(&self, config: &Config) -> Result<Credentials> {
        let pick = |flag: &Option<String>, file: &Option<String>, name: &str| {
            flag.clone()
                .or_else(|| file.clone())
                .ok_or_else(|| eyre!("missing credential: {name}"))
        };

        let mut credentials = Credentials::new(
            pick(&self.user, &config.api.user, "user (--user, PINGDOM_USER)")?,
            pick(
                &self.password,
                &config.api.password,
                "password (--password, PINGDOM_PASSWORD)",
            )?,
            pick(
                &self.app_key,
                &config.api.app_key,
                "app key (--app-key, PINGDOM_APP_KEY)",
            )?,
        );
        if let Some(email) = self
            .account_email
            .clone()
            .or_else(|| config.api.account_email.clone())
        {
            credentials = credentials.with_account_email(email);
        }
        Ok(credentials)
    }

    fn gateway(&self, config: &Config) -> Result<Arc<dyn CheckGateway>> {
        let base_url = self.base_url.as_deref().unwrap_or(&config.api.base_url);
        let client = PingdomClient::new(
            base_url,
            self.credentials(config)?,
            Duration::from_secs(config.api.timeout_secs),
        )
        .wrap_err("failed to set up Pingdom client")?;
        tracing::debug!(base_url = %client.base_url(), "using Pingdom API");
        Ok(Arc::new(client))
    }
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "true" | "on" | "1" => Ok(true),
        "no" | "false" | "off" | "0" => Ok(false),
        other => Err(format!("expected yes or no, got {other:?}")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load_default()?,
    };

    logging::init(&config.log_level, cli.log_format);

    let reconciler = Reconciler::new(cli.gateway(&config)?);
    let request = cli.request();

    let report = if cli.dry_run {
        let plan = reconciler
            .plan(&request)
            .await
            .wrap_err("planning failed")?;
        serde_json::json!({
            "changed": plan.would_change(),
            "dry_run": true,
            "plan": plan,
        })
    } else {
        let outcome = reconciler
            .reconcile(&request)
            .await
            .wrap_err("reconciliation failed")?;
        serde_json::to_value(CheckReport::new(outcome.check.as_ref(), outcome.changed))?
    };

    println!("{report}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("checkwarden").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_create_arguments_build_request() {
        let cli = parse(&[
            "--state",
            "started",
            "--checkname",
            "my website",
            "--checktype",
            "http",
            "--host",
            "www.example.com",
            "--url",
            "/",
            "--encryption",
            "yes",
            "--port",
            "443",
            "--resolution",
            "5",
            "--alert-policy",
            "12345",
        ]);

        let request = cli.request();
        assert_eq!(request.state, DesiredState::Started);
        assert_eq!(request.check_id, None);
        assert_eq!(request.check_name.as_deref(), Some("my website"));
        assert_eq!(request.params.check_type, Some(CheckType::Http));
        assert_eq!(request.params.encryption, Some(true));
        assert_eq!(request.params.port, Some(443));
        assert_eq!(request.params.resolution, Some(Resolution::FiveMinutes));
        assert_eq!(request.params.alert_policy, Some(AlertPolicyId(12345)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for args in [
            vec!["checkwarden", "--state", "deleted", "--checkid", "1"],
            vec!["checkwarden", "--state", "paused", "--checkid", "abc"],
            vec!["checkwarden", "--state", "running", "--checkid", "1", "--resolution", "10"],
            vec!["checkwarden", "--state", "running", "--checkid", "1", "--checktype", "dns"],
            vec!["checkwarden", "--state", "running", "--checkid", "1", "--encryption", "maybe"],
        ] {
            assert!(Cli::try_parse_from(&args).is_err(), "{args:?} should fail");
        }
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("Yes"), Ok(true));
        assert_eq!(parse_bool("off"), Ok(false));
        assert!(parse_bool("2").is_err());
    }

    #[test]
    fn test_flags_override_config_credentials() {
        let cli = parse(&[
            "--state",
            "paused",
            "--checkid",
            "12345",
            "--user",
            "flag@example.com",
            "--password",
            "flagpass",
            "--app-key",
            "flagkey",
        ]);
        let mut config = Config::default();
        config.api.user = Some("file@example.com".to_string());
        config.api.account_email = Some("owner@example.com".to_string());

        let credentials = cli.credentials(&config).unwrap();
        assert_eq!(credentials.user, "flag@example.com");
        assert_eq!(credentials.app_key, "flagkey");
        assert_eq!(credentials.account_email.as_deref(), Some("owner@example.com"));
    }

    #[test]
    fn test_config_credentials_are_used_without_flags() {
        let cli = Cli {
            user: None,
            password: None,
            app_key: None,
            account_email: None,
            ..parse(&["--state", "absent", "--checkname", "site"])
        };
        let mut config = Config::default();
        config.api.user = Some("file@example.com".to_string());
        config.api.password = Some("filepass".to_string());
        assert!(cli.credentials(&config).is_err());

        config.api.app_key = Some("filekey".to_string());
        let credentials = cli.credentials(&config).unwrap();
        assert_eq!(credentials.user, "file@example.com");
        assert!(cli.gateway(&config).is_ok());
    }
}
