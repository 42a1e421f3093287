//! HTTP gateway for the Pingdom 2.0 API

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};
use url::Url;

use checkwarden_api::{CheckId, CheckResource, CheckUpdate, NewCheck};

use crate::error::{GatewayError, Result};
use crate::traits::CheckGateway;
use crate::wire::{self, CheckEnvelope, CheckListEnvelope, CreatedEnvelope};

/// Account credentials for the Pingdom API
#[derive(Clone)]
pub struct Credentials {
    /// Account e-mail used for basic auth
    pub user: String,
    pub password: String,
    /// Application key sent as the `App-Key` header
    pub app_key: String,
    /// Account owner, for multi-user accounts
    pub account_email: Option<String>,
}

impl Credentials {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            app_key: app_key.into(),
            account_email: None,
        }
    }

    /// Set account owner e-mail
    #[must_use]
    pub fn with_account_email(mut self, email: impl Into<String>) -> Self {
        self.account_email = Some(email.into());
        self
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("user", &self.user),
            ("password", &self.password),
            ("app_key", &self.app_key),
        ] {
            if value.trim().is_empty() {
                return Err(GatewayError::Config(format!("missing credential: {field}")));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("app_key", &"<redacted>")
            .field("account_email", &self.account_email)
            .finish()
    }
}

/// Pingdom implementation of [`CheckGateway`]
#[derive(Debug, Clone)]
pub struct PingdomClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl PingdomClient {
    /// Public API endpoint
    pub const DEFAULT_BASE_URL: &'static str = "https://api.pingdom.com/api/2.0/";

    /// Create a client with its own connection pool and request timeout
    ///
    /// # Errors
    /// Returns [`GatewayError::Config`] if a credential is empty and
    /// [`GatewayError::Url`] if the base URL is invalid.
    pub fn new(
        base_url: impl AsRef<str>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, credentials, client)
    }

    /// Create a client with a custom `reqwest::Client`
    ///
    /// # Errors
    /// Same as [`PingdomClient::new`].
    pub fn with_client(
        base_url: impl AsRef<str>,
        credentials: Credentials,
        client: Client,
    ) -> Result<Self> {
        credentials.validate()?;
        let mut base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Config(format!(
                "base URL cannot be a base: {base_url}"
            )));
        }
        // Url::join drops the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL from a path relative to the API root
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(GatewayError::Url)
    }

    /// Start an authenticated request
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        let mut request = self
            .client
            .request(method, url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.password))
            .header("App-Key", &self.credentials.app_key);
        if let Some(email) = &self.credentials.account_email {
            request = request.header("Account-Email", email);
        }
        Ok(request)
    }

    /// Send a request and turn non-success statuses into errors
    ///
    /// `check` is the id the request targets; a 404 for it becomes
    /// [`GatewayError::NotFound`].
    async fn send(&self, request: RequestBuilder, check: Option<CheckId>) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND
            && let Some(id) = check
        {
            return Err(GatewayError::NotFound(id));
        }

        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Api {
            status: status.as_u16(),
            message: wire::error_message(&body),
        })
    }

    /// Send a request and deserialize the JSON body
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        check: Option<CheckId>,
    ) -> Result<T> {
        let response = self.send(request, check).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CheckGateway for PingdomClient {
    #[instrument(skip(self), fields(check_id = %id))]
    async fn find_by_id(&self, id: &CheckId) -> Result<CheckResource> {
        let request = self.request(Method::GET, &format!("checks/{id}"))?;
        let envelope: CheckEnvelope = self.fetch(request, Some(*id)).await?;
        let check = CheckResource::try_from(envelope.check)?;
        debug!(name = %check.name, status = %check.status, "fetched check");
        Ok(check)
    }

    #[instrument(skip(self))]
    async fn find_all_by_name(&self, name: &str) -> Result<Vec<CheckResource>> {
        let request = self.request(Method::GET, "checks")?;
        let envelope: CheckListEnvelope = self.fetch(request, None).await?;
        let total = envelope.checks.len();

        let matches = envelope
            .checks
            .into_iter()
            .filter(|c| c.name == name)
            .map(CheckResource::try_from)
            .collect::<Result<Vec<_>>>()?;

        debug!(total, matched = matches.len(), "listed checks");
        Ok(matches)
    }

    #[instrument(skip(self, check), fields(name = %check.name, host = %check.host))]
    async fn create(&self, check: &NewCheck) -> Result<CheckResource> {
        let request = self
            .request(Method::POST, "checks")?
            .form(&wire::create_form(check));
        let envelope: CreatedEnvelope = self.fetch(request, None).await?;
        let created = wire::created_resource(envelope.check, check);
        info!(check_id = %created.id, "created check");
        Ok(created)
    }

    #[instrument(skip(self, update), fields(check_id = %id, paused = update.paused))]
    async fn modify(&self, id: &CheckId, update: &CheckUpdate) -> Result<()> {
        let request = self
            .request(Method::PUT, &format!("checks/{id}"))?
            .form(&wire::update_form(update));
        self.send(request, Some(*id)).await?;
        info!("modified check");
        Ok(())
    }

    #[instrument(skip(self), fields(check_id = %id))]
    async fn delete(&self, id: &CheckId) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("checks/{id}"))?;
        self.send(request, Some(*id)).await?;
        info!("deleted check");
        Ok(())
    }

    fn gateway_type(&self) -> &'static str {
        "pingdom"
    }
}
