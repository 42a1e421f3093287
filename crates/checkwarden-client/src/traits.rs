//! Check gateway trait

use async_trait::async_trait;
use checkwarden_api::{CheckId, CheckResource, CheckUpdate, NewCheck};

use crate::error::GatewayError;

/// Capability to read and mutate checks on the monitoring service
///
/// Every call is a single remote request; implementations do not retry.
#[async_trait]
pub trait CheckGateway: Send + Sync {
    /// Fetch one check. Fails with [`GatewayError::NotFound`] when the id is unknown.
    async fn find_by_id(&self, id: &CheckId) -> Result<CheckResource, GatewayError>;

    /// All checks with exactly this name, in the order the service returns them
    async fn find_all_by_name(&self, name: &str) -> Result<Vec<CheckResource>, GatewayError>;

    /// Create a check; the service assigns the id
    async fn create(&self, check: &NewCheck) -> Result<CheckResource, GatewayError>;

    async fn modify(&self, id: &CheckId, update: &CheckUpdate) -> Result<(), GatewayError>;

    async fn delete(&self, id: &CheckId) -> Result<(), GatewayError>;

    /// Short name of the backing service, for logs
    fn gateway_type(&self) -> &'static str;
}
