//! Check resolution by id or name

use std::sync::Arc;

use checkwarden_api::CheckResource;
use checkwarden_client::{CheckGateway, GatewayError};
use tracing::{debug, warn};

use crate::error::ReconcileError;
use crate::request::LookupKey;

/// Maps a lookup key to at most one check with a single read
pub struct Resolver {
    gateway: Arc<dyn CheckGateway>,
}

impl Resolver {
    pub fn new(gateway: Arc<dyn CheckGateway>) -> Self {
        Self { gateway }
    }

    /// Resolve the check, `None` meaning absent
    ///
    /// # Errors
    /// An id that does not exist is [`ReconcileError::CheckNotFound`]; other
    /// gateway failures are [`ReconcileError::Gateway`].
    pub async fn resolve(
        &self,
        key: &LookupKey<'_>,
    ) -> Result<Option<CheckResource>, ReconcileError> {
        match key {
            LookupKey::Id(id) => match self.gateway.find_by_id(id).await {
                Ok(check) => Ok(Some(check)),
                Err(GatewayError::NotFound(_)) => Err(ReconcileError::CheckNotFound(*id)),
                Err(e) => Err(e.into()),
            },
            LookupKey::Name(name) => {
                let checks = self.gateway.find_all_by_name(name).await?;
                match checks.len() {
                    0 => debug!(name = %name, "no check with this name"),
                    1 => {}
                    count => warn!(
                        name = %name,
                        count,
                        chosen = %checks[0].id,
                        "multiple checks share this name, using the first"
                    ),
                }
                Ok(checks.into_iter().next())
            }
        }
    }
}
