//! Reconciler: converges one check to its desired state
//!
//! Every invocation re-reads the check before acting and, for create and
//! modify, after acting. Nothing is cached between invocations.

use std::sync::Arc;

use checkwarden_api::{CheckId, CheckResource};
use checkwarden_client::CheckGateway;
use tracing::{debug, info, instrument};

use crate::error::ReconcileError;
use crate::plan::{Action, Plan};
use crate::request::DesiredStateRequest;
use crate::resolver::Resolver;

/// Result of a completed reconciliation
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// Check after the action; `None` when it is absent or was deleted
    pub check: Option<CheckResource>,
    pub changed: bool,
    /// Action that was executed
    pub action: Action,
}

/// Stateless reconciler bound to one gateway
pub struct Reconciler {
    gateway: Arc<dyn CheckGateway>,
    resolver: Resolver,
}

impl Reconciler {
    pub fn new(gateway: Arc<dyn CheckGateway>) -> Self {
        Self {
            resolver: Resolver::new(Arc::clone(&gateway)),
            gateway,
        }
    }

    /// Resolve the check and decide the action without changing anything
    ///
    /// # Errors
    /// Validation, resolution and gateway failures.
    #[instrument(skip(self, request), fields(state = %request.state))]
    pub async fn plan(&self, request: &DesiredStateRequest) -> Result<Plan, ReconcileError> {
        let key = request.lookup_key()?;
        let check = self.resolver.resolve(&key).await?;
        let plan = Plan::new(check, request.state.normalize());

        // Fail before any mutation when the create parameters are incomplete
        if let Action::Create { paused } = plan.action {
            request.new_check(paused)?;
        }

        debug!(
            gateway = self.gateway.gateway_type(),
            current = %plan.current,
            target = %plan.target,
            action = %plan.action,
            "planned reconciliation"
        );
        Ok(plan)
    }

    /// Converge the check and report whether it changed
    ///
    /// # Errors
    /// Any failure ends the invocation. A failed re-read after a successful
    /// create or modify is still reported as an error.
    #[instrument(skip(self, request), fields(state = %request.state))]
    pub async fn reconcile(
        &self,
        request: &DesiredStateRequest,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let plan = self.plan(request).await?;

        // decide() only yields modify/delete for a resolved check
        let outcome = match (plan.action, plan.check) {
            (Action::Modify { paused }, Some(check)) => {
                self.modify(request, check.id, paused).await?
            }
            (Action::Delete, Some(check)) => self.delete(check.id).await?,
            (Action::Create { paused }, _) => self.create(request, paused).await?,
            (action, _) => ReconcileOutcome {
                check: None,
                changed: false,
                action,
            },
        };

        info!(
            action = %outcome.action,
            changed = outcome.changed,
            check_id = outcome.check.as_ref().map(|c| c.id.0),
            "reconciliation complete"
        );
        Ok(outcome)
    }

    async fn create(
        &self,
        request: &DesiredStateRequest,
        paused: bool,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let new = request.new_check(paused)?;
        let created = self.gateway.create(&new).await?;
        info!(check_id = %created.id, name = %created.name, paused, "check created");

        let check = self.gateway.find_by_id(&created.id).await?;
        Ok(ReconcileOutcome {
            check: Some(check),
            changed: true,
            action: Action::Create { paused },
        })
    }

    async fn modify(
        &self,
        request: &DesiredStateRequest,
        id: CheckId,
        paused: bool,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        // Fresh read right before mutating; the resolved copy may be stale
        let before = self.gateway.find_by_id(&id).await?;
        // Only the pause flag is compared; other settings are sent blindly
        let changed = before.is_paused() != paused;

        self.gateway.modify(&id, &request.update(paused)).await?;
        let after = self.gateway.find_by_id(&id).await?;
        info!(check_id = %id, from = %before.status, to = %after.status, changed, "check modified");

        Ok(ReconcileOutcome {
            check: Some(after),
            changed,
            action: Action::Modify { paused },
        })
    }

    async fn delete(&self, id: CheckId) -> Result<ReconcileOutcome, ReconcileError> {
        self.gateway.delete(&id).await?;
        info!(check_id = %id, "check deleted");

        Ok(ReconcileOutcome {
            check: None,
            changed: true,
            action: Action::Delete,
        })
    }
}
