//! checkwarden-core: Check reconciliation logic
//!
//! Resolves a check through an injected [`CheckGateway`], decides the
//! action that converges it to the desired state, executes it and reports
//! whether anything changed.
//!
//! [`CheckGateway`]: checkwarden_client::CheckGateway

pub mod error;
pub mod plan;
pub mod reconciler;
pub mod request;
pub mod resolver;
pub mod state;

pub use error::{ReconcileError, ValidationError};
pub use plan::{Action, Plan, decide};
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use request::{CheckParams, DesiredStateRequest, LookupKey};
pub use resolver::Resolver;
pub use state::{CurrentState, DesiredState, ParseStateError, TargetState};
