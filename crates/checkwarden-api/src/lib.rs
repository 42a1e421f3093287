//! checkwarden-api: Shared check types
//!
//! Contains the check resource model, the parameter sets sent to the
//! monitoring service, and the report emitted after a reconciliation.
//! Used by the gateway client, the reconciler, and the CLI.

pub mod error;
pub mod requests;
pub mod responses;
pub mod types;

pub use error::ParseError;
pub use requests::{CheckSettings, CheckUpdate, NewCheck};
pub use responses::CheckReport;
pub use types::{AlertPolicyId, CheckId, CheckResource, CheckStatus, CheckType, Resolution};
