//! checkwarden-client: Remote check gateway
//!
//! Defines the [`CheckGateway`] capability consumed by the reconciler and
//! provides [`PingdomClient`], an HTTP implementation against the Pingdom
//! 2.0 REST API.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use checkwarden_api::CheckId;
//! use checkwarden_client::{CheckGateway, Credentials, PingdomClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new("ops@example.com", "password123", "apipassword123");
//! let client = PingdomClient::new(
//!     PingdomClient::DEFAULT_BASE_URL,
//!     credentials,
//!     Duration::from_secs(30),
//! )?;
//!
//! let check = client.find_by_id(&CheckId(12345)).await?;
//! println!("{} is {}", check.name, check.status);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod pingdom;
pub mod traits;
mod wire;

pub use error::{GatewayError, Result};
pub use pingdom::{Credentials, PingdomClient};
pub use traits::CheckGateway;
