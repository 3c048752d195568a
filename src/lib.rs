// src/lib.rs

//! # docgate
//!
//! A client-side gateway that submits documents to a remote registration API
//! without exceeding a configured request rate.
//!
//! Every submission first takes a permit from a [`RateLimiter`], which spaces
//! grants at least `window / permits` apart, then hands a JSON POST to a
//! [`Transport`]. Outcomes come back as values; nothing is retried.
//!
//! ## Quick Example
//!
//! ```no_run
//! use docgate::{Document, Gateway, TimeUnit};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! // at most 10 submissions per minute
//! let gateway = Gateway::new(10, TimeUnit::Minutes)?;
//!
//! let document = Document {
//!     doc_id: Some("doc-1".into()),
//!     ..Document::default()
//! };
//!
//! match gateway.submit(&document, "signature-token").await {
//!     Ok(receipt) => println!("created, status {}", receipt.status),
//!     Err(err) => eprintln!("not created: {err}"),
//! }
//! # Ok(())
//! # }
//! ```

// private modules
mod clock;
mod config;
mod document;
mod errors;
mod gateway;
mod rate_limiter;
mod transport;

// public API exports
pub use clock::{Clock, SystemClock};
pub use config::{
    DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, DispatchMode, GatewayConfig, LimiterConfig, TimeUnit,
};
pub use document::{Description, Document, Product};
pub use errors::{BoxError, ConfigError, SubmitError, TransportError};
pub use gateway::{Gateway, Receipt};
pub use rate_limiter::{Decision, RateLimiter};
pub use transport::{OutboundRequest, ReqwestTransport, Transport, TransportResponse};
