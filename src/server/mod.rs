//! Fixed-response server subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (net layer)
//!     → server.rs (accept loop, hyper HTTP/1 connection builder)
//!     → response.rs (fixed status/headers/body for every request)
//!     → Send to client, then close or hold open per the configured policy
//! ```

use thiserror::Error;

pub mod response;
pub mod server;

pub use response::FixedResponse;
pub use server::FixedResponseServer;

/// Errors constructing the server from configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configured header value is not valid HTTP.
    #[error("invalid response header value: {0}")]
    InvalidHeader(#[from] axum::http::header::InvalidHeaderValue),
}
