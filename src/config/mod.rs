//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BenchConfig (validated, immutable)
//!     → passed to server / load generator at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::BenchConfig;
pub use schema::ClosePolicy;
pub use schema::ConnectionConfig;
pub use schema::LoadConfig;
pub use schema::ResponseConfig;
pub use schema::ServerConfig;
