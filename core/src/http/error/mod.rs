//! Error types.
//!
//! - [`AuthError`] is a per-request outcome and renders as a JSON response.
//! - [`ConfigError`] is a startup-time failure and must abort the process.

mod auth_error;
mod config_error;

pub use auth_error::AuthError;
pub use config_error::ConfigError;
