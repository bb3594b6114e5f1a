//! # Site Security Core
//!
//! Request authorization and CORS gate for Actix Web.
//!
//! Every request passes once through [`http::security::middleware::SecurityTransform`]
//! before it reaches a route handler. The transform answers CORS preflights,
//! resolves the caller's identity through an [`http::security::Authenticator`]
//! and asks the [`http::security::AuthorizationGate`] for a decision. Denials
//! are rendered as fixed JSON bodies.
//!
//! ## Modules
//!
//! - [`http::security`] - Gate, rules, CORS policy, middleware and extractors
//! - [`http::error`] - Error types

pub mod http;
