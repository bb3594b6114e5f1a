//! Security module providing identity-aware authorization and CORS.
//!
//! # Spring Equivalent
//! `org.springframework.security` `SecurityFilterChain` configuration
//!
//! # Module Structure
//!
//! - `ant_matcher` - Ant-style URL pattern matching
//! - `rule` - Method/path rules and their requirements
//! - `gate` - First-match authorization gate (AuthorizationGate)
//! - `cors` - CORS policy for a registered path pattern
//! - `error_response` - Fixed JSON bodies for 401 and 403
//! - `identity` - Authenticated subject and roles
//! - `config` - Identity extraction seam (Authenticator)
//! - `extractor` - Actix Web extractors (AuthenticatedIdentity, OptionalIdentity)
//! - `headers` - Security headers middleware (X-Frame-Options, nosniff, cache)
//! - `middleware` - Security middleware (SecurityTransform)
//! - `site` - The site's rule table, CORS policy and properties

pub use config::{Anonymous, Authenticator};
pub use cors::{CorsHeaders, CorsPolicy};
pub use error_response::{ErrorBody, ErrorResponse, ErrorResponses};
pub use extractor::{AuthenticatedIdentity, OptionalIdentity, SecurityExt};
pub use gate::{AuthorizationGate, GateBuilder};
pub use headers::{FrameOptions, SecurityHeaders};
pub use identity::Identity;
pub use middleware::SecurityTransform;
pub use rule::{Decision, MethodMatcher, Requirement, Rule};
pub use site::{site_cors_policy, site_gate, site_headers, SiteProperties};

pub mod ant_matcher;
pub mod config;
pub mod cors;
pub mod error_response;
pub mod extractor;
pub mod gate;
pub mod headers;
pub mod identity;
pub mod middleware;
pub mod rule;
pub mod site;
