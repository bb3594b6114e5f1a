//! Cross-Origin Resource Sharing policy.
//!
//! # Spring Equivalent
//! `CorsConfiguration` registered on a `UrlBasedCorsConfigurationSource`
//!
//! A policy is registered for one path pattern. Requests outside it get no
//! CORS headers at all. Requests inside it whose origin (and method) the
//! policy accepts get [`CorsHeaders`]; everything else gets nothing and the
//! browser enforces the block.
//!
//! # Usage
//! ```
//! use site_security_core::http::security::cors::CorsPolicy;
//!
//! let policy = CorsPolicy::new("/api/**")
//!     .unwrap()
//!     .allowed_origin("https://www.example.com")
//!     .allowed_methods(&["GET", "POST"])
//!     .allowed_headers(&["*"])
//!     .allow_credentials(true);
//!
//! assert!(policy.check("https://www.example.com", "/api/v1/posts", "GET").is_some());
//! assert!(policy.check("https://evil.example", "/api/v1/posts", "GET").is_none());
//! ```

use std::collections::HashSet;

use actix_web::dev::ServiceRequest;
use actix_web::http::header::{self, HeaderMap, HeaderValue};
use actix_web::http::Method;

use crate::http::error::ConfigError;
use crate::http::security::ant_matcher::AntMatcher;

const WILDCARD: &str = "*";
const DEFAULT_MAX_AGE: u64 = 1800;
const VARY_VALUE: &str = "Origin, Access-Control-Request-Method, Access-Control-Request-Headers";

/// CORS policy for one registered path pattern.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    path: AntMatcher,
    allowed_origins: HashSet<String>,
    allowed_methods: Vec<String>,
    allowed_headers: Vec<String>,
    allow_credentials: bool,
    max_age: u64,
}

impl CorsPolicy {
    /// Creates an empty policy (no origin allowed) registered on `path_pattern`.
    pub fn new(path_pattern: &str) -> Result<Self, ConfigError> {
        Ok(CorsPolicy {
            path: AntMatcher::new(path_pattern)?,
            allowed_origins: HashSet::new(),
            allowed_methods: vec!["GET".into(), "HEAD".into(), "POST".into()],
            allowed_headers: Vec::new(),
            allow_credentials: false,
            max_age: DEFAULT_MAX_AGE,
        })
    }

    pub fn allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origins.insert(origin.into());
        self
    }

    /// Replaces the allowed methods. Order is kept for the response header.
    pub fn allowed_methods(mut self, methods: &[&str]) -> Self {
        self.allowed_methods = dedup(methods.iter().map(|m| m.to_ascii_uppercase()));
        self
    }

    pub fn allowed_headers(mut self, headers: &[&str]) -> Self {
        self.allowed_headers = dedup(headers.iter().map(|h| h.to_string()));
        self
    }

    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = allow;
        self
    }

    /// Preflight cache duration in seconds (default: 1800).
    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = seconds;
        self
    }

    pub fn path_pattern(&self) -> &str {
        self.path.pattern()
    }

    pub fn get_max_age(&self) -> u64 {
        self.max_age
    }

    /// Checks the policy for internal consistency.
    ///
    /// A wildcard origin cannot be combined with credentials: browsers refuse
    /// `Access-Control-Allow-Origin: *` on credentialed requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allow_credentials && self.allowed_origins.contains(WILDCARD) {
            return Err(ConfigError::InvalidCors {
                reason: "allowCredentials cannot be combined with a `*` origin".into(),
            });
        }
        Ok(())
    }

    /// True when `path` is under the registered pattern.
    pub fn applies_to(&self, path: &str) -> bool {
        self.path.matches(path)
    }

    /// Evaluates a request.
    ///
    /// `method` is the request method, or for a preflight the value of
    /// `Access-Control-Request-Method`.
    pub fn check(&self, origin: &str, path: &str, method: &str) -> Option<CorsHeaders> {
        if !self.applies_to(path) || !self.origin_allowed(origin) || !self.method_allowed(method) {
            return None;
        }

        Some(CorsHeaders {
            allow_origin: origin.to_string(),
            allow_methods: self.allowed_methods.join(", "),
            allow_headers: self.allowed_headers.join(", "),
            allow_credentials: self.allow_credentials,
            max_age: self.max_age,
        })
    }

    fn origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.contains(WILDCARD) || self.allowed_origins.contains(origin)
    }

    fn method_allowed(&self, method: &str) -> bool {
        self.allowed_methods
            .iter()
            .any(|m| m == WILDCARD || m.eq_ignore_ascii_case(method))
    }
}

fn dedup(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// Headers granted to an accepted cross-origin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    allow_origin: String,
    allow_methods: String,
    allow_headers: String,
    allow_credentials: bool,
    max_age: u64,
}

impl CorsHeaders {
    /// Value of `Access-Control-Allow-Origin` (the matched origin, echoed).
    pub fn allow_origin(&self) -> &str {
        &self.allow_origin
    }

    pub fn allow_methods(&self) -> &str {
        &self.allow_methods
    }

    pub fn allow_headers(&self) -> &str {
        &self.allow_headers
    }

    pub fn allow_credentials(&self) -> bool {
        self.allow_credentials
    }

    /// Writes the headers into `headers`. `Access-Control-Max-Age` is only
    /// sent on preflight responses.
    pub fn apply(&self, headers: &mut HeaderMap, preflight: bool) {
        insert(headers, header::ACCESS_CONTROL_ALLOW_ORIGIN, &self.allow_origin);
        insert(headers, header::ACCESS_CONTROL_ALLOW_METHODS, &self.allow_methods);
        if !self.allow_headers.is_empty() {
            insert(headers, header::ACCESS_CONTROL_ALLOW_HEADERS, &self.allow_headers);
        }
        if self.allow_credentials {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
        if preflight {
            insert(headers, header::ACCESS_CONTROL_MAX_AGE, &self.max_age.to_string());
        }
        headers.insert(header::VARY, HeaderValue::from_static(VARY_VALUE));
    }
}

fn insert(headers: &mut HeaderMap, name: header::HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(_) => tracing::warn!(header = %name, "skipping CORS header with invalid value"),
    }
}

/// A preflight is an `OPTIONS` request carrying both `Origin` and
/// `Access-Control-Request-Method`.
pub fn is_preflight(req: &ServiceRequest) -> bool {
    req.method() == Method::OPTIONS
        && req.headers().contains_key(header::ORIGIN)
        && req.headers().contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}
