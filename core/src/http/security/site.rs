//! Site security configuration.
//!
//! # Spring Equivalent
//! The application's `SecurityConfig` and `SiteProperties`
//! (`custom.site.*`)
//!
//! # Rule table (first match wins)
//!
//! | # | Method | Pattern | Requirement |
//! |---|--------|---------|-------------|
//! | 1 | any | `/favicon.ico` | permit |
//! | 2 | any | `/h2-console/**` | permit |
//! | 3 | GET | `/api/*/posts` | permit |
//! | 4 | GET | `/api/*/posts/{id:\d+}` | permit |
//! | 5 | GET | `/api/*/posts/{postId:\d+}/comments` | permit |
//! | 6 | GET | `/api/*/posts/{postId:\d+}/comments/{commentId:\d+}` | permit |
//! | 7 | POST | `/api/v1/members/login` | permit |
//! | 8 | POST | `/api/v1/members/join` | permit |
//! | 9 | DELETE | `/api/v1/members/logout` | permit |
//! | 10 | any | `/api/*/adm/**` | role `ADMIN` |
//! | 11 | any | `/api/*/**` | authenticated |
//! | 12 | any | anything else | permit |

use std::env;

use actix_web::http::Method;
use serde::{Deserialize, Serialize};

use crate::http::error::ConfigError;
use crate::http::security::cors::CorsPolicy;
use crate::http::security::error_response::ErrorResponses;
use crate::http::security::gate::AuthorizationGate;
use crate::http::security::headers::{FrameOptions, SecurityHeaders};
use crate::http::security::rule::Requirement;

/// Prefix under which the CORS policy is registered.
pub const API_PATTERN: &str = "/api/**";

const ENV_DOMAIN: &str = "CUSTOM_SITE_DOMAIN";
const ENV_FRONT_URL: &str = "CUSTOM_SITE_FRONT_URL";
const ENV_BACK_URL: &str = "CUSTOM_SITE_BACK_URL";

/// Deployment-specific site settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteProperties {
    pub domain: String,
    /// The single origin allowed to call the API cross-origin.
    pub front_url: String,
    /// Public base URL of this backend.
    pub back_url: String,
}

impl SiteProperties {
    pub fn new(
        domain: impl Into<String>,
        front_url: impl Into<String>,
        back_url: impl Into<String>,
    ) -> Self {
        SiteProperties {
            domain: domain.into(),
            front_url: front_url.into(),
            back_url: back_url.into(),
        }
    }

    /// Reads `CUSTOM_SITE_DOMAIN`, `CUSTOM_SITE_FRONT_URL` and
    /// `CUSTOM_SITE_BACK_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Parses `{"domain": .., "frontUrl": .., "backUrl": ..}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidProperties {
            reason: e.to_string(),
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingProperty {
                    name: name.to_string(),
                })
        };

        Ok(SiteProperties {
            domain: get(ENV_DOMAIN)?,
            front_url: get(ENV_FRONT_URL)?,
            back_url: get(ENV_BACK_URL)?,
        })
    }

    /// Base URI of the OAuth2 redirection endpoint. The provider flow itself
    /// is handled elsewhere.
    pub fn oauth2_redirect_base_uri(&self) -> String {
        format!(
            "{}/login/oauth2/code/*",
            self.back_url.trim_end_matches('/')
        )
    }
}

/// CORS policy for `/api/**` allowing only `front_url`.
pub fn site_cors_policy(properties: &SiteProperties) -> Result<CorsPolicy, ConfigError> {
    Ok(CorsPolicy::new(API_PATTERN)?
        .allowed_origin(properties.front_url.as_str())
        .allowed_methods(&["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(&["*"])
        .allow_credentials(true))
}

/// Builds the site's gate: the rule table above, the API CORS policy and
/// the standard error templates.
pub fn site_gate(properties: &SiteProperties) -> Result<AuthorizationGate, ConfigError> {
    AuthorizationGate::builder()
        .authorize("/favicon.ico", Requirement::Permit)
        .authorize("/h2-console/**", Requirement::Permit)
        .authorize_method(Method::GET, "/api/*/posts", Requirement::Permit)
        .authorize_method(Method::GET, r"/api/*/posts/{id:\d+}", Requirement::Permit)
        .authorize_method(
            Method::GET,
            r"/api/*/posts/{postId:\d+}/comments",
            Requirement::Permit,
        )
        .authorize_method(
            Method::GET,
            r"/api/*/posts/{postId:\d+}/comments/{commentId:\d+}",
            Requirement::Permit,
        )
        .authorize_method(Method::POST, "/api/v1/members/login", Requirement::Permit)
        .authorize_method(Method::POST, "/api/v1/members/join", Requirement::Permit)
        .authorize_method(Method::DELETE, "/api/v1/members/logout", Requirement::Permit)
        .authorize("/api/*/adm/**", Requirement::role("ADMIN"))
        .authorize("/api/*/**", Requirement::Authenticated)
        .any_request(Requirement::Permit)
        .cors(site_cors_policy(properties)?)
        .error_responses(ErrorResponses::default())
        .build()
}

/// Response headers for the site: framework defaults with same-origin
/// framing.
pub fn site_headers() -> SecurityHeaders {
    SecurityHeaders::new().frame_options(FrameOptions::SameOrigin)
}
