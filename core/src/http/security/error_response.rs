//! Fixed JSON bodies for authentication and authorization failures.
//!
//! # Spring Security Equivalent
//! `AuthenticationEntryPoint` (401) and `AccessDeniedHandler` (403)

use std::sync::OnceLock;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::http::error::AuthError;

/// Content type of every error body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Serialized as `{"resultCode":"…","msg":"…"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub result_code: String,
    pub msg: String,
}

/// Status plus body template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    status: StatusCode,
    body: ErrorBody,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, result_code: impl Into<String>, msg: impl Into<String>) -> Self {
        ErrorResponse {
            status,
            body: ErrorBody {
                result_code: result_code.into(),
                msg: msg.into(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorBody {
        &self.body
    }

    /// Compact JSON text of the body.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.body)
    }

    /// Builds the HTTP response carrying this template.
    pub fn to_http_response(&self) -> HttpResponse {
        HttpResponse::build(self.status)
            .content_type(JSON_CONTENT_TYPE)
            .json(&self.body)
    }
}

/// The 401 and 403 templates, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponses {
    unauthorized: ErrorResponse,
    forbidden: ErrorResponse,
}

impl Default for ErrorResponses {
    fn default() -> Self {
        ErrorResponses {
            unauthorized: ErrorResponse::new(
                StatusCode::UNAUTHORIZED,
                "401-1",
                "로그인 후 이용해주세요.",
            ),
            forbidden: ErrorResponse::new(StatusCode::FORBIDDEN, "403-1", "권한이 없습니다."),
        }
    }
}

impl ErrorResponses {
    pub fn new(unauthorized: ErrorResponse, forbidden: ErrorResponse) -> Self {
        ErrorResponses {
            unauthorized,
            forbidden,
        }
    }

    /// Shared default templates, used where no gate is at hand.
    pub fn standard() -> &'static ErrorResponses {
        static STANDARD: OnceLock<ErrorResponses> = OnceLock::new();
        STANDARD.get_or_init(ErrorResponses::default)
    }

    /// Looks up the template for `kind`.
    pub fn render(&self, kind: AuthError) -> &ErrorResponse {
        match kind {
            AuthError::Unauthorized => &self.unauthorized,
            AuthError::Forbidden => &self.forbidden,
        }
    }
}
