use actix_web::{error, http::StatusCode, HttpResponse};
use derive_more::{Display, Error};

use crate::http::security::error_response::ErrorResponses;

/// Terminal per-request outcome of the authorization gate.
///
/// # Spring Equivalent
/// `AuthenticationException` (entry point) and `AccessDeniedException`
/// (access denied handler)
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthError {
    /// No identity where one is required.
    #[display("unauthorized")]
    Unauthorized,
    /// Identity present but lacking the required role.
    #[display("forbidden")]
    Forbidden,
}

/// Renders the standard templates. Extractors behind the security middleware
/// render the gate's templates instead.
impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        ErrorResponses::standard().render(*self).status()
    }

    fn error_response(&self) -> HttpResponse {
        ErrorResponses::standard().render(*self).to_http_response()
    }
}
