//! Extractors for accessing the request identity in handlers.
//!
//! # Spring Equivalent
//! `@AuthenticationPrincipal` / `SecurityContextHolder`
//!
//! The security middleware stores the resolved [`Identity`] in the request
//! extensions; nothing is kept between requests.

use std::future::{ready, Ready};
use std::ops::Deref;
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpMessage, HttpRequest, ResponseError};

use crate::http::error::AuthError;
use crate::http::security::gate::AuthorizationGate;
use crate::http::security::Identity;

/// Extractor for the authenticated identity.
///
/// # Usage
/// ```ignore
/// use site_security_core::http::security::AuthenticatedIdentity;
///
/// async fn me(identity: AuthenticatedIdentity) -> impl Responder {
///     format!("Hello, {}!", identity.get_subject())
/// }
/// ```
///
/// # Errors
/// Rejects anonymous requests with the 401 JSON body of the gate that
/// handled the request, or the standard body outside the middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity(Identity);

impl AuthenticatedIdentity {
    pub fn into_inner(self) -> Identity {
        self.0
    }
}

impl Deref for AuthenticatedIdentity {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<Identity>().cloned();
        ready(
            identity
                .map(AuthenticatedIdentity)
                .ok_or_else(|| reject(req, AuthError::Unauthorized)),
        )
    }
}

fn reject(req: &HttpRequest, kind: AuthError) -> actix_web::Error {
    let response = match req.extensions().get::<Arc<AuthorizationGate>>() {
        Some(gate) => gate.render_error(kind).to_http_response(),
        None => kind.error_response(),
    };
    InternalError::from_response(kind, response).into()
}

/// Optional extractor; `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(Option<Identity>);

impl OptionalIdentity {
    pub fn into_inner(self) -> Option<Identity> {
        self.0
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl Deref for OptionalIdentity {
    type Target = Option<Identity>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(req.extensions().get::<Identity>().cloned())))
    }
}

/// Extension trait for HttpRequest to inspect the identity.
pub trait SecurityExt {
    fn get_identity(&self) -> Option<Identity>;

    fn is_authenticated(&self) -> bool;

    fn has_role(&self, role: &str) -> bool;
}

impl SecurityExt for HttpRequest {
    fn get_identity(&self) -> Option<Identity> {
        self.extensions().get::<Identity>().cloned()
    }

    fn is_authenticated(&self) -> bool {
        self.extensions().get::<Identity>().is_some()
    }

    fn has_role(&self, role: &str) -> bool {
        self.extensions()
            .get::<Identity>()
            .is_some_and(|i| i.has_role(role))
    }
}
