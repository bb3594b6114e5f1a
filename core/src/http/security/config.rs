//! Identity extraction seam.
//!
//! # Spring Equivalent
//! The custom authentication filter placed before
//! `UsernamePasswordAuthenticationFilter`
//!
//! Credential parsing (tokens, cookies, API keys) is supplied by the
//! application. The security pipeline only needs the resulting identity.

use actix_web::dev::ServiceRequest;

use crate::http::security::identity::Identity;

/// Resolves the caller's identity from a request.
///
/// Returning `None` means the request is anonymous; it is not an error.
/// Any closure `Fn(&ServiceRequest) -> Option<Identity>` is an authenticator.
pub trait Authenticator {
    fn get_identity(&self, req: &ServiceRequest) -> Option<Identity>;
}

impl<F> Authenticator for F
where
    F: Fn(&ServiceRequest) -> Option<Identity>,
{
    fn get_identity(&self, req: &ServiceRequest) -> Option<Identity> {
        self(req)
    }
}

/// Authenticator that never finds an identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl Authenticator for Anonymous {
    fn get_identity(&self, _req: &ServiceRequest) -> Option<Identity> {
        None
    }
}
