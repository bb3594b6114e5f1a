//! Security response headers.
//!
//! # Spring Security Equivalent
//! `HttpSecurity.headers()` with its default header writers
//!
//! # Default headers
//! - `X-Content-Type-Options: nosniff`
//! - `X-Frame-Options: DENY` (the site configuration uses `SAMEORIGIN` so the
//!   H2 console can render in frames)
//! - `X-XSS-Protection: 0`
//! - `Cache-Control: no-cache, no-store, max-age=0, must-revalidate`,
//!   `Pragma: no-cache`, `Expires: 0`
//!
//! Headers already set by a handler are left untouched.
//!
//! # Usage
//! ```ignore
//! use site_security_core::http::security::headers::{FrameOptions, SecurityHeaders};
//!
//! App::new().wrap(SecurityHeaders::new().frame_options(FrameOptions::SameOrigin))
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;

/// Value of `X-Frame-Options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOptions {
    Deny,
    SameOrigin,
    Disabled,
}

impl FrameOptions {
    fn to_header_value(self) -> Option<&'static str> {
        match self {
            FrameOptions::Deny => Some("DENY"),
            FrameOptions::SameOrigin => Some("SAMEORIGIN"),
            FrameOptions::Disabled => None,
        }
    }
}

/// Security headers middleware factory.
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    frame_options: FrameOptions,
    content_type_options: bool,
    cache_control: bool,
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        SecurityHeaders {
            frame_options: FrameOptions::Deny,
            content_type_options: true,
            cache_control: true,
        }
    }
}

impl SecurityHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Spring Security Equivalent
    /// `headers { frameOptions { sameOrigin = true } }`
    pub fn frame_options(mut self, options: FrameOptions) -> Self {
        self.frame_options = options;
        self
    }

    pub fn content_type_options(mut self, enabled: bool) -> Self {
        self.content_type_options = enabled;
        self
    }

    /// Toggles the `Cache-Control`/`Pragma`/`Expires` trio.
    pub fn cache_control(mut self, enabled: bool) -> Self {
        self.cache_control = enabled;
        self
    }

    /// Writes the configured headers, keeping any value already present.
    pub fn write(&self, headers: &mut HeaderMap) {
        let mut set = |name: HeaderName, value: &'static str| {
            if !headers.contains_key(&name) {
                headers.insert(name, HeaderValue::from_static(value));
            }
        };

        if self.content_type_options {
            set(header::X_CONTENT_TYPE_OPTIONS, "nosniff");
        }
        if let Some(value) = self.frame_options.to_header_value() {
            set(header::X_FRAME_OPTIONS, value);
        }
        set(header::X_XSS_PROTECTION, "0");
        if self.cache_control {
            set(header::CACHE_CONTROL, "no-cache, no-store, max-age=0, must-revalidate");
            set(header::PRAGMA, "no-cache");
            set(header::EXPIRES, "0");
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SecurityHeadersMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddleware {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

/// Security headers middleware service.
pub struct SecurityHeadersMiddleware<S> {
    service: Rc<S>,
    config: SecurityHeaders,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let config = self.config.clone();

        Box::pin(async move {
            let mut response = service.call(req).await?;
            config.write(response.headers_mut());
            Ok(response)
        })
    }
}
