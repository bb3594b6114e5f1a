//! Security middleware for Actix Web.
//!
//! # Spring Equivalent
//! `SecurityFilterChain` / `FilterChainProxy`
//!
//! The pipeline is fixed and runs once per request:
//!
//! 1. CORS preflight on a registered path: answered here, nothing else runs
//! 2. Identity extraction through the [`Authenticator`]
//! 3. Authorization through the [`AuthorizationGate`]
//! 4. Route dispatch (only on `Allow`)
//! 5. CORS headers on the way out, denials included

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::http::security::config::Authenticator;
use crate::http::security::cors::{self, CorsHeaders};
use crate::http::security::gate::AuthorizationGate;
use crate::http::security::rule::Decision;

/// Security middleware factory.
///
/// The gate is shared, not copied, between workers.
///
/// # Example
/// ```ignore
/// let gate = Arc::new(site_gate(&properties)?);
///
/// HttpServer::new(move || {
///     App::new().wrap(SecurityTransform::new(Arc::clone(&gate), my_authenticator))
/// })
/// ```
pub struct SecurityTransform<Auth> {
    gate: Arc<AuthorizationGate>,
    authenticator: Arc<Auth>,
}

impl<Auth> SecurityTransform<Auth> {
    pub fn new(gate: Arc<AuthorizationGate>, authenticator: Auth) -> Self {
        SecurityTransform {
            gate,
            authenticator: Arc::new(authenticator),
        }
    }
}

impl<Auth> Clone for SecurityTransform<Auth> {
    fn clone(&self) -> Self {
        SecurityTransform {
            gate: Arc::clone(&self.gate),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

impl<S, B, Auth> Transform<S, ServiceRequest> for SecurityTransform<Auth>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SecurityService<Auth, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SecurityService {
            gate: Arc::clone(&self.gate),
            authenticator: Arc::clone(&self.authenticator),
            service: Rc::new(service),
        })
    }
}

/// Security middleware service.
pub struct SecurityService<Auth, S> {
    gate: Arc<AuthorizationGate>,
    authenticator: Arc<Auth>,
    service: Rc<S>,
}

impl<Auth, S, B> Service<ServiceRequest> for SecurityService<Auth, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = Arc::clone(&self.gate);
        // The router matches the requoted path (`%61` -> `a`), so rules must too.
        let path = req.match_info().as_str().to_string();
        let origin = req
            .headers()
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Step 1: preflight never reaches rule evaluation
        if cors::is_preflight(&req) && gate.cors_applies(&path) {
            let requested = req
                .headers()
                .get(header::ACCESS_CONTROL_REQUEST_METHOD)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            let granted = origin
                .as_deref()
                .and_then(|o| gate.cors_decision(o, &path, requested));
            return Box::pin(async move { Ok(preflight_response(req, granted, origin)) });
        }

        let cors_headers = origin
            .as_deref()
            .and_then(|o| gate.cors_decision(o, &path, req.method().as_str()));

        // Step 2: resolve the identity and expose it, with the gate's error
        // templates, to handler extractors
        let identity = self.authenticator.get_identity(&req);
        {
            let mut extensions = req.extensions_mut();
            if let Some(ref id) = identity {
                extensions.insert(id.clone());
            }
            extensions.insert(Arc::clone(&gate));
        }

        // Step 3: authorize
        let decision = gate.authorize(req.method(), &path, identity.as_ref());

        Box::pin(async move {
            let mut res = match decision.map(Decision::into_error) {
                Ok(None) => service.call(req).await?.map_into_left_body(),
                Ok(Some(kind)) => {
                    tracing::warn!(
                        method = %req.method(),
                        path = %path,
                        reason = %kind,
                        "request denied"
                    );
                    let body = gate.render_error(kind).to_http_response();
                    req.into_response(body).map_into_right_body()
                }
                Err(err) => {
                    tracing::error!(error = %err, "authorization gate misconfigured");
                    req.into_response(HttpResponse::InternalServerError().finish())
                        .map_into_right_body()
                }
            };

            if let Some(headers) = cors_headers {
                headers.apply(res.headers_mut(), false);
            }
            Ok(res)
        })
    }
}

fn preflight_response<B>(
    req: ServiceRequest,
    granted: Option<CorsHeaders>,
    origin: Option<String>,
) -> ServiceResponse<EitherBody<B>> {
    let response = match granted {
        Some(headers) => {
            let mut res = HttpResponse::Ok().finish();
            headers.apply(res.headers_mut(), true);
            res
        }
        None => {
            tracing::warn!(
                origin = origin.as_deref().unwrap_or("<none>"),
                path = req.path(),
                "rejected CORS preflight"
            );
            HttpResponse::Forbidden().body("Invalid CORS request")
        }
    };
    req.into_response(response).map_into_right_body()
}
