//! Common test utilities and configuration.
//!
//! This module provides shared test infrastructure including:
//! - Site properties and identities
//! - A header-based test authenticator
//! - Test app builder

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::dev::ServiceRequest;
use actix_web::{delete, get, post, put, test, web, App, HttpResponse, Responder};

use site_security_core::http::security::{
    site_gate, site_headers, AuthenticatedIdentity, Authenticator, Identity, OptionalIdentity,
    SecurityTransform, SiteProperties,
};

// =============================================================================
// Test Configuration
// =============================================================================

pub const FRONT_URL: &str = "https://www.example.com";
pub const EVIL_ORIGIN: &str = "https://evil.example";
pub const SUBJECT_HEADER: &str = "X-Test-Subject";
pub const ROLES_HEADER: &str = "X-Test-Roles";

pub const UNAUTHORIZED_BODY: &str = r#"{"resultCode":"401-1","msg":"로그인 후 이용해주세요."}"#;
pub const FORBIDDEN_BODY: &str = r#"{"resultCode":"403-1","msg":"권한이 없습니다."}"#;

pub fn site_properties() -> SiteProperties {
    SiteProperties::new("example.com", FRONT_URL, "https://api.example.com")
}

/// Reads the identity from `X-Test-Subject` / `X-Test-Roles`.
pub struct TestAuthenticator;

impl Authenticator for TestAuthenticator {
    fn get_identity(&self, req: &ServiceRequest) -> Option<Identity> {
        let subject = req.headers().get(SUBJECT_HEADER)?.to_str().ok()?;
        let roles: Vec<&str> = req
            .headers()
            .get(ROLES_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').collect())
            .unwrap_or_default();
        Some(Identity::new(subject).roles(&roles))
    }
}

/// Headers identifying a plain member.
pub fn as_member() -> [(&'static str, &'static str); 2] {
    [(SUBJECT_HEADER, "member1"), (ROLES_HEADER, "MEMBER")]
}

/// Headers identifying an administrator.
pub fn as_admin() -> [(&'static str, &'static str); 2] {
    [(SUBJECT_HEADER, "admin"), (ROLES_HEADER, "ADMIN,MEMBER")]
}

/// Adds identity headers to a request.
pub fn with_identity(
    mut req: test::TestRequest,
    headers: [(&'static str, &'static str); 2],
) -> test::TestRequest {
    for header in headers {
        req = req.insert_header(header);
    }
    req
}

// =============================================================================
// Test Handlers
// =============================================================================

#[get("/")]
pub async fn index(identity: OptionalIdentity) -> impl Responder {
    match identity.into_inner() {
        Some(id) => HttpResponse::Ok().body(format!("Welcome back, {}!", id.get_subject())),
        None => HttpResponse::Ok().body("Welcome, guest"),
    }
}

#[get("/favicon.ico")]
pub async fn favicon() -> impl Responder {
    HttpResponse::Ok().body("icon")
}

#[get("/h2-console/{tail:.*}")]
pub async fn h2_console() -> impl Responder {
    HttpResponse::Ok().body("console")
}

#[get("/api/{version}/posts")]
pub async fn posts() -> impl Responder {
    HttpResponse::Ok().body("posts")
}

#[get("/api/{version}/posts/{id}")]
pub async fn post_detail(path: web::Path<(String, String)>) -> impl Responder {
    HttpResponse::Ok().body(format!("post {}", path.into_inner().1))
}

#[post("/api/{version}/posts")]
pub async fn write_post(identity: AuthenticatedIdentity) -> impl Responder {
    HttpResponse::Created().body(format!("written by {}", identity.get_subject()))
}

#[put("/api/{version}/posts/{id}")]
pub async fn modify_post(identity: AuthenticatedIdentity) -> impl Responder {
    HttpResponse::Ok().body(format!("modified by {}", identity.get_subject()))
}

#[get("/api/{version}/posts/{post_id}/comments")]
pub async fn comments() -> impl Responder {
    HttpResponse::Ok().body("comments")
}

#[get("/api/{version}/posts/{post_id}/comments/{comment_id}")]
pub async fn comment_detail() -> impl Responder {
    HttpResponse::Ok().body("comment")
}

#[post("/api/v1/members/login")]
pub async fn login() -> impl Responder {
    HttpResponse::Ok().body("login")
}

#[post("/api/v1/members/join")]
pub async fn join() -> impl Responder {
    HttpResponse::Created().body("join")
}

#[delete("/api/v1/members/logout")]
pub async fn logout() -> impl Responder {
    HttpResponse::Ok().body("logout")
}

#[get("/api/v1/members/me")]
pub async fn me(identity: AuthenticatedIdentity) -> impl Responder {
    HttpResponse::Ok().body(format!("me: {}", identity.get_subject()))
}

#[get("/api/{version}/adm/members")]
pub async fn adm_members(identity: AuthenticatedIdentity) -> impl Responder {
    HttpResponse::Ok().body(format!("Admin: {}", identity.get_subject()))
}

/// Open to anonymous callers by the catch-all; the extractor still demands an identity.
#[get("/unguarded/me")]
pub async fn unguarded_me(identity: AuthenticatedIdentity) -> impl Responder {
    HttpResponse::Ok().body(identity.get_subject().to_string())
}

// =============================================================================
// Test App Builder
// =============================================================================

/// Creates a fully configured test application.
pub async fn create_test_app() -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
    Error = actix_web::Error,
> {
    let gate = Arc::new(site_gate(&site_properties()).unwrap());

    test::init_service(
        App::new()
            .wrap(SecurityTransform::new(gate, TestAuthenticator))
            .wrap(site_headers())
            .service(index)
            .service(favicon)
            .service(h2_console)
            .service(login)
            .service(join)
            .service(logout)
            .service(me)
            .service(adm_members)
            .service(comments)
            .service(comment_detail)
            .service(posts)
            .service(post_detail)
            .service(write_post)
            .service(modify_post)
            .service(unguarded_me),
    )
    .await
}
