//! Security headers middleware tests.
//!
//! Tests for X-Frame-Options, nosniff and the cache-control trio.

use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{get, test, App, HttpResponse, Responder};

use site_security_core::http::security::headers::{FrameOptions, SecurityHeaders};
use site_security_core::http::security::site_headers;

#[get("/test")]
async fn test_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Test")
}

#[get("/cached")]
async fn cached_endpoint() -> impl Responder {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, HeaderValue::from_static("max-age=3600")))
        .body("Cached")
}

// =============================================================================
// Default Headers Tests
// =============================================================================

#[actix_web::test]
async fn test_default_security_headers() {
    let app = test::init_service(
        App::new()
            .wrap(SecurityHeaders::default())
            .service(test_endpoint),
    )
    .await;

    let req = test::TestRequest::get().uri("/test").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let headers = resp.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-xss-protection").unwrap(), "0");
    assert_eq!(
        headers.get("cache-control").unwrap(),
        "no-cache, no-store, max-age=0, must-revalidate"
    );
    assert_eq!(headers.get("pragma").unwrap(), "no-cache");
    assert_eq!(headers.get("expires").unwrap(), "0");
}

// =============================================================================
// Site Configuration Tests
// =============================================================================

#[actix_web::test]
async fn test_site_headers_allow_same_origin_frames() {
    let app = test::init_service(App::new().wrap(site_headers()).service(test_endpoint)).await;

    let req = test::TestRequest::get().uri("/test").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get("x-frame-options").unwrap(), "SAMEORIGIN");
}

#[actix_web::test]
async fn test_frame_options_disabled() {
    let app = test::init_service(
        App::new()
            .wrap(SecurityHeaders::new().frame_options(FrameOptions::Disabled))
            .service(test_endpoint),
    )
    .await;

    let req = test::TestRequest::get().uri("/test").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.headers().get("x-frame-options").is_none());
    assert_eq!(resp.headers().get("x-content-type-options").unwrap(), "nosniff");
}

#[actix_web::test]
async fn test_handler_cache_control_is_kept() {
    let app = test::init_service(
        App::new()
            .wrap(SecurityHeaders::default())
            .service(cached_endpoint),
    )
    .await;

    let req = test::TestRequest::get().uri("/cached").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get("cache-control").unwrap(), "max-age=3600");
}

#[actix_web::test]
async fn test_headers_on_not_found() {
    let app = test::init_service(App::new().wrap(site_headers()).service(test_endpoint)).await;

    let req = test::TestRequest::get().uri("/missing").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers().get("x-content-type-options").unwrap(), "nosniff");
}
