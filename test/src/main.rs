//! Blog API demo secured by the site authorization gate.
//!
//! Configuration is read from `CUSTOM_SITE_DOMAIN`, `CUSTOM_SITE_FRONT_URL`
//! and `CUSTOM_SITE_BACK_URL`. Log verbosity follows `RUST_LOG`.


use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer};
use tracing_subscriber::EnvFilter;

use site_security_core::http::security::{site_gate, site_headers, SecurityTransform, SiteProperties};

use crate::auth::{HeaderAuthenticator, ROLES_HEADER, SUBJECT_HEADER};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,site_security_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_startup_info(properties: &SiteProperties) {
    println!("=== Site Security Demo ===");
    println!();
    println!("Server:       http://127.0.0.1:8080");
    println!("Front origin: {}", properties.front_url);
    println!("OAuth2 base:  {}", properties.oauth2_redirect_base_uri());
    println!();
    println!("Identity headers (demo only):");
    println!("  {}: <member id>", SUBJECT_HEADER);
    println!("  {}: ADMIN,MEMBER", ROLES_HEADER);
    println!();
    println!("Examples:");
    println!("  curl http://127.0.0.1:8080/api/v1/posts/1");
    println!("  curl -X POST http://127.0.0.1:8080/api/v1/posts          # 401");
    println!("  curl -H '{}: 1' http://127.0.0.1:8080/api/v1/adm/members  # 403", SUBJECT_HEADER);
    println!(
        "  curl -H '{}: 1' -H '{}: ADMIN' http://127.0.0.1:8080/api/v1/adm/members",
        SUBJECT_HEADER, ROLES_HEADER
    );
    println!();
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let properties = SiteProperties::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let gate = Arc::new(
        site_gate(&properties).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?,
    );

    print_startup_info(&properties);
    for (index, rule) in gate.rules().iter().enumerate() {
        tracing::debug!(index, %rule, "rule");
    }

    HttpServer::new(move || {
        App::new()
            .wrap(SecurityTransform::new(Arc::clone(&gate), HeaderAuthenticator))
            .wrap(site_headers())
            // Outside /api
            .service(handlers::home::index)
            .service(handlers::home::favicon)
            // Members
            .service(handlers::members::login)
            .service(handlers::members::join)
            .service(handlers::members::logout)
            .service(handlers::members::me)
            // Administration
            .service(handlers::adm::members)
            // Comments before posts: more specific paths first
            .service(handlers::comments::list)
            .service(handlers::comments::detail)
            .service(handlers::comments::write)
            // Posts
            .service(handlers::posts::list)
            .service(handlers::posts::detail)
            .service(handlers::posts::write)
            .service(handlers::posts::modify)
            .service(handlers::posts::remove)
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
