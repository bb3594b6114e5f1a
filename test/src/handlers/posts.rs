//! Post routes. Reads are public, writes need a member.

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use site_security_core::http::security::AuthenticatedIdentity;

#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
}

#[get("/api/{version}/posts")]
pub async fn list(version: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "version": version.into_inner(),
        "items": [
            { "id": 1, "title": "Hello" },
            { "id": 2, "title": "Second post" },
        ],
    }))
}

#[get("/api/{version}/posts/{id}")]
pub async fn detail(path: web::Path<(String, String)>) -> impl Responder {
    let (_, id) = path.into_inner();
    HttpResponse::Ok().json(json!({ "id": id, "title": "Hello" }))
}

#[post("/api/{version}/posts")]
pub async fn write(identity: AuthenticatedIdentity, form: web::Json<PostForm>) -> impl Responder {
    let form = form.into_inner();
    HttpResponse::Created().json(json!({
        "author": identity.get_subject(),
        "title": form.title,
        "content": form.content,
    }))
}

#[put("/api/{version}/posts/{id}")]
pub async fn modify(
    identity: AuthenticatedIdentity,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (_, id) = path.into_inner();
    HttpResponse::Ok().json(json!({ "id": id, "modifiedBy": identity.get_subject() }))
}

#[delete("/api/{version}/posts/{id}")]
pub async fn remove(
    identity: AuthenticatedIdentity,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (_, id) = path.into_inner();
    HttpResponse::Ok().json(json!({ "id": id, "deletedBy": identity.get_subject() }))
}
