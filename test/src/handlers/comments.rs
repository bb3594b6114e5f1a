//! Comment routes nested under a post.

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use site_security_core::http::security::AuthenticatedIdentity;

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub content: String,
}

#[get("/api/{version}/posts/{post_id}/comments")]
pub async fn list(path: web::Path<(String, String)>) -> impl Responder {
    let (_, post_id) = path.into_inner();
    HttpResponse::Ok().json(json!({
        "postId": post_id,
        "items": [{ "id": 1, "content": "First!" }],
    }))
}

#[get("/api/{version}/posts/{post_id}/comments/{comment_id}")]
pub async fn detail(path: web::Path<(String, String, String)>) -> impl Responder {
    let (_, post_id, comment_id) = path.into_inner();
    HttpResponse::Ok().json(json!({ "postId": post_id, "id": comment_id, "content": "First!" }))
}

#[post("/api/{version}/posts/{post_id}/comments")]
pub async fn write(
    identity: AuthenticatedIdentity,
    path: web::Path<(String, String)>,
    form: web::Json<CommentForm>,
) -> impl Responder {
    let (_, post_id) = path.into_inner();
    HttpResponse::Created().json(json!({
        "postId": post_id,
        "author": identity.get_subject(),
        "content": form.into_inner().content,
    }))
}
