use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::api::state::AppState;

pub async fn health(
    state: web::Data<AppState>
) -> impl Responder {
    HttpResponse::Ok().json(json!({ "ok": true, "service": state.service_name }))
}

/// Fallback for every route that matched nothing.
pub async fn not_found(
    req: HttpRequest
) -> impl Responder {
    HttpResponse::NotFound().json(json!({ "error": "Not Found", "path": req.uri().to_string() }))
}
