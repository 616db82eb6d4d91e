//! Liveness endpoint

use actix_web::{HttpResponse, Scope, get, web};
use serde_json::json;

use crate::model::{AppState, response::Result};

/// GET /health
#[get("")]
async fn health(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(Result::success(json!({
        "status": "UP",
        "storage": data.store.backend(),
    })))
}

pub fn routes() -> Scope {
    web::scope("/health").service(health)
}
