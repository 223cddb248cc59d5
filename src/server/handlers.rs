//! HTTP route handlers

use actix_web::HttpResponse;
use serde_json::json;

/// Health check endpoint handler
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Lightweight rate-limited endpoint for probing quotas
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "pong": true }))
}
