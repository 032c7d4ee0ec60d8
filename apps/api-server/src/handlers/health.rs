//! Health check endpoint.

use actix_web::HttpResponse;
use postboard_shared::HealthResponse;

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    })
}
