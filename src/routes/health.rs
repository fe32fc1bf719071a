use actix_web::{web, HttpResponse, Responder};

use crate::models::HealthResponse;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health check endpoint
///
/// Always 200; `status` is "degraded" when Redis or PostgreSQL is unreachable.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let cache = if !state.cache.has_redis() {
        "memory"
    } else {
        match state.cache.ping().await {
            Ok(_) => "redis",
            Err(e) => {
                tracing::warn!("Redis ping failed: {}", e);
                "unavailable"
            }
        }
    };

    let status = if pg_healthy && cache == "redis" {
        "healthy"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        listings: state.catalog.len(),
        cache: cache.to_string(),
        timestamp: chrono::Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_reports_degraded_without_services() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_support::state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "degraded");
        assert_eq!(body.cache, "memory");
        assert!(body.listings > 0);
    }
}
