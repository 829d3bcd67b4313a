use crate::health::HealthChecker;
use actix_web::{get, http::StatusCode, web, HttpResponse};

/// 200 when every backing store answers, 503 otherwise. The body has the
/// same shape either way.
#[tracing::instrument(name = "Health check", skip(checker))]
#[get("/health")]
pub async fn health_check(checker: web::Data<HealthChecker>) -> HttpResponse {
    let report = checker.check_all().await;

    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponse::build(status).json(report.to_response())
}
