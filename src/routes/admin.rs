use crate::models::AuthPrincipal;
use actix_web::{get, web, HttpResponse};
use serde_json::json;
use std::sync::Arc;

#[tracing::instrument(name = "Admin status", skip(principal), fields(user_id = %principal.id))]
#[get("/status")]
pub async fn admin_status_handler(principal: web::ReqData<Arc<AuthPrincipal>>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "admin access granted",
        "user": principal.id,
    }))
}
