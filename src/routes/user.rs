use crate::models::AuthPrincipal;
use actix_web::{get, web, HttpResponse};
use std::sync::Arc;

#[tracing::instrument(name = "Get current user", skip(principal), fields(user_id = %principal.id))]
#[get("")]
pub async fn me_handler(principal: web::ReqData<Arc<AuthPrincipal>>) -> HttpResponse {
    HttpResponse::Ok().json(principal.into_inner().as_ref())
}
