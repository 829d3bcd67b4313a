use actix_web::{get, HttpResponse};
use rand::Rng;
use serde_json::json;

#[tracing::instrument(name = "Random number")]
#[get("")]
pub async fn random_number_handler() -> HttpResponse {
    let number: u32 = rand::thread_rng().gen_range(1..=1000);

    HttpResponse::Ok().json(json!({
        "number": number,
        "version": "v1",
    }))
}
