use crate::middleware::authentication::get_header;
use crate::middleware::AuthError;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error,
};
use futures_util::future::LocalBoxFuture;
use serde::Deserialize;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

/// Exact match against the single configured key. An empty presented key is
/// never accepted.
pub fn check_api_key(presented: Option<&str>, expected: &str) -> Result<(), AuthError> {
    match presented {
        Some(key) if !key.is_empty() && key == expected => Ok(()),
        _ => Err(AuthError::InvalidApiKey),
    }
}

/// `X-API-Key` header, or the `api_key` query parameter when the header is
/// absent or empty. A header that is present but unreadable is rejected
/// outright.
fn presented_key(req: &ServiceRequest) -> Result<Option<String>, AuthError> {
    let header = get_header(req, "x-api-key").map_err(|_| AuthError::InvalidApiKey)?;
    if let Some(key) = header.filter(|key| !key.is_empty()) {
        return Ok(Some(key.to_string()));
    }

    Ok(web::Query::<ApiKeyQuery>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.into_inner().api_key))
}

/// Static API-key guard for machine-to-machine calls.
#[derive(Clone)]
pub struct ApiKeyGuard {
    api_key: Arc<str>,
}

impl ApiKeyGuard {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: Arc::from(api_key),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyGuardMiddleware {
            service: Rc::new(service),
            api_key: self.api_key.clone(),
        }))
    }
}

pub struct ApiKeyGuardMiddleware<S> {
    service: Rc<S>,
    api_key: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let api_key = self.api_key.clone();

        Box::pin(async move {
            let checked = presented_key(&req)
                .and_then(|presented| check_api_key(presented.as_deref(), &api_key));
            if let Err(err) = checked {
                tracing::warn!(path = %req.path(), "API key rejected");
                return Ok(err.reject(req));
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{call_service, init_service, TestRequest};
    use actix_web::{http::header::HeaderValue, http::StatusCode, App, HttpResponse};

    const KEY: &str = "secret123";

    #[test]
    fn exact_match_only() {
        assert_eq!(check_api_key(Some("secret123"), KEY), Ok(()));
        assert_eq!(check_api_key(Some("secret1234"), KEY), Err(AuthError::InvalidApiKey));
        assert_eq!(check_api_key(Some(""), KEY), Err(AuthError::InvalidApiKey));
        assert_eq!(check_api_key(None, KEY), Err(AuthError::InvalidApiKey));
    }

    #[test]
    fn empty_configured_key_accepts_nothing() {
        assert_eq!(check_api_key(Some(""), ""), Err(AuthError::InvalidApiKey));
    }

    async fn status_for(req: TestRequest) -> StatusCode {
        let app = init_service(
            App::new().service(
                web::scope("/internal")
                    .wrap(ApiKeyGuard::new(KEY))
                    .route("", web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        call_service(&app, req.to_request()).await.status()
    }

    #[actix_web::test]
    async fn header_key_is_accepted() {
        let req = TestRequest::get()
            .uri("/internal")
            .insert_header(("X-API-Key", KEY));
        assert_eq!(status_for(req).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn query_key_is_used_when_header_absent() {
        let req = TestRequest::get().uri("/internal?api_key=secret123");
        assert_eq!(status_for(req).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn wrong_header_key_is_rejected() {
        let req = TestRequest::get()
            .uri("/internal")
            .insert_header(("X-API-Key", "nope"));
        assert_eq!(status_for(req).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn header_takes_precedence_over_query() {
        let req = TestRequest::get()
            .uri("/internal?api_key=secret123")
            .insert_header(("X-API-Key", "nope"));
        assert_eq!(status_for(req).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unreadable_header_does_not_fall_back_to_query() {
        let req = TestRequest::get()
            .uri("/internal?api_key=secret123")
            .insert_header(("X-API-Key", HeaderValue::from_bytes(b"secr\xe9t123").unwrap()));
        assert_eq!(status_for(req).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn empty_header_falls_back_to_query() {
        let req = TestRequest::get()
            .uri("/internal?api_key=secret123")
            .insert_header(("X-API-Key", ""));
        assert_eq!(status_for(req).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn absent_key_is_rejected() {
        let req = TestRequest::get().uri("/internal");
        assert_eq!(status_for(req).await, StatusCode::UNAUTHORIZED);
    }
}
