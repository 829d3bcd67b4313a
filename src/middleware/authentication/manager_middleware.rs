use super::{authenticate, get_header, TokenVerifier};
use crate::middleware::AuthError;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::rc::Rc;
use std::sync::Arc;

pub struct BearerAuthMiddleware<S> {
    pub(super) service: Rc<S>,
    pub(super) verifier: Arc<TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
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
        let verifier = self.verifier.clone();

        Box::pin(async move {
            let principal = get_header(&req, "authorization")
                .map_err(|_| AuthError::InvalidFormat)
                .and_then(|authorization| authenticate(authorization, &verifier));

            let principal = match principal {
                Ok(principal) => principal,
                Err(err) => {
                    tracing::debug!(path = %req.path(), "Bearer authentication rejected: {}", err);
                    return Ok(err.reject(req));
                }
            };

            tracing::debug!(user_id = %principal.id, "Bearer authentication successful");
            req.extensions_mut().insert(Arc::new(principal));

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}
