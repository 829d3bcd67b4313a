use crate::middleware::AuthError;
use crate::models::AuthPrincipal;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

/// Checks a principal attached by an earlier stage against `required_role`.
pub fn authorize(principal: Option<&AuthPrincipal>, required_role: &str) -> Result<(), AuthError> {
    let principal = principal.ok_or(AuthError::NotAuthenticated)?;
    if !principal.has_role(required_role) {
        return Err(AuthError::InsufficientPermissions);
    }
    Ok(())
}

/// Role guard. Must run after [`BearerAuth`](super::authentication::BearerAuth),
/// so wrap it *before* the bearer guard on the same scope.
#[derive(Clone)]
pub struct RoleGuard {
    required_role: Rc<str>,
}

impl RoleGuard {
    pub fn new(required_role: &str) -> Self {
        Self {
            required_role: Rc::from(required_role),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGuardMiddleware {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}

pub struct RoleGuardMiddleware<S> {
    service: Rc<S>,
    required_role: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for RoleGuardMiddleware<S>
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
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let principal = req.extensions().get::<Arc<AuthPrincipal>>().cloned();

            if let Err(err) = authorize(principal.as_deref(), &required_role) {
                tracing::warn!(
                    path = %req.path(),
                    required_role = %required_role,
                    "Authorization rejected: {}",
                    err
                );
                return Ok(err.reject(req));
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}
