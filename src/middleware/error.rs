use actix_web::{
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    error::ResponseError,
    http::StatusCode,
    HttpResponse,
};
use serde_json::json;

/// Rejections produced by the auth gate. The display string is the stable,
/// machine-readable reason returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing header")]
    MissingHeader,
    #[error("invalid format")]
    InvalidFormat,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("insufficient permissions")]
    InsufficientPermissions,
    #[error("invalid API key")]
    InvalidApiKey,
}

impl AuthError {
    /// Short-circuits a guarded request with the rendered rejection, so outer
    /// middleware still sees a response rather than an error.
    pub(crate) fn reject<B>(self, req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.error_response(self).map_into_right_body()
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        let error = match self.status_code() {
            StatusCode::FORBIDDEN => "Forbidden",
            _ => "Unauthorized",
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": error,
            "message": self.to_string(),
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::InsufficientPermissions => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}
