use crate::middleware::AuthError;
use crate::models::{AuthPrincipal, TokenClaims};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;

/// Only symmetric HMAC signatures are accepted. A token declaring anything
/// else (asymmetric, `none`) is rejected before verification is attempted.
pub const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, thiserror::Error)]
pub enum TokenIssueError {
    #[error("token lifetime of {0:?} is out of range")]
    TtlOutOfRange(Duration),
    #[error(transparent)]
    Signing(#[from] jsonwebtoken::errors::Error),
}

pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Rejects tokens whose `iss` claim names a different issuer. Tokens
    /// without `iss` are still accepted.
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let header = decode_header(token).map_err(|err| {
            tracing::debug!("JWT header rejected: {}", err);
            AuthError::InvalidToken
        })?;

        if !HMAC_ALGORITHMS.contains(&header.alg) {
            tracing::warn!("JWT signed with disallowed algorithm: {:?}", header.alg);
            return Err(AuthError::InvalidToken);
        }

        decode::<TokenClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!("JWT validation failed: {}", err);
                AuthError::InvalidToken
            })
    }
}

/// Requires exactly `Bearer <token>`: one space, two parts, non-empty token.
pub fn extract_bearer_token(authorization: &str) -> Result<&str, AuthError> {
    let parts: Vec<&str> = authorization.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => Err(AuthError::InvalidFormat),
    }
}

/// Runs the bearer-token state machine over the raw `Authorization` value.
pub fn authenticate(
    authorization: Option<&str>,
    verifier: &TokenVerifier,
) -> Result<AuthPrincipal, AuthError> {
    let authorization = authorization.ok_or(AuthError::MissingHeader)?;
    let token = extract_bearer_token(authorization)?;
    let claims = verifier.verify(token)?;

    Ok(claims.user)
}

/// Signs an HS256 token for `principal`, valid for `ttl`.
pub fn issue_token(
    principal: &AuthPrincipal,
    secret: &str,
    issuer: &str,
    ttl: Duration,
) -> Result<String, TokenIssueError> {
    let now = chrono::Utc::now().timestamp();
    let exp = i64::try_from(ttl.as_secs())
        .ok()
        .and_then(|secs| now.checked_add(secs))
        .ok_or(TokenIssueError::TtlOutOfRange(ttl))?;

    let claims = TokenClaims {
        user: principal.clone(),
        iss: Some(issuer.to_string()),
        sub: Some(principal.id.clone()),
        exp,
        iat: Some(now),
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}
