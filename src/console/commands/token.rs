use crate::console::commands::CallableTrait;
use crate::console::CliError;
use crate::middleware::authentication::issue_token;
use crate::models::AuthPrincipal;
use std::time::Duration;

const DEFAULT_ROLE: &str = "user";

/// `gorbit token --secret <s> --id <id> --email <e> [--role r]...`
///
/// Prints a signed HS256 token for local testing against a running service.
pub struct TokenCommand {
    pub secret: String,
    pub principal: AuthPrincipal,
    pub ttl_minutes: u64,
    pub issuer: String,
}

impl TokenCommand {
    pub fn new(
        secret: String,
        id: String,
        email: String,
        roles: Vec<String>,
        ttl_minutes: u64,
        issuer: String,
    ) -> Self {
        let roles = if roles.is_empty() {
            vec![DEFAULT_ROLE.to_string()]
        } else {
            roles
        };

        Self {
            secret,
            principal: AuthPrincipal { id, email, roles },
            ttl_minutes,
            issuer,
        }
    }

    pub fn sign(&self) -> Result<String, CliError> {
        if self.secret.is_empty() {
            return Err(CliError::InvalidArgument("secret must not be empty".to_string()));
        }
        if self.ttl_minutes == 0 {
            return Err(CliError::InvalidArgument("ttl must be at least one minute".to_string()));
        }

        let ttl_secs = self
            .ttl_minutes
            .checked_mul(60)
            .ok_or_else(|| CliError::InvalidArgument("ttl is too large".to_string()))?;
        let ttl = Duration::from_secs(ttl_secs);
        Ok(issue_token(&self.principal, &self.secret, &self.issuer, ttl)?)
    }
}

impl CallableTrait for TokenCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        println!("{}", self.sign()?);
        Ok(())
    }
}
