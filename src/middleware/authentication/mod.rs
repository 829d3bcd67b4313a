mod getheader;
mod jwt;
mod manager;
mod manager_middleware;

pub use getheader::get_header;
pub use jwt::{authenticate, extract_bearer_token, issue_token, TokenIssueError, TokenVerifier, HMAC_ALGORITHMS};
pub use manager::BearerAuth;
pub use manager_middleware::BearerAuthMiddleware;
