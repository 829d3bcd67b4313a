mod admin;
pub mod health_checks;
mod random;
mod user;

pub use admin::*;
pub use health_checks::*;
pub use random::*;
pub use user::*;
