mod callable;
pub mod new;
pub mod token;
pub mod version;

pub use callable::*;
pub use new::NewCommand;
pub use token::TokenCommand;
pub use version::{VersionCommand, WelcomeCommand};
