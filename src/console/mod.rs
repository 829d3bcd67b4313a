pub mod commands;
mod error;

pub use error::CliError;
