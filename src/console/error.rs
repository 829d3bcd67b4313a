use crate::middleware::authentication::TokenIssueError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("directory {} already exists (use --force to overwrite)", .0.display())]
    ProjectExists(PathBuf),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("failed to write project files: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to sign token: {0}")]
    Token(#[from] TokenIssueError),
}
