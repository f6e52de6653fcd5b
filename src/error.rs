//! @acp:module "Errors"
//! @acp:summary "Error taxonomy shared by resolution, assembly and config loading"
//! @acp:domain cli
//! @acp:layer utility

use std::path::PathBuf;

use thiserror::Error;

/// @acp:summary "devlocal error type"
#[derive(Debug, Error)]
pub enum DevlocalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config files missing, unreadable or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The discovery root (`baseDir`) does not exist
    #[error("Base directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// A configured command sequence with no steps
    #[error("Command has no steps: {0}")]
    EmptyCommand(String),
}

pub type Result<T> = std::result::Result<T, DevlocalError>;
