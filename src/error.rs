//! Error types for standup-cli.

use thiserror::Error;

use crate::todoist::ProviderError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Todoist error: {0}")]
    Provider(#[from] ProviderError),
}

impl Error {
    /// Configuration error that points the user at the setup command.
    pub fn needs_setup(what: &str) -> Self {
        Error::Config(format!("{}. Run 'standup setup' first.", what))
    }
}
