use std::path::PathBuf;
use thiserror::Error;

/// Failures the user is told about directly. Everything else travels as a
/// plain `anyhow::Error` with context attached.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("network error while fetching {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("Go {version} is not available for {platform}; run with --action listgoversions to see what is")]
    NotFound { version: String, platform: String },

    #[error("{0}")]
    Precondition(String),

    #[error("Go is already installed at {}; remove it first to reinstall", .0.display())]
    AlreadyInstalled(PathBuf),
}

impl SetupError {
    pub fn network(url: &str, reason: impl ToString) -> Self {
        SetupError::Network {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
