use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WipeError {
    #[error("{0}")]
    NotFound(String),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("archive {0}")]
    Archive(String),
    #[error("{0}")]
    PartialRestore(String),
    #[error("{0}")]
    Config(ConfigError),
    #[error("{0}")]
    Message(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parse settings: {0}")]
    Parse(String),
    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, WipeError>;

impl WipeError {
    pub fn message(msg: impl Into<String>) -> Self {
        WipeError::Message(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        WipeError::NotFound(msg.into())
    }

    pub fn io(action: &str, path: &Path, source: io::Error) -> Self {
        WipeError::Io {
            context: format!("{} {}", action, path.display()),
            source,
        }
    }
}

impl From<ConfigError> for WipeError {
    fn from(err: ConfigError) -> Self {
        WipeError::Config(err)
    }
}

impl From<zip::result::ZipError> for WipeError {
    fn from(err: zip::result::ZipError) -> Self {
        WipeError::Archive(err.to_string())
    }
}
