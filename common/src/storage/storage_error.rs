use std::fmt;

use crate::config::ConfigError;

#[derive(Debug)]
pub enum StorageError {
    Backend(ConfigError),
    Unavailable(String),
    Poisoned,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Backend(e) => write!(f, "Storage backend error: {}", e),
            StorageError::Unavailable(reason) => write!(f, "Storage unavailable: {}", reason),
            StorageError::Poisoned => write!(f, "Storage lock poisoned"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Backend(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for StorageError {
    fn from(e: ConfigError) -> Self {
        StorageError::Backend(e)
    }
}
