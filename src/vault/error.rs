use thiserror::Error;

/// Durability failures from either backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("No record IDs left to allocate")]
    IdsExhausted,
}

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("{0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No records found.")]
    EmptyCollection,

    #[error("Config error: {0}")]
    Config(String),
}

impl VaultError {
    pub fn validation(msg: impl Into<String>) -> Self {
        VaultError::Validation(msg.into())
    }
}

impl From<std::io::Error> for VaultError {
    fn from(e: std::io::Error) -> Self {
        VaultError::Storage(StorageError::Io(e))
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(e: serde_json::Error) -> Self {
        VaultError::Storage(StorageError::Serialization(e))
    }
}

impl From<reqwest::Error> for VaultError {
    fn from(e: reqwest::Error) -> Self {
        VaultError::Storage(StorageError::Http(e))
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
