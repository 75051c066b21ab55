use crate::idgen::GenerationError;
use thiserror::Error;

/// Errors produced while building or parsing namespaced keys
#[derive(Error, Debug)]
pub enum NamespaceError {
    /// No key delimiter found. The input is carried back as a bare key.
    #[error("Key not have namespace: {key}")]
    NoNamespace { key: String },

    #[error("Namespace format not match: {parts} parts after key delimiter split")]
    AmbiguousFormat { parts: usize },

    #[error("Namespace format not match: missing prefix '{prefix}'")]
    MissingPrefix { prefix: String },

    #[error("Random key generation error: {0}")]
    RandomGeneration(#[from] GenerationError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl NamespaceError {
    /// The bare key returned alongside [`NamespaceError::NoNamespace`]
    pub fn bare_key(&self) -> Option<&str> {
        match self {
            NamespaceError::NoNamespace { key } => Some(key),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NamespaceError>;
