//! Error types for comgen

use thiserror::Error;

/// Result type alias for fallible comgen operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Error type for store, configuration and I/O failures
///
/// Generation runs themselves report problems as [`crate::Diagnostic`]s;
/// this type covers the adapters around them.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed `vendor:library:name:version` identifier
    #[error("invalid VLNV: {0}")]
    InvalidVlnv(String),

    /// Component not found in the metadata store
    #[error("unknown component: {0}")]
    UnknownComponent(String),

    /// Design not found in the metadata store
    #[error("unknown design: {0}")]
    UnknownDesign(String),

    /// No protocol family with this name
    #[error("unknown protocol family: {0}")]
    UnknownFamily(String),

    /// Configuration rejected by validation
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// TOML or JSON (de)serialization error
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// The store refused a metadata write-back
    #[error("metadata write failed: {0}")]
    StoreWrite(String),
}

impl GeneratorError {
    /// Stable numeric code, shown next to CLI error messages
    pub fn error_code(&self) -> u32 {
        match self {
            GeneratorError::Io(_) => 1,
            GeneratorError::InvalidVlnv(_) => 2,
            GeneratorError::UnknownComponent(_) => 3,
            GeneratorError::UnknownDesign(_) => 4,
            GeneratorError::UnknownFamily(_) => 5,
            GeneratorError::ConfigError(_) => 6,
            GeneratorError::SerializationError(_) => 7,
            GeneratorError::StoreWrite(_) => 8,
        }
    }
}

impl From<serde_json::Error> for GeneratorError {
    fn from(err: serde_json::Error) -> Self {
        GeneratorError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for GeneratorError {
    fn from(err: toml::de::Error) -> Self {
        GeneratorError::SerializationError(err.to_string())
    }
}

impl From<toml::ser::Error> for GeneratorError {
    fn from(err: toml::ser::Error) -> Self {
        GeneratorError::SerializationError(err.to_string())
    }
}


#[cfg(test)]
#[path = "error/error_parameterized_tests.rs"]
mod error_parameterized_tests;
