// ⚠️ Error Types - typed failures for the pet registry
//
// Store and creation errors are recoverable: the registry falls back to an
// empty collection or leaves itself untouched. None of them end the process.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// REGISTRY ERROR
// ============================================================================

/// Umbrella error for registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Animal not found: {0}")]
    NotFound(String),

    #[error("Creation failed: {0}")]
    Creation(#[from] CreationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// ============================================================================
// STORE ERROR
// ============================================================================

/// Backing store errors (load at startup, save after mutation).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store file does not exist: {}", .0.display())]
    Missing(PathBuf),

    #[error("Failed to read store {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse store {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed JSON holding records that break the data model
    #[error("Invalid record in store {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },

    #[error("Failed to write store {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// The file exists but its content could not be used
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Parse { .. } | StoreError::Invalid { .. })
    }
}

// ============================================================================
// CREATION ERROR
// ============================================================================

/// Rejections from the creation-from-input flow. No animal is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreationError {
    #[error("Animal name must not be empty")]
    EmptyName,

    #[error("Unknown species: {0}")]
    UnknownSpecies(String),
}

// ============================================================================
// CONFIG ERROR
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
