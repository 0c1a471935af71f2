// ⚙️ Configuration - store location and recognised species
//
// Loaded from TOML; every field has a default so an empty file is valid.
// Command-line overrides go through `with_store_path` so they are validated too.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default store file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "animal_data.json";

/// Config file names probed in the working directory when none is given.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["pet-registry.toml", "config.toml"];

// ============================================================================
// REGISTRY CONFIG
// ============================================================================

/// Main configuration structure.
///
/// ```toml
/// store_path = "animal_data.json"
///
/// [[species]]
/// name = "dog"
/// aliases = ["собака", "puppy"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub store_path: PathBuf,
    pub species: Vec<SpeciesConfig>,
}

// ============================================================================
// SPECIES CONFIG
// ============================================================================

/// One recognised species: canonical name written to the store, plus
/// alternative labels accepted at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl SpeciesConfig {
    fn new(name: &str, aliases: &[&str]) -> Self {
        SpeciesConfig {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Canonical name followed by aliases
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

// ============================================================================
// LOADING
// ============================================================================

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            species: vec![
                SpeciesConfig::new("dog", &["собака"]),
                SpeciesConfig::new("cat", &["кошка"]),
                SpeciesConfig::new("hamster", &["хомяк"]),
            ],
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, else from the first default file found in
    /// the working directory, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::info!("Loading config from: {}", path.display());
            return Self::from_file(path);
        }

        for name in DEFAULT_CONFIG_FILES {
            let path = Path::new(name);
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Replace the store path (command-line override) and re-validate.
    pub fn with_store_path(
        mut self,
        store_path: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        self.store_path = store_path.into();
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store_path must not be empty".to_string()));
        }

        if self.species.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one species must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for species in &self.species {
            for label in species.labels() {
                let key = label.trim().to_lowercase();
                if key.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "species '{}' has an empty label",
                        species.name
                    )));
                }
                if !seen.insert(key) {
                    return Err(ConfigError::Invalid(format!(
                        "species label '{}' is used more than once",
                        label
                    )));
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
