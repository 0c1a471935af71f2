// Pet Registry - Core Library
// Exposes the registry, store and menu for the CLI binary and tests

pub mod config;
pub mod entities;
pub mod error;
pub mod registry;
pub mod species;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use config::{RegistryConfig, SpeciesConfig, DEFAULT_STORE_PATH};
pub use entities::Animal;
pub use error::{ConfigError, CreationError, RegistryError, StoreError};
pub use registry::{Added, AnimalRegistry};
pub use species::{parse_birth_date, NewAnimal, SpeciesCatalog, DATE_FORMAT};
pub use store::JsonStore;
pub use ui::Menu;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
