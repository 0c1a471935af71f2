// 🏷️ Species Catalog - creation-from-input flow
//
// Maps user-supplied species labels onto the canonical tags from config,
// and turns raw menu input into an `Animal`.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::config::SpeciesConfig;
use crate::entities::Animal;
use crate::error::CreationError;

/// Birth date format accepted on input and written to the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// NEW ANIMAL
// ============================================================================

/// Outcome of a successful creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnimal {
    pub animal: Animal,

    /// True when the date input was malformed and `today` was used instead
    pub date_fallback: bool,
}

// ============================================================================
// SPECIES CATALOG
// ============================================================================

/// Recognised species and their labels.
#[derive(Debug, Clone)]
pub struct SpeciesCatalog {
    /// Canonical names in configuration order
    names: Vec<String>,

    /// lowercased label → index into `names`
    labels: HashMap<String, usize>,
}

impl SpeciesCatalog {
    pub fn from_config(species: &[SpeciesConfig]) -> Self {
        let mut names = Vec::with_capacity(species.len());
        let mut labels = HashMap::new();

        for (idx, entry) in species.iter().enumerate() {
            names.push(entry.name.clone());
            for label in entry.labels() {
                labels.entry(label.trim().to_lowercase()).or_insert(idx);
            }
        }

        SpeciesCatalog { names, labels }
    }

    /// Resolve a label (canonical name or alias, any case) to its canonical name.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.labels
            .get(&label.trim().to_lowercase())
            .map(|&idx| self.names[idx].as_str())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Build an animal from raw input.
    ///
    /// - empty (or blank) name → `CreationError::EmptyName`
    /// - unrecognised species → `CreationError::UnknownSpecies`
    /// - malformed date → `today`, flagged via `date_fallback`
    pub fn create_animal(
        &self,
        name: &str,
        species_label: &str,
        birth_date: &str,
        today: NaiveDate,
    ) -> Result<NewAnimal, CreationError> {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("Rejected animal with empty name");
            return Err(CreationError::EmptyName);
        }

        let species = self.resolve(species_label).ok_or_else(|| {
            tracing::debug!("Rejected unknown species '{}'", species_label);
            CreationError::UnknownSpecies(species_label.trim().to_string())
        })?;

        let (birth_date, date_fallback) = match parse_birth_date(birth_date) {
            Some(date) => (date, false),
            None => {
                tracing::warn!(
                    "Invalid birth date '{}' for {}, using {} instead",
                    birth_date.trim(),
                    name,
                    today
                );
                (today, true)
            }
        };

        Ok(NewAnimal {
            animal: Animal::new(name, species, birth_date),
            date_fallback,
        })
    }
}

/// Strict `YYYY-MM-DD` parse (surrounding whitespace ignored).
pub fn parse_birth_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

// ============================================================================
// TESTS
// ============================================================================
