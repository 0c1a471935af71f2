// 🐾 Animal Entity - one pet record
//
// Identity fields (name, species, birth date) are fixed at construction.
// The command list only grows, through `teach`.
//
// The animal exclusively owns its commands: callers get `&[String]`,
// never a second mutable handle to the list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// ANIMAL
// ============================================================================

/// A pet record as stored in the backing store.
///
/// JSON shape: `{"name", "type", "birthDate", "commands"}`, date as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    /// Lookup key (case-insensitive). Not unique.
    name: String,

    /// Species tag, free text in the data itself
    #[serde(rename = "type")]
    species: String,

    #[serde(rename = "birthDate")]
    birth_date: NaiveDate,

    /// Taught commands in teaching order, duplicates allowed
    #[serde(default)]
    commands: Vec<String>,
}

impl Animal {
    /// Create an animal with an empty command list.
    ///
    /// No validation happens here; the creation flow in
    /// [`crate::species::SpeciesCatalog::create_animal`] rejects empty names
    /// and unknown species.
    pub fn new(name: impl Into<String>, species: impl Into<String>, birth_date: NaiveDate) -> Self {
        Animal {
            name: name.into(),
            species: species.into(),
            birth_date,
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Append a command. No deduplication.
    pub fn teach(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    /// Case-insensitive name match
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_animal_creation() {
        let rex = Animal::new("Rex", "dog", date("2020-01-01"));

        assert_eq!(rex.name(), "Rex");
        assert_eq!(rex.species(), "dog");
        assert_eq!(rex.birth_date(), date("2020-01-01"));
        assert!(rex.commands().is_empty());
    }

    #[test]
    fn test_teach_keeps_order_and_duplicates() {
        let mut rex = Animal::new("Rex", "dog", date("2020-01-01"));

        rex.teach("sit");
        rex.teach("stay");
        rex.teach("sit");

        assert_eq!(rex.commands(), ["sit", "stay", "sit"]);
    }

    #[test]
    fn test_has_name_ignores_case() {
        let milo = Animal::new("Milo", "cat", date("2019-05-05"));

        assert!(milo.has_name("milo"));
        assert!(milo.has_name("MILO"));
        assert!(!milo.has_name("mil"));
    }

    #[test]
    fn test_json_shape() {
        let mut rex = Animal::new("Rex", "dog", date("2020-01-01"));
        rex.teach("sit");

        let json = serde_json::to_value(&rex).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Rex",
                "type": "dog",
                "birthDate": "2020-01-01",
                "commands": ["sit"]
            })
        );
    }

    #[test]
    fn test_missing_commands_field_defaults_to_empty() {
        let json = r#"{"name":"Milo","type":"cat","birthDate":"2019-05-05"}"#;
        let milo: Animal = serde_json::from_str(json).unwrap();

        assert_eq!(milo.name(), "Milo");
        assert!(milo.commands().is_empty());
    }
}
