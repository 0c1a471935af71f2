// 📒 Animal Registry - in-memory collection + JSON persistence
//
// Owns the animals in insertion order. Every mutation rewrites the whole
// collection to the backing store. A failed write is reported to the caller
// but the in-memory change is kept, so memory and disk can diverge until the
// next successful save.

use chrono::NaiveDate;

use crate::entities::Animal;
use crate::error::{RegistryError, Result, StoreError};
use crate::species::{NewAnimal, SpeciesCatalog};
use crate::store::JsonStore;

// ============================================================================
// ADD OUTCOME
// ============================================================================

/// Result of [`AnimalRegistry::add_new`]: the animal is in the registry.
#[derive(Debug)]
pub struct Added<'a> {
    pub animal: &'a Animal,

    /// Birth date input was malformed and today's date was used
    pub date_fallback: bool,

    /// Set when the animal was added in memory but the store write failed
    pub persist_error: Option<StoreError>,
}

// ============================================================================
// REGISTRY
// ============================================================================

pub struct AnimalRegistry {
    animals: Vec<Animal>,

    /// Kept equal to `animals.len()`
    animal_counter: usize,

    store: JsonStore,

    /// Why the registry started empty, if loading failed
    startup_warning: Option<StoreError>,

    /// Unreadable store still on disk, to be moved aside before the first save
    backup_pending: bool,
}

impl AnimalRegistry {
    /// Load the registry from `store`.
    ///
    /// Never fails: a missing or unreadable store yields an empty registry and
    /// the reason is kept in [`startup_warning`](Self::startup_warning).
    pub fn open(store: JsonStore) -> Self {
        let (animals, startup_warning) = match store.load() {
            Ok(animals) => {
                tracing::info!(
                    "Loaded {} animals from {}",
                    animals.len(),
                    store.path().display()
                );
                (animals, None)
            }
            Err(e) => {
                tracing::warn!("Could not load animals ({}), starting with an empty registry", e);
                (Vec::new(), Some(e))
            }
        };

        let backup_pending = startup_warning
            .as_ref()
            .is_some_and(StoreError::is_corrupt);

        AnimalRegistry {
            animal_counter: animals.len(),
            animals,
            store,
            startup_warning,
            backup_pending,
        }
    }

    pub fn startup_warning(&self) -> Option<&StoreError> {
        self.startup_warning.as_ref()
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    /// Append `animal` and persist the collection.
    ///
    /// On `Err` the animal is still in the registry; only the write failed.
    pub fn add_animal(&mut self, animal: Animal) -> std::result::Result<&Animal, StoreError> {
        tracing::info!("Adding {} ({})", animal.name(), animal.species());

        self.animals.push(animal);
        self.animal_counter += 1;
        debug_assert_eq!(self.animal_counter, self.animals.len());

        let persisted = self.save();
        let last = self.animals.len() - 1;
        persisted.map(|()| &self.animals[last])
    }

    /// Creation flow plus add: the presentation layer's `addAnimal(name, species, birthDate)`.
    ///
    /// A `CreationError` leaves the registry untouched.
    pub fn add_new(
        &mut self,
        catalog: &SpeciesCatalog,
        name: &str,
        species: &str,
        birth_date: &str,
        today: NaiveDate,
    ) -> Result<Added<'_>> {
        let NewAnimal {
            animal,
            date_fallback,
        } = catalog.create_animal(name, species, birth_date, today)?;

        let persist_error = self.add_animal(animal).err();
        let animal = &self.animals[self.animals.len() - 1];

        Ok(Added {
            animal,
            date_fallback,
            persist_error,
        })
    }

    /// First animal whose name matches case-insensitively, in current order.
    pub fn find_by_name(&self, name: &str) -> Option<&Animal> {
        self.animals.iter().find(|a| a.has_name(name))
    }

    fn find_by_name_mut(&mut self, name: &str) -> Result<&mut Animal> {
        self.animals
            .iter_mut()
            .find(|a| a.has_name(name))
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Teach `command` to the first animal called `name`, then persist.
    ///
    /// A store failure comes back as `RegistryError::Store`; the command is
    /// still taught in memory.
    pub fn teach_command(&mut self, name: &str, command: &str) -> Result<()> {
        let animal = self.find_by_name_mut(name)?;
        animal.teach(command);
        tracing::info!("Taught '{}' to {}", command, animal.name());

        self.save()?;
        Ok(())
    }

    /// Commands of the first animal called `name`, in teaching order.
    pub fn list_commands(&self, name: &str) -> Result<&[String]> {
        self.find_by_name(name)
            .map(Animal::commands)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// All animals ascending by birth date; equal dates keep insertion order.
    ///
    /// Only the returned view is sorted, the registry order is untouched.
    pub fn sorted_by_birth_date(&self) -> Vec<&Animal> {
        let mut sorted: Vec<&Animal> = self.animals.iter().collect();
        sorted.sort_by_key(|a| a.birth_date());
        sorted
    }

    /// Animals in insertion order
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn count(&self) -> usize {
        self.animal_counter
    }

    pub fn is_empty(&self) -> bool {
        self.animal_counter == 0
    }

    /// Write the full collection to the store.
    ///
    /// If the store could not be parsed at startup, it is first moved to
    /// `<store>.bak` so its content is not overwritten.
    pub fn save(&mut self) -> std::result::Result<(), StoreError> {
        if self.backup_pending {
            if self.store.path().exists() {
                self.store.backup().map_err(|e| {
                    tracing::warn!(
                        "Not saving, unreadable store could not be moved aside: {}",
                        e
                    );
                    e
                })?;
            }
            self.backup_pending = false;
        }

        self.store.save(&self.animals).map_err(|e| {
            tracing::warn!("Failed to persist animals: {}", e);
            e
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
