// 💾 Backing Store - JSON file holding the whole collection
//
// Load once at startup, rewrite everything after each mutation.
// Writes go to a sibling temp file that is synced and renamed over the
// target, so a crash mid-write leaves the previous content intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::entities::Animal;
use crate::error::StoreError;

/// File-backed JSON store: a top-level array of animal objects.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored collection, preserving order.
    pub fn load(&self) -> Result<Vec<Animal>, StoreError> {
        let file = File::open(&self.path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StoreError::Missing(self.path.clone()),
            _ => StoreError::Read {
                path: self.path.clone(),
                source,
            },
        })?;

        let animals: Vec<Animal> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                if source.is_io() {
                    StoreError::Read {
                        path: self.path.clone(),
                        source: source.into(),
                    }
                } else {
                    StoreError::Parse {
                        path: self.path.clone(),
                        source,
                    }
                }
            })?;

        if let Some(idx) = animals.iter().position(|a| a.name().trim().is_empty()) {
            return Err(StoreError::Invalid {
                path: self.path.clone(),
                reason: format!("record {} has an empty name", idx),
            });
        }

        tracing::debug!(
            "Loaded {} animals from {}",
            animals.len(),
            self.path.display()
        );
        Ok(animals)
    }

    /// Replace the stored collection with `animals`.
    pub fn save(&self, animals: &[Animal]) -> Result<(), StoreError> {
        let tmp_path = self.tmp_path();

        self.write_tmp(&tmp_path, animals).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            self.write_error(source)
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            self.write_error(source)
        })?;

        tracing::debug!("Saved {} animals to {}", animals.len(), self.path.display());
        Ok(())
    }

    /// Move the current store file aside to `<store>.bak`, replacing any
    /// older backup.
    pub fn backup(&self) -> Result<PathBuf, StoreError> {
        let backup_path = self.sibling_path(".bak");
        fs::rename(&self.path, &backup_path).map_err(|source| self.write_error(source))?;

        tracing::info!(
            "Moved {} aside to {}",
            self.path.display(),
            backup_path.display()
        );
        Ok(backup_path)
    }

    fn write_tmp(&self, tmp_path: &Path, animals: &[Animal]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(tmp_path)?);
        serde_json::to_writer_pretty(&mut writer, animals)?;
        writer.write_all(b"\n")?;

        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }

    fn tmp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn animal(name: &str, species: &str, ymd: (i32, u32, u32), commands: &[&str]) -> Animal {
        let date = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap();
        let mut animal = Animal::new(name, species, date);
        for command in commands {
            animal.teach(*command);
        }
        animal
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("animals.json"));

        let animals = vec![
            animal("Rex", "dog", (2020, 1, 1), &["sit", "stay"]),
            animal("Milo", "cat", (2019, 5, 5), &[]),
            animal("rex", "hamster", (2021, 3, 9), &["roll", "roll"]),
        ];

        store.save(&animals).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, animals);
    }

    #[test]
    fn test_round_trip_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("animals.json"));

        store.save(&[]).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("absent.json"));

        assert!(matches!(store.load(), Err(StoreError::Missing(_))));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animals.json");
        fs::write(&path, "[{\"name\": \"Rex\",").unwrap();

        let store = JsonStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_empty_name_record_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animals.json");
        fs::write(
            &path,
            r#"[
                {"name": "Rex", "type": "dog", "birthDate": "2020-01-01", "commands": []},
                {"name": "  ", "type": "dog", "birthDate": "2020-01-01", "commands": []}
            ]"#,
        )
        .unwrap();

        match JsonStore::new(&path).load() {
            Err(StoreError::Invalid { reason, .. }) => assert!(reason.contains("record 1")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_backup_moves_file_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animals.json");
        fs::write(&path, "garbage").unwrap();

        let backup = JsonStore::new(&path).backup().unwrap();

        assert_eq!(backup, dir.path().join("animals.json.bak"));
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(&backup).unwrap(), "garbage");
    }

    #[test]
    fn test_reads_hand_written_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animals.json");
        fs::write(
            &path,
            r#"[
                {"name": "Rex", "type": "dog", "birthDate": "2020-01-01", "commands": ["sit"]},
                {"name": "Milo", "type": "cat", "birthDate": "2019-05-05", "commands": []}
            ]"#,
        )
        .unwrap();

        let loaded = JsonStore::new(&path).load().unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].commands(), ["sit"]);
        assert_eq!(loaded[1].name(), "Milo");
    }

    #[test]
    fn test_save_overwrites_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animals.json");
        let store = JsonStore::new(&path);

        store
            .save(&[animal("Rex", "dog", (2020, 1, 1), &[])])
            .unwrap();
        store
            .save(&[animal("Milo", "cat", (2019, 5, 5), &[])])
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name(), "Milo");
        assert!(!dir.path().join("animals.json.tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested/deeper/animals.json"));

        store.save(&[]).unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn test_save_failure_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // Parent "directory" is a regular file
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = JsonStore::new(blocker.join("animals.json"));

        assert!(matches!(store.save(&[]), Err(StoreError::Write { .. })));
    }
}
