use std::path::{Path, PathBuf};

use super::{KeyValueStore, StoreError};

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        // Write beside the target and rename so a crash never leaves half a list.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::task::{Task, TaskDraft};
    use crate::store::{TASKS_KEY, TaskStore};
    use chrono::{Local, Locale, TimeZone};

    fn sample(title: &str, description: &str, hour: u32) -> Task {
        let when = Local.with_ymd_and_hms(2027, 1, 20, hour, 15, 0).single().unwrap();
        Task::from_draft(TaskDraft::new(title, description, when), Locale::POSIX)
    }

    #[test]
    fn missing_key_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get(TASKS_KEY).unwrap(), None);
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn round_trip_through_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = vec![sample("Dentist", "bring card", 8), sample("Dentist", "", 8), sample("Gym", "", 19)];

        FileStore::new(dir.path()).write_all(&tasks).unwrap();
        let reloaded = FileStore::new(dir.path()).read_all().unwrap();

        assert_eq!(reloaded, tasks);
        assert_eq!(reloaded[2].scheduled_at, tasks[2].scheduled_at);
        assert!(dir.path().join("tasks.json").exists());
        assert!(!dir.path().join("tasks.json.tmp").exists());
    }

    #[test]
    fn write_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.write_all(&[sample("One", "", 9), sample("Two", "", 10)]).unwrap();
        store.write_all(&[sample("Three", "", 11)]).unwrap();
        let titles: Vec<String> = store.read_all().unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Three"]);
    }

    #[test]
    fn malformed_blob_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tasks.json"), "[{\"title\": ").unwrap();
        let err = FileStore::new(dir.path()).read_all().unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn rejects_path_like_keys() {
        let store = FileStore::new("/tmp");
        assert!(matches!(store.path_for("../etc"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.path_for(""), Err(StoreError::InvalidKey(_))));
        assert!(store.path_for("tasks").is_ok());
    }
}
