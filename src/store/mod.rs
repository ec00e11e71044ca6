pub mod kv;
pub mod memory;

use crate::core::task::Task;

pub use kv::FileStore;
pub use memory::MemoryStore;

/// Key the task list is stored under.
pub const TASKS_KEY: &str = "tasks";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored tasks are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

/// A persistent string-to-string map.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Whole-list persistence for tasks. There is no partial update and no schema version.
pub trait TaskStore {
    /// Read the stored list. An absent entry is an empty list.
    fn read_all(&self) -> Result<Vec<Task>, StoreError>;
    /// Replace the stored list.
    fn write_all(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> TaskStore for S {
    fn read_all(&self) -> Result<Vec<Task>, StoreError> {
        match self.get(TASKS_KEY)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_all(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let blob = serde_json::to_string(tasks)?;
        self.set(TASKS_KEY, &blob)
    }
}
