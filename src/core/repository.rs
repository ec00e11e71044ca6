use chrono::Locale;
use uuid::Uuid;

use super::clock::Clock;
use super::task::{Task, TaskDraft, ValidationError};
use crate::store::TaskStore;

/// Outcome of the most recent write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PersistStatus {
    #[default]
    Saved,
    Failed(String),
}

/// The in-memory task list, mirrored to a store after every change.
///
/// Writes are best effort: a failed write is logged and recorded in
/// [`PersistStatus`], and the in-memory change stands.
pub struct TaskRepository<S, C> {
    tasks: Vec<Task>,
    store: S,
    clock: C,
    locale: Locale,
    status: PersistStatus,
}

impl<S: TaskStore, C: Clock> TaskRepository<S, C> {
    /// Load the stored list. An unreadable store starts the app empty.
    pub fn load(store: S, clock: C, locale: Locale) -> Self {
        let tasks = match store.read_all() {
            Ok(tasks) => {
                log::info!("Loaded {} tasks", tasks.len());
                tasks
            }
            Err(e) => {
                log::error!("Failed to load tasks, starting empty: {}", e);
                Vec::new()
            }
        };
        Self {
            tasks,
            store,
            clock,
            locale,
            status: PersistStatus::Saved,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub fn persist_status(&self) -> &PersistStatus {
        &self.status
    }

    /// Validate, append and persist. Returns the new task so the caller can
    /// request its reminder; nothing is rolled back if that request fails.
    pub fn add(&mut self, draft: TaskDraft) -> Result<Task, ValidationError> {
        draft.validate(self.clock.now())?;
        let task = Task::from_draft(draft, self.locale);
        log::info!("Adding task {} scheduled for {}", task.id, task.scheduled_at);
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Remove the task with `id`. Unknown ids change nothing and write nothing.
    /// Any reminder already requested for the task still fires.
    pub fn delete(&mut self, id: Uuid) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.remove_at(pos))
    }

    /// Positional delete. An out-of-range index is a no-op.
    pub fn delete_at(&mut self, index: usize) -> Option<Task> {
        if index >= self.tasks.len() {
            log::debug!("Delete index {} out of range ({} tasks)", index, self.tasks.len());
            return None;
        }
        Some(self.remove_at(index))
    }

    /// Whether the task's time has come, judged at this instant.
    pub fn is_expired(&self, task: &Task) -> bool {
        task.is_expired_at(self.clock.now())
    }

    /// Tasks whose reminder has not fired yet.
    pub fn pending_reminders(&self) -> impl Iterator<Item = &Task> {
        let now = self.clock.now();
        self.tasks.iter().filter(move |t| !t.is_expired_at(now))
    }

    fn remove_at(&mut self, index: usize) -> Task {
        let task = self.tasks.remove(index);
        log::info!("Deleted task {}", task.id);
        self.persist();
        task
    }

    fn persist(&mut self) {
        self.status = match self.store.write_all(&self.tasks) {
            Ok(()) => PersistStatus::Saved,
            Err(e) => {
                log::error!("Failed to save tasks: {}", e);
                PersistStatus::Failed(e.to_string())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::task::format_display;
    use crate::store::{FileStore, MemoryStore, TASKS_KEY};
    use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};

    fn start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).single().unwrap()
    }

    fn repo() -> (TaskRepository<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new(start());
        (TaskRepository::load(MemoryStore::new(), clock.clone(), Locale::POSIX), clock)
    }

    fn in_hours(h: i64) -> DateTime<Local> {
        start() + Duration::hours(h)
    }

    fn stored_titles(store: &MemoryStore) -> Vec<String> {
        store.read_all().unwrap().into_iter().map(|t| t.title).collect()
    }

    #[test]
    fn load_empty_store() {
        let (repo, _) = repo();
        assert!(repo.is_empty());
        assert_eq!(repo.store().writes(), 0);
    }

    #[test]
    fn load_malformed_store_starts_empty() {
        let store = MemoryStore::with_entry(TASKS_KEY, "{not json");
        let repo = TaskRepository::load(store, ManualClock::new(start()), Locale::POSIX);
        assert!(repo.is_empty());
    }

    #[test]
    fn blank_titles_are_rejected_without_writing() {
        let (mut repo, _) = repo();
        for title in ["", " ", "\t\n  "] {
            let result = repo.add(TaskDraft::new(title, "desc", in_hours(1)));
            assert_eq!(result, Err(ValidationError::BlankTitle));
        }
        assert!(repo.is_empty());
        assert_eq!(repo.store().writes(), 0);
    }

    #[test]
    fn non_future_times_are_rejected_without_writing() {
        let (mut repo, _) = repo();
        for when in [start(), in_hours(-3)] {
            let result = repo.add(TaskDraft::new("Late", "", when));
            assert_eq!(result, Err(ValidationError::NotInFuture(when)));
        }
        assert!(repo.is_empty());
        assert_eq!(repo.store().writes(), 0);
    }

    #[test]
    fn add_appends_and_persists_full_list() {
        let (mut repo, _) = repo();
        repo.add(TaskDraft::new("First", "", in_hours(2))).unwrap();
        let second = repo.add(TaskDraft::new("Second", "b", in_hours(1))).unwrap();
        let dup = repo.add(TaskDraft::new("Second", "b", in_hours(1))).unwrap();

        assert_eq!(repo.len(), 3);
        assert_eq!(repo.tasks().last(), Some(&dup));
        assert_ne!(second.id, dup.id);
        assert_eq!(repo.store().writes(), 3);
        assert_eq!(stored_titles(repo.store()), vec!["First", "Second", "Second"]);
        assert_eq!(repo.persist_status(), &PersistStatus::Saved);
    }

    #[test]
    fn failed_write_keeps_in_memory_change() {
        let (mut repo, _) = repo();
        repo.store().set_fail_writes(true);
        let task = repo.add(TaskDraft::new("Offline", "", in_hours(1))).unwrap();

        assert_eq!(repo.tasks(), &[task]);
        assert!(matches!(repo.persist_status(), PersistStatus::Failed(_)));

        repo.store().set_fail_writes(false);
        repo.add(TaskDraft::new("Online", "", in_hours(2))).unwrap();
        assert_eq!(repo.persist_status(), &PersistStatus::Saved);
        assert_eq!(stored_titles(repo.store()), vec!["Offline", "Online"]);
    }

    #[test]
    fn delete_at_removes_only_that_index() {
        let (mut repo, _) = repo();
        for title in ["a", "b", "c", "d"] {
            repo.add(TaskDraft::new(title, "", in_hours(1))).unwrap();
        }
        let removed = repo.delete_at(1).unwrap();
        assert_eq!(removed.title, "b");
        let titles: Vec<&str> = repo.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c", "d"]);
        assert_eq!(stored_titles(repo.store()), vec!["a", "c", "d"]);
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let (mut repo, _) = repo();
        repo.add(TaskDraft::new("only", "", in_hours(1))).unwrap();
        let writes = repo.store().writes();

        assert_eq!(repo.delete_at(1), None);
        assert_eq!(repo.delete_at(usize::MAX), None);
        assert_eq!(repo.delete(Uuid::new_v4()), None);
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.store().writes(), writes);
    }

    #[test]
    fn delete_by_id_survives_reordering_of_duplicates() {
        let (mut repo, _) = repo();
        let first = repo.add(TaskDraft::new("Same", "", in_hours(1))).unwrap();
        let second = repo.add(TaskDraft::new("Same", "", in_hours(1))).unwrap();

        assert_eq!(repo.delete(second.id), Some(second));
        assert_eq!(repo.tasks(), &[first]);
    }

    #[test]
    fn expiry_follows_the_clock() {
        let (mut repo, clock) = repo();
        let task = repo.add(TaskDraft::new("Soon", "", in_hours(1))).unwrap();
        assert!(!repo.is_expired(&task));
        assert_eq!(repo.pending_reminders().count(), 1);

        clock.advance(Duration::hours(1));
        assert!(repo.is_expired(&task));
        assert_eq!(repo.pending_reminders().count(), 0);

        clock.set(start());
        assert!(!repo.is_expired(&task));
    }

    #[test]
    fn pay_rent_scenario() {
        let (mut repo, clock) = repo();
        let tomorrow_nine = Local
            .from_local_datetime(&NaiveDate::from_ymd_opt(2026, 4, 2).unwrap().and_hms_opt(9, 0, 0).unwrap())
            .single()
            .unwrap();

        let task = repo.add(TaskDraft::new("Pay rent", "", tomorrow_nine)).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(task.display_text, format_display(&tomorrow_nine, Locale::POSIX));
        assert!(!repo.is_expired(&repo.tasks()[0]));

        clock.set(tomorrow_nine + Duration::minutes(1));
        assert!(repo.is_expired(&repo.tasks()[0]));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn two_tasks_delete_first_scenario() {
        let (mut repo, _) = repo();
        repo.add(TaskDraft::new("Buy milk", "", in_hours(1))).unwrap();
        let second = repo.add(TaskDraft::new("Call bank", "before 5", in_hours(2))).unwrap();

        repo.delete_at(0);

        assert_eq!(repo.tasks(), &[second.clone()]);
        let blob = repo.store().raw(TASKS_KEY).unwrap();
        let stored: Vec<serde_json::Value> = serde_json::from_str(&blob).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["title"], "Call bank");
    }

    #[test]
    fn reload_from_disk_matches_persisted_list() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(start());
        let mut repo = TaskRepository::load(FileStore::new(dir.path()), clock.clone(), Locale::POSIX);
        repo.add(TaskDraft::new("Water plants", "balcony", in_hours(5))).unwrap();
        repo.add(TaskDraft::new("Stretch", "", in_hours(6))).unwrap();
        let expected = repo.tasks().to_vec();

        let reloaded = TaskRepository::load(FileStore::new(dir.path()), clock, Locale::es_ES);
        assert_eq!(reloaded.tasks(), expected.as_slice());
        // Display text is stored, not re-rendered in the new locale.
        assert_eq!(reloaded.tasks()[0].display_text, expected[0].display_text);
    }
}
