pub mod desktop;

use std::collections::HashSet;
use std::future::Future;

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::core::task::Task;

pub use desktop::DesktopNotifier;

/// Wording used to turn a task into a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderText {
    /// Prepended to the task title, separator included.
    pub title_prefix: String,
    /// Body used when the task has no description.
    pub default_body: String,
}

impl Default for ReminderText {
    fn default() -> Self {
        Self {
            title_prefix: "Reminder: ".to_string(),
            default_body: "Don't forget your task!".to_string(),
        }
    }
}

/// A one-shot alert for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub task_id: Uuid,
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Local>,
}

impl Reminder {
    pub fn for_task(task: &Task, text: &ReminderText) -> Self {
        let body = if task.description.trim().is_empty() {
            text.default_body.clone()
        } else {
            task.description.clone()
        };
        Self {
            task_id: task.id,
            title: format!("{}{}", text.title_prefix, task.title),
            body,
            fire_at: task.scheduled_at,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("D-Bus call failed: {0}")]
    Bus(#[from] zbus::Error),
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Something that can put a reminder in front of the user right now.
pub trait Notifier: Send + Sync {
    /// Show the reminder. Returns the id the notification server assigned.
    fn notify(&self, reminder: &Reminder) -> impl Future<Output = Result<u32, NotifyError>> + Send;
}

/// Reminders waiting for their time, checked against the wall clock on a
/// periodic tick. The tick may be delayed (suspend, busy loop); a late check
/// still picks up everything that fell due in between.
#[derive(Debug, Default)]
pub struct ReminderQueue {
    pending: Vec<Reminder>,
    fired: HashSet<Uuid>,
}

impl ReminderQueue {
    /// Queue a reminder. A task already queued or already fired is ignored.
    pub fn schedule(&mut self, reminder: Reminder) -> bool {
        if self.fired.contains(&reminder.task_id)
            || self.pending.iter().any(|r| r.task_id == reminder.task_id)
        {
            log::debug!("Reminder for task {} already scheduled", reminder.task_id);
            return false;
        }
        log::debug!("Reminder for task {} due at {}", reminder.task_id, reminder.fire_at);
        self.pending.push(reminder);
        true
    }

    /// Remove and return every reminder due at `now`, marking each as fired.
    pub fn take_due(&mut self, now: DateTime<Local>) -> Vec<Reminder> {
        let (due, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|r| r.fire_at <= now);
        self.pending = later;
        for reminder in &due {
            log::info!("Reminder for task {} is due", reminder.task_id);
            self.fired.insert(reminder.task_id);
        }
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
