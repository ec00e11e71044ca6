use chrono::{DateTime, Local, Locale};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pattern for the stored date text: the locale's date followed by its time.
pub const DISPLAY_PATTERN: &str = "%x %X";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("task title is blank")]
    BlankTitle,
    #[error("scheduled time {0} is not in the future")]
    NotInFuture(DateTime<Local>),
}

/// User input for a new task, before validation.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub scheduled_at: DateTime<Local>,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        scheduled_at: DateTime<Local>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            scheduled_at,
        }
    }

    /// Check the draft against `now`: a non-blank title and a strictly future time.
    pub fn validate(&self, now: DateTime<Local>) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        if self.scheduled_at <= now {
            return Err(ValidationError::NotInFuture(self.scheduled_at));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Older stores have no ids; those tasks get a fresh one on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "dateTime")]
    pub display_text: String,
    #[serde(rename = "dateObj")]
    pub scheduled_at: DateTime<Local>,
}

impl Task {
    /// Build a task from a draft. `display_text` is rendered once here and never recomputed.
    pub fn from_draft(draft: TaskDraft, locale: Locale) -> Self {
        let display_text = format_display(&draft.scheduled_at, locale);
        Self {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            description: draft.description,
            display_text,
            scheduled_at: draft.scheduled_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Local>) -> bool {
        self.scheduled_at <= now
    }
}

pub fn format_display(instant: &DateTime<Local>, locale: Locale) -> String {
    instant.format_localized(DISPLAY_PATTERN, locale).to_string()
}
