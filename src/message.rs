use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hour,
    Minute,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Create form
    OpenNewTaskForm,
    CloseNewTaskForm,
    FormTitle(String),
    FormDescription(String),
    SaveTask,

    // Date step
    OpenDatePicker,
    DatePrevMonth,
    DateNextMonth,
    DateSelectDay(NaiveDate),
    ConfirmDate,
    /// The date dialog has been taken off screen; the time dialog may open.
    DatePickerDismissed,

    // Time step
    AdjustTime(TimeField, i32),
    ConfirmTime,

    /// Close whichever picker is open without applying it.
    CancelPicker,
    DismissNotice,

    // Task list
    DeleteTask(Uuid),

    // Reminders
    ReminderDelivered(Uuid, Result<u32, String>),

    // Theme
    ToggleTheme,

    /// Periodic redraw so expired tasks change style while the window is open.
    Tick,
}
