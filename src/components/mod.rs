pub mod date_picker;
pub mod task_row;
pub mod time_picker;
