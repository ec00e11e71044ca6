use cosmic::iced::Length;
use cosmic::widget::{column, container, scrollable, text};
use cosmic::Element;

use agenda::core::repository::PersistStatus;

use crate::application::Repository;
use crate::components::task_row::task_row;
use crate::fl;
use crate::message::Message;

/// All tasks in insertion order, expiry judged at render time.
pub fn task_list_view<'a>(repository: &Repository) -> Element<'a, Message> {
    let mut content = column().spacing(8);

    if let PersistStatus::Failed(_) = repository.persist_status() {
        content = content.push(text::caption(fl!("save-failed")));
    }

    if repository.is_empty() {
        content = content.push(
            container(text::body(fl!("tasks-empty")))
                .padding(32)
                .center_x(Length::Fill)
                .width(Length::Fill),
        );
    } else {
        for task in repository.tasks() {
            content = content.push(task_row(task, repository.is_expired(task)));
        }
    }

    container(scrollable(content.padding(16).width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
