use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, text};
use cosmic::{Element, theme};

use agenda::core::task::Task;

use crate::fl;
use crate::message::Message;

/// One task card: title, description, stored date text and a delete button.
/// Expired tasks get a warning badge; they stay in the list.
pub fn task_row(task: &Task, expired: bool) -> Element<'static, Message> {
    let mut info = column().spacing(4);
    info = info.push(text::title4(task.title.clone()));
    if !task.description.is_empty() {
        info = info.push(text::body(task.description.clone()));
    }

    let mut when = row()
        .spacing(6)
        .align_y(Alignment::Center)
        .push(text::caption(task.display_text.clone()));
    if expired {
        when = when
            .push(icon::from_name("dialog-warning-symbolic").size(16).icon())
            .push(text::caption(fl!("task-expired")));
    }
    info = info.push(when);

    let delete_btn = button::icon(icon::from_name("edit-delete-symbolic"))
        .on_press(Message::DeleteTask(task.id));

    let body = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(container(info).width(Length::Fill))
        .push(delete_btn);

    let class = if expired {
        theme::Container::Primary
    } else {
        theme::Container::Card
    };

    container(body)
        .padding(12)
        .width(Length::Fill)
        .class(class)
        .into()
}
