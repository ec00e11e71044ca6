use std::time::Duration;

use chrono::{Local, Locale};

use cosmic::app::{Core, Task as CosmicTask, context_drawer};
use cosmic::iced::{Length, Subscription};
use cosmic::widget::{button, column, container, dialog, icon, row, scrollable, text, text_input};
use cosmic::{Application, Element, executor};

use agenda::config::{APP_ID, AgendaConfig};
use agenda::core::clock::SystemClock;
use agenda::core::composer::DateTimeComposer;
use agenda::core::repository::TaskRepository;
use agenda::core::task::{TaskDraft, ValidationError, format_display};
use agenda::notify::{DesktopNotifier, Notifier, Reminder, ReminderQueue, ReminderText};
use agenda::store::FileStore;

use crate::components::date_picker::{DatePickerState, date_picker};
use crate::components::time_picker::{TimePickerState, time_picker};
use crate::fl;
use crate::message::Message;
use crate::pages;

pub type Repository = TaskRepository<FileStore, SystemClock>;

/// How often due reminders are checked and the list redrawn so expiry shows
/// up without user input.
const TICK: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextDrawerState {
    NewTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    Normal,
    /// Start with the new-task form open.
    Capture,
}

#[derive(Debug, Default)]
pub struct NewTaskForm {
    pub title: String,
    pub description: String,
}

/// The single modal slot. Only one dialog is ever on screen.
#[derive(Debug, Clone)]
pub enum DialogState {
    Date(DatePickerState),
    Time(TimePickerState),
    Notice(String),
}

pub struct Agenda {
    core: Core,
    config: AgendaConfig,
    cosmic_config: cosmic::cosmic_config::Config,
    locale: Locale,

    repository: Repository,
    composer: DateTimeComposer,
    reminders: ReminderQueue,
    reminder_text: ReminderText,

    context_drawer_state: Option<ContextDrawerState>,
    new_task_form: NewTaskForm,
    dialog: Option<DialogState>,
}

pub struct Flags {
    pub config: AgendaConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
    pub launch_mode: LaunchMode,
}

impl Application for Agenda {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(mut core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let config = flags.config;

        if let Err(e) = config.ensure_dirs() {
            log::error!("Failed to create storage directory: {}", e);
        }

        let locale = config.locale();
        let store = FileStore::new(config.storage_directory.clone());
        let repository = TaskRepository::load(store, SystemClock, locale);

        // Reminders live in this process only, so re-arm the ones still ahead.
        let reminder_text = ReminderText {
            title_prefix: format!("{} ", fl!("reminder-prefix")),
            default_body: fl!("reminder-default-body"),
        };
        let mut reminders = ReminderQueue::default();
        for task in repository.pending_reminders() {
            reminders.schedule(Reminder::for_task(task, &reminder_text));
        }
        if !reminders.is_empty() {
            log::info!("Re-armed {} reminders", reminders.len());
        }

        let context_drawer_state = match flags.launch_mode {
            LaunchMode::Capture => {
                core.window.show_context = true;
                Some(ContextDrawerState::NewTask)
            }
            LaunchMode::Normal => None,
        };

        let app = Self {
            core,
            config,
            cosmic_config: flags.cosmic_config,
            locale,
            repository,
            composer: DateTimeComposer::default(),
            reminders,
            reminder_text,
            context_drawer_state,
            new_task_form: NewTaskForm::default(),
            dialog: None,
        };

        (app, CosmicTask::none())
    }

    fn header_center(&self) -> Vec<Element<'_, Message>> {
        vec![text::title4(fl!("app-title")).into()]
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        let theme_label = if self.config.dark_mode {
            fl!("theme-light")
        } else {
            fl!("theme-dark")
        };

        let header_row = row()
            .spacing(4)
            .push(
                button::icon(icon::from_name("list-add-symbolic"))
                    .on_press(Message::OpenNewTaskForm),
            )
            .push(button::standard(theme_label).on_press(Message::ToggleTheme));

        vec![header_row.into()]
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            Message::OpenNewTaskForm => {
                self.new_task_form = NewTaskForm::default();
                self.composer.reset();
                self.context_drawer_state = Some(ContextDrawerState::NewTask);
                self.core.window.show_context = true;
            }

            Message::CloseNewTaskForm => {
                self.close_drawer();
            }

            Message::FormTitle(value) => {
                self.new_task_form.title = value;
            }

            Message::FormDescription(value) => {
                self.new_task_form.description = value;
            }

            Message::SaveTask => {
                let draft = TaskDraft::new(
                    self.new_task_form.title.clone(),
                    self.new_task_form.description.clone(),
                    self.composer.value(Local::now()),
                );
                match self.repository.add(draft) {
                    Ok(task) => {
                        self.new_task_form = NewTaskForm::default();
                        self.composer.reset();
                        self.close_drawer();
                        self.reminders.schedule(Reminder::for_task(&task, &self.reminder_text));
                        return self.deliver_due_reminders();
                    }
                    Err(ValidationError::BlankTitle) => {
                        log::debug!("Ignoring save with blank title");
                    }
                    Err(e @ ValidationError::NotInFuture(_)) => {
                        log::info!("Rejected task: {}", e);
                        self.dialog = Some(DialogState::Notice(fl!("must-be-future")));
                    }
                }
            }

            Message::OpenDatePicker => {
                let seed = self.composer.begin_date(Local::now());
                self.dialog = Some(DialogState::Date(DatePickerState::new(seed.date_naive())));
            }

            Message::DatePrevMonth => {
                if let Some(DialogState::Date(ref mut state)) = self.dialog {
                    state.prev_month();
                }
            }

            Message::DateNextMonth => {
                if let Some(DialogState::Date(ref mut state)) = self.dialog {
                    state.next_month();
                }
            }

            Message::DateSelectDay(date) => {
                if let Some(DialogState::Date(ref mut state)) = self.dialog {
                    state.select_day(date);
                }
            }

            Message::ConfirmDate => {
                if let Some(DialogState::Date(state)) = self.dialog.take() {
                    self.composer.confirm_date(state.selected, Local::now());
                    // Open the time step only once the date dialog is off screen.
                    return CosmicTask::perform(async {}, |_| {
                        cosmic::Action::App(Message::DatePickerDismissed)
                    });
                }
            }

            Message::DatePickerDismissed => {
                if let Some(seed) = self.composer.date_dismissed(Local::now()) {
                    self.dialog = Some(DialogState::Time(TimePickerState::new(seed.time())));
                }
            }

            Message::AdjustTime(field, delta) => {
                if let Some(DialogState::Time(ref mut state)) = self.dialog {
                    state.adjust(field, delta);
                }
            }

            Message::ConfirmTime => {
                if let Some(DialogState::Time(state)) = self.dialog.take() {
                    self.composer.confirm_time(state.time(), Local::now());
                }
            }

            Message::CancelPicker => {
                self.composer.cancel();
                self.dialog = None;
            }

            Message::DismissNotice => {
                self.dialog = None;
            }

            Message::DeleteTask(id) => {
                if self.repository.delete(id).is_none() {
                    log::warn!("Delete requested for unknown task {}", id);
                }
            }

            Message::ReminderDelivered(id, result) => match result {
                Ok(notification_id) => {
                    log::debug!("Reminder for task {} shown as notification {}", id, notification_id);
                }
                Err(e) => {
                    log::error!("Failed to show reminder for task {}: {}", id, e);
                }
            },

            Message::ToggleTheme => {
                self.config.dark_mode = !self.config.dark_mode;
                self.save_config();
                return cosmic::command::set_theme(theme_for(self.config.dark_mode));
            }

            Message::Tick => {
                return self.deliver_due_reminders();
            }
        }

        CosmicTask::none()
    }

    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Message>> {
        let drawer_state = self.context_drawer_state?;

        match drawer_state {
            ContextDrawerState::NewTask => Some(
                context_drawer::context_drawer(
                    container(scrollable(self.new_task_form_view().padding(16)))
                        .width(Length::Fill),
                    Message::CloseNewTaskForm,
                )
                .title(fl!("new-task")),
            ),
        }
    }

    fn dialog(&self) -> Option<Element<'_, Message>> {
        let today = Local::now().date_naive();
        let widget = match self.dialog.as_ref()? {
            DialogState::Date(state) => dialog()
                .title(fl!("pick-date"))
                .control(date_picker(state, today))
                .primary_action(button::suggested(fl!("ok")).on_press(Message::ConfirmDate))
                .secondary_action(button::standard(fl!("cancel")).on_press(Message::CancelPicker)),
            DialogState::Time(state) => dialog()
                .title(fl!("pick-time"))
                .control(time_picker(state))
                .primary_action(button::suggested(fl!("ok")).on_press(Message::ConfirmTime))
                .secondary_action(button::standard(fl!("cancel")).on_press(Message::CancelPicker)),
            DialogState::Notice(notice) => dialog()
                .title(fl!("app-title"))
                .body(notice.clone())
                .primary_action(button::suggested(fl!("ok")).on_press(Message::DismissNotice)),
        };
        Some(widget.into())
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        match self.dialog.take() {
            Some(DialogState::Notice(_)) => {}
            Some(_) => self.composer.cancel(),
            None => self.close_drawer(),
        }
        CosmicTask::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keys = cosmic::iced::event::listen_with(|event, _status, _id| match event {
            cosmic::iced::Event::Keyboard(cosmic::iced::keyboard::Event::KeyPressed {
                key: cosmic::iced::keyboard::Key::Character(ref c),
                modifiers,
                ..
            }) if c.as_str() == "n" && modifiers.control() => Some(Message::OpenNewTaskForm),
            _ => None,
        });
        let tick = cosmic::iced::time::every(TICK).map(|_| Message::Tick);

        Subscription::batch([keys, tick])
    }

    fn view(&self) -> Element<'_, Message> {
        pages::task_list::task_list_view(&self.repository)
    }
}

impl Agenda {
    fn new_task_form_view(&self) -> column::Column<'_, Message> {
        let form = &self.new_task_form;
        let mut content = column().spacing(16);

        content = content.push(text::title4(fl!("task-title")));
        content = content.push(
            text_input::text_input(fl!("task-title-placeholder"), &form.title)
                .on_input(Message::FormTitle)
                .on_submit(|_| Message::SaveTask)
                .width(Length::Fill),
        );

        content = content.push(text::title4(fl!("task-description")));
        content = content.push(
            text_input::text_input(fl!("task-description-placeholder"), &form.description)
                .on_input(Message::FormDescription)
                .width(Length::Fill),
        );

        content = content.push(text::title4(fl!("task-when")));
        let composed = self.composer.value(Local::now());
        content = content.push(text::body(format_display(&composed, self.locale)));
        content = content.push(
            button::standard(fl!("pick-date-time"))
                .on_press(Message::OpenDatePicker)
                .width(Length::Fill),
        );

        content = content.push(
            button::suggested(fl!("save-task"))
                .on_press(Message::SaveTask)
                .width(Length::Fill),
        );
        content = content.push(
            button::standard(fl!("back"))
                .on_press(Message::CloseNewTaskForm)
                .width(Length::Fill),
        );

        content
    }

    /// Compare queued reminders against the wall clock and show the due ones.
    fn deliver_due_reminders(&mut self) -> CosmicTask<Message> {
        let due = self.reminders.take_due(Local::now());
        if due.is_empty() {
            return CosmicTask::none();
        }
        CosmicTask::batch(due.into_iter().map(deliver_reminder))
    }

    fn close_drawer(&mut self) {
        self.context_drawer_state = None;
        self.core.window.show_context = false;
    }

    fn save_config(&self) {
        use cosmic::cosmic_config::CosmicConfigEntry;
        if let Err(e) = self.config.write_entry(&self.cosmic_config) {
            log::error!("Failed to save config: {:?}", e);
        }
    }
}

pub fn theme_for(dark_mode: bool) -> cosmic::Theme {
    if dark_mode {
        cosmic::Theme::dark()
    } else {
        cosmic::Theme::light()
    }
}

/// Show one reminder now. Delivery failures come back as a message and are
/// only logged; the task stays listed either way.
fn deliver_reminder(reminder: Reminder) -> CosmicTask<Message> {
    let id = reminder.task_id;
    let notifier = DesktopNotifier::new(fl!("app-title"), APP_ID);
    CosmicTask::perform(
        async move { notifier.notify(&reminder).await.map_err(|e| e.to_string()) },
        move |result| cosmic::Action::App(Message::ReminderDelivered(id, result)),
    )
}
