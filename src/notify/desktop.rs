use std::collections::HashMap;

use zbus::zvariant::Value;

use super::{Notifier, NotifyError, Reminder};

const ICON: &str = "alarm-symbolic";

/// Shows reminders through the freedesktop notification service on the session bus.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
    desktop_entry: String,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>, desktop_entry: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            desktop_entry: desktop_entry.into(),
        }
    }
}

impl Notifier for DesktopNotifier {
    async fn notify(&self, reminder: &Reminder) -> Result<u32, NotifyError> {
        let connection = zbus::Connection::session().await?;
        let proxy: zbus::Proxy = zbus::proxy::Builder::new(&connection)
            .interface("org.freedesktop.Notifications")?
            .path("/org/freedesktop/Notifications")?
            .destination("org.freedesktop.Notifications")?
            .build()
            .await?;

        let mut hints: HashMap<&str, Value<'_>> = HashMap::new();
        hints.insert("desktop-entry", Value::from(self.desktop_entry.as_str()));

        let actions: Vec<&str> = Vec::new();
        // replaces_id 0 asks for a new notification; expire_timeout -1 leaves it to the server.
        let id: u32 = proxy
            .call(
                "Notify",
                &(
                    self.app_name.as_str(),
                    0u32,
                    ICON,
                    reminder.title.as_str(),
                    reminder.body.as_str(),
                    actions,
                    hints,
                    -1i32,
                ),
            )
            .await?;

        if id == 0 {
            return Err(NotifyError::Rejected(format!(
                "server returned no id for task {}",
                reminder.task_id
            )));
        }
        Ok(id)
    }
}
