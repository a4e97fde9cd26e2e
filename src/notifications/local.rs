use std::sync::Arc;

use async_trait::async_trait;
use bon::Builder;
use chrono::Local;
use tokio::{sync::Mutex, task::JoinHandle, time::sleep};

use crate::{
    notifications::{Alert, DailyTrigger, Defaults, Notifications, Permission, Sink},
    prelude::*,
};

/// In-process notification backend.
///
/// Recurring alerts are background tasks living as long as the process does.
#[derive(Builder)]
pub struct LocalNotifications {
    #[builder(into)]
    sink: Arc<Sink>,

    /// Deny the permission when prompted.
    #[builder(default)]
    muted: bool,

    #[builder(skip)]
    permission: Mutex<Permission>,

    #[builder(skip)]
    defaults: Mutex<Option<Defaults>>,

    #[builder(skip)]
    reminders: Mutex<Vec<JoinHandle<()>>>,
}

impl LocalNotifications {
    async fn ensure_deliverable(&self) -> Result<Defaults> {
        ensure!(
            *self.permission.lock().await == Permission::Granted,
            "the notification permission is not granted",
        );
        (*self.defaults.lock().await).context("the notification defaults are not configured")
    }
}

#[async_trait]
impl Notifications for LocalNotifications {
    async fn get_permission(&self) -> Result<Permission> {
        Ok(*self.permission.lock().await)
    }

    #[instrument(skip_all)]
    async fn request_permission(&self) -> Result<Permission> {
        let mut permission = self.permission.lock().await;
        *permission = if self.muted { Permission::Denied } else { Permission::Granted };
        info!(?permission, "prompted");
        Ok(*permission)
    }

    async fn configure_defaults(&self, defaults: &Defaults) -> Result {
        let previous = self.defaults.lock().await.replace(*defaults);
        if previous.is_none() {
            debug!(
                channel.id = defaults.channel.id,
                channel.name = defaults.channel.name,
                channel.importance = ?defaults.channel.importance,
                "configured",
            );
        }
        Ok(())
    }

    async fn send_now(&self, alert: Alert) -> Result {
        let defaults = self.ensure_deliverable().await?;
        self.sink.deliver(&alert, &defaults).await
    }

    #[instrument(skip_all, fields(hour = trigger.hour, minute = trigger.minute))]
    async fn schedule_recurring(&self, alert: Alert, trigger: DailyTrigger) -> Result {
        let defaults = self.ensure_deliverable().await?;
        let sink = Arc::clone(&self.sink);
        let reminder = tokio::spawn(async move {
            loop {
                let now = Local::now();
                let Some(next) = trigger.next_after(&now) else {
                    error!(?trigger, "the trigger never fires");
                    return;
                };
                info!(%next, "next reminder");
                sleep((next - now).to_std().unwrap_or_default()).await;
                if let Err(error) = sink.deliver(&alert, &defaults).await {
                    warn!("failed to deliver the reminder: {error:#}");
                }
            }
        });
        self.reminders.lock().await.push(reminder);
        Ok(())
    }

    async fn cancel_all(&self) -> Result {
        let mut reminders = self.reminders.lock().await;
        for reminder in reminders.drain(..) {
            reminder.abort();
        }
        info!("cancelled all pending alerts");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::notifications::{Channel, Importance, Presentation};

    const DEFAULTS: Defaults = Defaults {
        presentation: Presentation { show_banner: true, play_sound: true, set_badge: false },
        channel: Channel { id: "default", name: "Default", importance: Importance::Max },
    };

    fn alert() -> Alert {
        Alert { title: "Title".to_owned(), body: "Body".to_owned(), data: json!({}) }
    }

    #[tokio::test]
    async fn permission_is_undetermined_until_prompted() -> Result {
        let notifications = LocalNotifications::builder().sink(Sink::Log).build();
        assert_eq!(notifications.get_permission().await?, Permission::Undetermined);
        assert_eq!(notifications.request_permission().await?, Permission::Granted);
        assert_eq!(notifications.get_permission().await?, Permission::Granted);
        Ok(())
    }

    #[tokio::test]
    async fn muted_denies() -> Result {
        let notifications = LocalNotifications::builder().sink(Sink::Log).muted(true).build();
        assert_eq!(notifications.request_permission().await?, Permission::Denied);
        notifications.configure_defaults(&DEFAULTS).await?;
        assert!(notifications.send_now(alert()).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn send_requires_defaults() -> Result {
        let notifications = LocalNotifications::builder().sink(Sink::Log).build();
        notifications.request_permission().await?;
        assert!(notifications.send_now(alert()).await.is_err());
        notifications.configure_defaults(&DEFAULTS).await?;
        notifications.configure_defaults(&DEFAULTS).await?;
        notifications.send_now(alert()).await?;
        Ok(())
    }

    #[tokio::test]
    async fn cancel_all_aborts_reminders() -> Result {
        let notifications = LocalNotifications::builder().sink(Sink::Log).build();
        notifications.request_permission().await?;
        notifications.configure_defaults(&DEFAULTS).await?;
        notifications.schedule_recurring(alert(), DailyTrigger::NOON).await?;
        notifications.schedule_recurring(alert(), DailyTrigger::NOON).await?;
        assert_eq!(notifications.reminders.lock().await.len(), 2);
        notifications.cancel_all().await?;
        assert!(notifications.reminders.lock().await.is_empty());
        Ok(())
    }
}
