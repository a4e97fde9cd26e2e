use std::sync::Arc;

use serde_json::json;

use crate::{
    monitor::NotifyFailed,
    notifications::{
        Alert,
        Channel,
        DailyTrigger,
        Defaults,
        Importance,
        Notifications,
        Permission,
        Presentation,
    },
    prelude::*,
    quantity::price::CentsPerKilowattHour,
};

/// Alerting policy on top of the notification capability.
///
/// Delivery failures are logged and swallowed: a missed alert must not break the monitoring.
pub struct Notifier {
    notifications: Arc<dyn Notifications>,
    defaults: Defaults,
}

impl Notifier {
    pub const DEFAULTS: Defaults = Defaults {
        presentation: Presentation { show_banner: true, play_sound: true, set_badge: false },
        channel: Channel { id: "default", name: "Price alerts", importance: Importance::Max },
    };

    pub fn new(notifications: Arc<dyn Notifications>) -> Self {
        Self { notifications, defaults: Self::DEFAULTS }
    }

    #[must_use]
    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.defaults.channel.importance = importance;
        self
    }

    /// Prompt for the permission unless it has already been granted.
    #[instrument(skip_all)]
    pub async fn request_permission(&self) -> bool {
        self.try_request_permission().await.unwrap_or_else(|error| {
            warn!("failed to request the notification permission: {error:#}");
            false
        })
    }

    async fn try_request_permission(&self) -> Result<bool> {
        if self.notifications.get_permission().await? == Permission::Granted {
            debug!("already granted");
            return Ok(true);
        }
        let permission = self.notifications.request_permission().await?;
        if permission != Permission::Granted {
            warn!(?permission, "notifications are not permitted");
        }
        Ok(permission == Permission::Granted)
    }

    /// Register the presentation defaults. Safe to call repeatedly.
    pub async fn configure(&self) -> Result {
        self.notifications
            .configure_defaults(&self.defaults)
            .await
            .context("failed to configure the notification defaults")
    }

    #[instrument(skip_all, fields(price = %price))]
    pub async fn notify_low_price(&self, price: CentsPerKilowattHour) {
        let alert = Alert {
            title: "Low electricity price".to_owned(),
            body: format!(
                "The price is {price:.2}, {:.2} below the threshold",
                CentsPerKilowattHour::THRESHOLD - price,
            ),
            data: json!({ "price": price.0, "threshold": CentsPerKilowattHour::THRESHOLD.0 }),
        };
        match self.send_now(alert).await {
            Ok(()) => info!("notified"),
            Err(error) => warn!("{error}"),
        }
    }

    async fn send_now(&self, alert: Alert) -> Result<(), NotifyFailed> {
        self.notifications.send_now(alert).await.map_err(NotifyFailed)
    }

    /// Remind about the prices every day at noon, independently of the monitoring.
    #[instrument(skip_all)]
    pub async fn schedule_daily_reminder(&self) {
        let alert = Alert {
            title: "Electricity prices".to_owned(),
            body: "Check today's electricity prices".to_owned(),
            data: json!({ "threshold": CentsPerKilowattHour::THRESHOLD.0 }),
        };
        match self.notifications.schedule_recurring(alert, DailyTrigger::NOON).await {
            Ok(()) => info!("scheduled the daily reminder"),
            Err(error) => warn!("failed to schedule the daily reminder: {error:#}"),
        }
    }

    pub async fn cancel_all(&self) {
        if let Err(error) = self.notifications.cancel_all().await {
            warn!("failed to cancel the pending alerts: {error:#}");
        }
    }
}
