//! Notification capability: permission, presentation defaults, immediate and recurring alerts.

mod local;
mod sink;

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, TimeZone};
use serde::Serialize;

pub use self::{local::LocalNotifications, sink::Sink};
use crate::prelude::*;

#[async_trait]
pub trait Notifications: Send + Sync {
    /// Current permission, without prompting.
    async fn get_permission(&self) -> Result<Permission>;

    /// Prompt for the permission and return the outcome.
    async fn request_permission(&self) -> Result<Permission>;

    /// Register the presentation defaults. Repeated calls replace the previous ones.
    async fn configure_defaults(&self, defaults: &Defaults) -> Result;

    async fn send_now(&self, alert: Alert) -> Result;

    async fn schedule_recurring(&self, alert: Alert, trigger: DailyTrigger) -> Result;

    /// Drop every pending scheduled alert.
    async fn cancel_all(&self) -> Result;
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Permission {
    #[default]
    Undetermined,
    Granted,
    Denied,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Defaults {
    pub presentation: Presentation,
    pub channel: Channel,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Presentation {
    pub show_banner: bool,
    pub play_sound: bool,
    pub set_badge: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Channel {
    pub id: &'static str,
    pub name: &'static str,
    pub importance: Importance,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Importance {
    Low,
    Default,
    High,
    Max,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Alert {
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

/// Fires every day at the given local wall-clock time.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DailyTrigger {
    pub hour: u32,
    pub minute: u32,
}

impl DailyTrigger {
    pub const NOON: Self = Self { hour: 12, minute: 0 };

    /// Next occurrence strictly after `now`.
    ///
    /// Days on which the wall-clock time does not exist (DST gaps) are skipped.
    pub fn next_after<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0)?;
        now.date_naive().iter_days().take(3).find_map(|date| {
            date.and_time(time)
                .and_local_timezone(now.timezone())
                .earliest()
                .filter(|occurrence| occurrence > now)
        })
    }
}
