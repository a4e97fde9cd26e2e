use std::sync::Arc;

use clap::Parser;
use reqwest::Url;

use crate::{
    api::ntfy,
    monitor::Notifier,
    notifications::{Importance, LocalNotifications, Sink},
    prelude::*,
};

#[derive(Parser)]
pub struct NotificationArgs {
    /// ntfy topic URL to publish the alerts to. For example: `https://ntfy.sh/electricity`.
    ///
    /// Alerts are only logged when omitted.
    #[clap(long = "ntfy-url", env = "NTFY_URL")]
    pub ntfy_url: Option<Url>,

    /// Channel importance, mapped onto the ntfy priority.
    #[clap(long, env = "IMPORTANCE", value_enum, default_value = "max")]
    pub importance: Importance,

    /// Deny the notification permission.
    #[clap(long, env = "MUTE")]
    pub mute: bool,
}

impl NotificationArgs {
    pub fn notifier(&self) -> Result<Notifier> {
        let sink = match &self.ntfy_url {
            Some(url) => Sink::Ntfy(ntfy::Client::new(url.clone())?),
            None => Sink::Log,
        };
        let notifications = LocalNotifications::builder().sink(sink).muted(self.mute).build();
        Ok(Notifier::new(Arc::new(notifications)).with_importance(self.importance))
    }
}
