use crate::{
    api::ntfy,
    notifications::{Alert, Defaults, Importance},
    prelude::*,
};

/// Where alerts end up.
pub enum Sink {
    /// Write alerts to the log.
    Log,

    /// Publish alerts to an ntfy topic.
    Ntfy(ntfy::Client),
}

impl Sink {
    pub async fn deliver(&self, alert: &Alert, defaults: &Defaults) -> Result {
        match self {
            Self::Log => {
                info!(
                    title = %alert.title,
                    body = %alert.body,
                    data = %alert.data,
                    channel = defaults.channel.id,
                    sound = defaults.presentation.play_sound,
                    badge = defaults.presentation.set_badge,
                    "alert",
                );
                Ok(())
            }
            Self::Ntfy(client) => {
                let tags: &[&str] =
                    if defaults.presentation.play_sound { &["zap", "loud_sound"] } else { &["zap"] };
                let message = ntfy::Message {
                    title: &alert.title,
                    body: &alert.body,
                    priority: Self::priority(defaults),
                    tags,
                };
                client.publish(&message).await
            }
        }
    }

    const fn priority(defaults: &Defaults) -> ntfy::Priority {
        if !defaults.presentation.show_banner {
            return ntfy::Priority::Min;
        }
        match defaults.channel.importance {
            Importance::Low => ntfy::Priority::Low,
            Importance::Default => ntfy::Priority::Default,
            Importance::High => ntfy::Priority::High,
            Importance::Max => ntfy::Priority::Max,
        }
    }
}
