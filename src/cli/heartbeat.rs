use clap::Parser;
use reqwest::Url;

use crate::api::heartbeat;

#[derive(Parser)]
pub struct HeartbeatArgs {
    /// Pinged after every scheduled check that reached the feed.
    #[clap(long = "heartbeat-url", env = "HEARTBEAT_URL")]
    pub heartbeat_url: Option<Url>,
}

impl HeartbeatArgs {
    pub fn client(&self) -> heartbeat::Client {
        heartbeat::Client::new(self.heartbeat_url.clone())
    }
}
