use std::time::Duration;

use reqwest::Client;

use crate::prelude::*;

const TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client shared by the feed and the ntfy publisher.
pub fn try_new() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(TIMEOUT)
        .build()
        .context("failed to build the HTTP client")
}
