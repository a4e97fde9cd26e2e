use std::time::Duration;

use reqwest::{Client as HttpClient, Url};

use crate::prelude::*;

/// Optional liveness ping for an external uptime monitor.
#[derive(Clone, Default)]
pub struct Client {
    url: Option<Url>,
}

impl Client {
    pub const fn new(url: Option<Url>) -> Self {
        Self { url }
    }

    pub async fn send(&self) {
        if let Some(url) = &self.url
            && let Err(error) = Self::send_fallible(url.clone()).await
        {
            warn!("failed to send the heartbeat: {error:#}");
        }
    }

    #[instrument(skip_all)]
    async fn send_fallible(url: Url) -> Result {
        debug!("sending a heartbeat…");
        HttpClient::builder()
            .timeout(Duration::from_secs(3))
            .build()?
            .post(url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
