//! [ComEd hourly pricing](https://hourlypricing.comed.com/live-prices/) feed client.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    api::client,
    monitor::{FeedRecord, PriceFeed},
    prelude::*,
};

/// Real-time five-minute prices, most recent first.
pub const FIVE_MINUTE_FEED_URL: &str = "https://hourlypricing.comed.com/api?type=5minutefeed";

pub struct Api {
    client: Client,
    url: Url,
}

impl Api {
    pub fn new(url: Url) -> Result<Self> {
        Ok(Self { client: client::try_new()?, url })
    }
}

#[async_trait]
impl PriceFeed for Api {
    #[instrument(skip_all, fields(url = %self.url))]
    async fn get_records(&self) -> Result<Vec<FeedRecord>> {
        debug!("fetching…");
        let records: Vec<FeedRecord> = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .context("failed to call the feed")?
            .error_for_status()
            .context("the feed request failed")?
            .json()
            .await
            .context("failed to deserialize the feed")?;
        debug!(n_records = records.len(), "fetched");
        Ok(records)
    }
}
