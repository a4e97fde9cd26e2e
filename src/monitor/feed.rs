use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{monitor::FetchFailed, prelude::*, quantity::price::CentsPerKilowattHour};

/// Raw feed record. Numbers are string-encoded upstream and kept as is.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct FeedRecord {
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "millisUTC")]
    pub millis_utc: String,

    /// Cents per kilowatt-hour.
    pub price: String,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PricePoint {
    pub price: CentsPerKilowattHour,
    pub observed_at: DateTime<Utc>,
    pub under_threshold: bool,
}

impl PricePoint {
    pub fn new(price: CentsPerKilowattHour, observed_at: DateTime<Utc>) -> Self {
        Self { price, observed_at, under_threshold: price.is_under_threshold() }
    }
}

impl TryFrom<&FeedRecord> for PricePoint {
    type Error = Error;

    fn try_from(record: &FeedRecord) -> Result<Self> {
        let price = record
            .price
            .parse::<CentsPerKilowattHour>()
            .with_context(|| format!("malformed price `{}`", record.price))?;
        ensure!(price.0.is_finite(), "non-finite price `{}`", record.price);
        let millis = record
            .millis_utc
            .parse::<i64>()
            .with_context(|| format!("malformed timestamp `{}`", record.millis_utc))?;
        let observed_at = DateTime::from_timestamp_millis(millis)
            .with_context(|| format!("timestamp `{millis}` is out of range"))?;
        Ok(Self::new(price, observed_at))
    }
}

/// Pricing feed, most recent record first.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn get_records(&self) -> Result<Vec<FeedRecord>>;

    /// Get the most recent price point.
    #[instrument(skip_all)]
    async fn fetch_current(&self) -> Result<PricePoint, FetchFailed> {
        let records = self.get_records().await.map_err(FetchFailed)?;
        let latest = records.first().ok_or_else(|| FetchFailed(anyhow!("the feed is empty")))?;
        let point = PricePoint::try_from(latest).map_err(FetchFailed)?;
        debug!(price = %point.price, observed_at = %point.observed_at, "fetched");
        Ok(point)
    }

    /// Get the entire feed, or nothing if it cannot be fetched.
    #[instrument(skip_all)]
    async fn fetch_history(&self) -> Vec<FeedRecord> {
        self.get_records().await.unwrap_or_else(|error| {
            warn!("failed to fetch the history: {error:#}");
            Vec::new()
        })
    }
}
