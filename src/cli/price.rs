use clap::Parser;

use crate::{cli::feed::FeedArgs, monitor::PriceFeed, prelude::*};

#[derive(Parser)]
pub struct PriceArgs {
    #[clap(flatten)]
    feed: FeedArgs,

    /// Print the price point as JSON.
    #[clap(long)]
    json: bool,
}

impl PriceArgs {
    pub async fn run(self) -> Result {
        let point = self.feed.connect()?.fetch_current().await?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&point)?);
        } else {
            info!(
                price = %point.price,
                observed_at = %point.observed_at,
                under_threshold = point.under_threshold,
                "current price",
            );
        }
        Ok(())
    }
}
