use clap::Parser;
use reqwest::Url;

use crate::{api::comed, prelude::*};

#[derive(Parser)]
pub struct FeedArgs {
    /// Pricing feed URL, returning the records most recent first.
    #[clap(long = "feed-url", env = "FEED_URL", default_value = comed::FIVE_MINUTE_FEED_URL)]
    pub feed_url: Url,
}

impl FeedArgs {
    pub fn connect(&self) -> Result<comed::Api> {
        comed::Api::new(self.feed_url.clone())
    }
}
