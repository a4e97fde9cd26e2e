use clap::Parser;

use crate::{cli::feed::FeedArgs, monitor::PriceFeed, prelude::*, tables::build_history_table};

#[derive(Parser)]
pub struct HistoryArgs {
    #[clap(flatten)]
    feed: FeedArgs,
}

impl HistoryArgs {
    pub async fn run(self) -> Result {
        let records = self.feed.connect()?.fetch_history().await;
        info!(n_records = records.len(), "fetched the history");
        println!("{}", build_history_table(&records));
        Ok(())
    }
}
