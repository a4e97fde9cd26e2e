mod feed;
mod heartbeat;
mod history;
mod notifications;
mod price;
mod remind;
mod watch;

use clap::{Parser, Subcommand};

use crate::cli::{history::HistoryArgs, price::PriceArgs, remind::RemindArgs, watch::WatchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: watch the price and notify when it drops below the threshold.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Fetch the current price once.
    #[clap(name = "price")]
    Price(PriceArgs),

    /// Print the entire feed.
    #[clap(name = "history")]
    History(HistoryArgs),

    /// Only send the daily reminder, until interrupted.
    #[clap(name = "remind")]
    Remind(RemindArgs),
}
