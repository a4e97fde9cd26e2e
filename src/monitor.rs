//! Price monitor: fetch, threshold check, notification, and the schedule driving them.

mod controller;
mod error;
mod feed;
mod notifier;
mod scheduler;
mod state;
#[cfg(test)]
mod testing;

use std::future::pending;

use tokio::time::Interval;

pub use self::{
    controller::{Controller, Handle},
    error::{FetchFailed, NotifyFailed, ScheduleStartFailed},
    feed::{FeedRecord, PriceFeed, PricePoint},
    notifier::Notifier,
    scheduler::Scheduler,
    state::{MonitorState, ScheduleStatus},
};

/// Wait for the next tick of the timer, or forever when there is no timer.
async fn ticked(timer: Option<&mut Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => pending().await,
    }
}
