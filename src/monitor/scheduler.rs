use std::{sync::Arc, time::Duration};

use bon::Builder;
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::{
    api::heartbeat,
    monitor::{FetchFailed, Notifier, PriceFeed, PricePoint, ScheduleStartFailed, ScheduleStatus, ticked},
    prelude::*,
};

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(15 * 60);

/// Periodic fetch-and-notify.
///
/// The timer is armed by [`Scheduler::start`] and polled by the owner through
/// [`Scheduler::next_tick`], which never resolves while the scheduler is idle.
#[derive(Builder)]
pub struct Scheduler {
    feed: Arc<dyn PriceFeed>,
    notifier: Arc<Notifier>,

    #[builder(default)]
    heartbeat: heartbeat::Client,

    #[builder(default = DEFAULT_PERIOD)]
    period: Duration,

    #[builder(skip)]
    timer: Option<Interval>,
}

impl Scheduler {
    #[instrument(skip_all)]
    pub async fn start(&mut self) -> Result<(), ScheduleStartFailed> {
        if self.timer.is_some() {
            info!("already running");
            return Ok(());
        }
        self.notifier.configure().await.map_err(ScheduleStartFailed)?;

        let mut timer = interval(self.period);
        timer.reset_after(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);

        info!(period = ?self.period, "started");
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            info!("stopped");
        } else {
            debug!("already stopped");
        }
    }

    pub const fn status(&self) -> ScheduleStatus {
        if self.timer.is_some() { ScheduleStatus::Active } else { ScheduleStatus::Inactive }
    }

    pub async fn next_tick(&mut self) {
        ticked(self.timer.as_mut()).await;
    }

    /// Fetch the current price and notify if it is below the threshold.
    ///
    /// Never fails: the outcome is logged and returned.
    #[instrument(skip_all)]
    pub async fn tick(&self) -> TickOutcome {
        let outcome = match self.feed.fetch_current().await {
            Ok(point) if point.under_threshold => {
                self.notifier.notify_low_price(point.price).await;
                TickOutcome::BelowThreshold(point)
            }
            Ok(point) => TickOutcome::AboveThreshold(point),
            Err(error) => TickOutcome::FetchFailed(error),
        };
        outcome.trace();
        if !matches!(outcome, TickOutcome::FetchFailed(_)) {
            self.heartbeat.send().await;
        }
        outcome
    }
}

#[derive(Debug)]
pub enum TickOutcome {
    /// The price is below the threshold, and the notification has been attempted.
    BelowThreshold(PricePoint),

    AboveThreshold(PricePoint),

    FetchFailed(FetchFailed),
}

impl TickOutcome {
    pub fn trace(&self) {
        match self {
            Self::BelowThreshold(point) => {
                info!(price = %point.price, observed_at = %point.observed_at, "below the threshold");
            }
            Self::AboveThreshold(point) => {
                info!(price = %point.price, observed_at = %point.observed_at, "above the threshold");
            }
            Self::FetchFailed(error) => {
                warn!("{error}, retrying on the next tick");
            }
        }
    }
}
