use std::sync::Arc;

use clap::Parser;
use tokio::{select, signal};

use crate::{
    cli::{feed::FeedArgs, heartbeat::HeartbeatArgs, notifications::NotificationArgs},
    monitor::{Controller, Handle, MonitorState, Scheduler},
    prelude::*,
};

#[derive(Parser)]
pub struct WatchArgs {
    /// How often to check the price and notify.
    #[clap(long, env = "CHECK_INTERVAL", default_value = "15min", value_parser = parse_period)]
    check_interval: humantime::Duration,

    /// How often to refresh the displayed price while watching.
    #[clap(long, env = "REFRESH_INTERVAL", default_value = "5min", value_parser = parse_period)]
    refresh_interval: humantime::Duration,

    /// How often to poll the schedule status.
    #[clap(long, env = "STATUS_INTERVAL", default_value = "1min", value_parser = parse_period)]
    status_interval: humantime::Duration,

    /// Also remind about the prices every day at noon.
    #[clap(long, env = "DAILY_REMINDER")]
    daily_reminder: bool,

    #[clap(flatten)]
    feed: FeedArgs,

    #[clap(flatten)]
    notifications: NotificationArgs,

    #[clap(flatten)]
    heartbeat: HeartbeatArgs,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        let feed = Arc::new(self.feed.connect()?);
        let notifier = Arc::new(self.notifications.notifier()?);

        if !notifier.request_permission().await {
            warn!("alerts will not be delivered");
        }
        if self.daily_reminder {
            notifier.configure().await?;
            notifier.schedule_daily_reminder().await;
        }

        let scheduler = Scheduler::builder()
            .feed(feed.clone())
            .notifier(notifier.clone())
            .heartbeat(self.heartbeat.client())
            .period(self.check_interval.into())
            .build();
        let (handle, monitor) = Controller::builder()
            .feed(feed)
            .notifier(notifier.clone())
            .scheduler(scheduler)
            .refresh_period(self.refresh_interval.into())
            .status_period(self.status_interval.into())
            .build()
            .spawn();

        handle.start().await?;
        let result = present(&handle).await;
        handle.stop().await?;

        drop(handle);
        monitor.await?;
        notifier.cancel_all().await;
        result
    }
}

fn parse_period(value: &str) -> Result<humantime::Duration> {
    let period: humantime::Duration = value.parse()?;
    ensure!(!period.is_zero(), "the period must be non-zero");
    Ok(period)
}

/// Print the state changes until interrupted.
///
/// On Unix, `SIGUSR1` toggles the monitoring and `SIGUSR2` refreshes the price.
async fn present(handle: &Handle) -> Result {
    let mut state = handle.subscribe();
    let mut presenter = Presenter::default();
    let mut signals = Signals::new()?;
    presenter.show(&handle.state());

    loop {
        select! {
            result = signal::ctrl_c() => {
                result?;
                info!("interrupted");
                return Ok(());
            }
            changed = state.changed() => {
                changed.context("the monitor has stopped unexpectedly")?;
                presenter.show(&state.borrow_and_update());
            }
            signal = signals.next() => match signal {
                Signal::Toggle => handle.toggle().await?,
                Signal::Refresh => handle.refresh().await?,
            },
        }
    }
}

/// Shows each price and each distinct error once.
#[derive(Default)]
struct Presenter {
    shown: MonitorState,
}

impl Presenter {
    fn show(&mut self, state: &MonitorState) {
        if state.is_loading {
            return;
        }
        if state.last_error.is_some() && state.last_error != self.shown.last_error {
            error!(
                error = state.last_error.as_deref(),
                stale_price = ?state.current_price.map(|point| point.price),
                "the price could not be updated",
            );
        }
        if let Some(point) = state.current_price
            && state.current_price != self.shown.current_price
        {
            info!(
                price = %point.price,
                observed_at = %point.observed_at.with_timezone(&chrono::Local).format("%H:%M"),
                under_threshold = point.under_threshold,
                "price",
            );
        }
        if state.is_monitoring != self.shown.is_monitoring
            || state.schedule_status != self.shown.schedule_status
        {
            info!(is_monitoring = state.is_monitoring, schedule = %state.schedule_status, "status");
        }
        self.shown = state.clone();
    }
}

enum Signal {
    Toggle,
    Refresh,
}

#[cfg(unix)]
struct Signals {
    toggle: signal::unix::Signal,
    refresh: signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    fn new() -> Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};
        Ok(Self {
            toggle: signal(SignalKind::user_defined1())?,
            refresh: signal(SignalKind::user_defined2())?,
        })
    }

    async fn next(&mut self) -> Signal {
        select! {
            Some(()) = self.toggle.recv() => Signal::Toggle,
            Some(()) = self.refresh.recv() => Signal::Refresh,
            else => std::future::pending().await,
        }
    }
}

#[cfg(not(unix))]
struct Signals;

#[cfg(not(unix))]
impl Signals {
    const fn new() -> Result<Self> {
        Ok(Self)
    }

    async fn next(&mut self) -> Signal {
        std::future::pending().await
    }
}
