use std::{sync::Arc, time::Duration};

use bon::Builder;
use tokio::{
    select,
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{Interval, MissedTickBehavior, interval},
};

use crate::{
    monitor::{MonitorState, Notifier, PriceFeed, Scheduler, ticked},
    prelude::*,
};

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_STATUS_PERIOD: Duration = Duration::from_secs(60);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Refresh,
    Start,
    Stop,
    Toggle,
}

/// Owns the monitor state and drives the scheduler.
///
/// All the periodic work and the consumer commands go through the single [`Controller::run`] loop,
/// so no two fetches ever overlap.
#[derive(Builder)]
pub struct Controller {
    feed: Arc<dyn PriceFeed>,
    notifier: Arc<Notifier>,
    scheduler: Scheduler,

    /// Period of the display refresh while monitoring.
    #[builder(default = DEFAULT_REFRESH_PERIOD)]
    refresh_period: Duration,

    /// Period of the schedule status poll.
    #[builder(default = DEFAULT_STATUS_PERIOD)]
    status_period: Duration,

    #[builder(skip)]
    auto_refresh: Option<Interval>,

    #[builder(skip = watch::Sender::new(MonitorState::default()))]
    state: watch::Sender<MonitorState>,
}

impl Controller {
    pub fn subscribe(&self) -> watch::Receiver<MonitorState> {
        self.state.subscribe()
    }

    /// Fetch the current price into the state, notifying if it is below the threshold.
    #[instrument(skip_all)]
    pub async fn refresh(&mut self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.last_error = None;
        });
        match self.feed.fetch_current().await {
            Ok(point) => {
                self.state.send_modify(|state| state.current_price = Some(point));
                if point.under_threshold {
                    self.notifier.notify_low_price(point.price).await;
                }
            }
            Err(error) => {
                warn!("{error}");
                self.state.send_modify(|state| state.last_error = Some(error.to_string()));
            }
        }
        self.state.send_modify(|state| state.is_loading = false);
    }

    #[instrument(skip_all)]
    pub async fn start(&mut self) {
        if let Err(error) = self.scheduler.start().await {
            error!("{error}");
            self.state.send_modify(|state| state.last_error = Some(error.to_string()));
            return;
        }
        self.refresh().await;
        if self.auto_refresh.is_none() {
            let mut timer = interval(self.refresh_period);
            timer.reset_after(self.refresh_period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            self.auto_refresh = Some(timer);
        }
        let schedule_status = self.scheduler.status();
        self.state.send_modify(|state| {
            state.is_monitoring = true;
            state.schedule_status = schedule_status;
        });
        info!("monitoring");
    }

    #[instrument(skip_all)]
    pub fn stop(&mut self) {
        self.scheduler.stop();
        self.auto_refresh = None;
        let schedule_status = self.scheduler.status();
        self.state.send_modify(|state| {
            state.is_monitoring = false;
            state.schedule_status = schedule_status;
        });
    }

    pub async fn toggle(&mut self) {
        let is_monitoring = self.state.borrow().is_monitoring;
        if is_monitoring {
            self.stop();
        } else {
            self.start().await;
        }
    }

    fn poll_status(&self) {
        let schedule_status = self.scheduler.status();
        self.state.send_if_modified(|state| {
            let is_modified = state.schedule_status != schedule_status;
            state.schedule_status = schedule_status;
            is_modified
        });
    }

    async fn execute(&mut self, command: Command) {
        debug!(?command, "received");
        match command {
            Command::Refresh => self.refresh().await,
            Command::Start => self.start().await,
            Command::Stop => self.stop(),
            Command::Toggle => self.toggle().await,
        }
    }

    /// Run the loop in the background.
    pub fn spawn(self) -> (Handle, JoinHandle<()>) {
        let (commands, receiver) = mpsc::channel(16);
        let handle = Handle { commands, state: self.subscribe() };
        (handle, tokio::spawn(self.run(receiver)))
    }

    /// Serve the commands and the timers until every command sender is dropped.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let mut status_poll = interval(self.status_period);
        status_poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            select! {
                () = self.scheduler.next_tick() => {
                    self.scheduler.tick().await;
                }
                () = ticked(self.auto_refresh.as_mut()) => {
                    self.refresh().await;
                }
                _ = status_poll.tick() => {
                    self.poll_status();
                }
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    self.execute(command).await;
                }
            }
        }

        self.stop();
        info!("the monitor has shut down");
    }
}

/// Consumer side of a running [`Controller`].
#[derive(Clone)]
pub struct Handle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<MonitorState>,
}

impl Handle {
    pub fn state(&self) -> MonitorState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MonitorState> {
        self.state.clone()
    }

    pub async fn refresh(&self) -> Result {
        self.send(Command::Refresh).await
    }

    pub async fn start(&self) -> Result {
        self.send(Command::Start).await
    }

    pub async fn stop(&self) -> Result {
        self.send(Command::Stop).await
    }

    pub async fn toggle(&self) -> Result {
        self.send(Command::Toggle).await
    }

    async fn send(&self, command: Command) -> Result {
        self.commands.send(command).await.context("the monitor has shut down")
    }
}
