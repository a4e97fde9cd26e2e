//! In-memory collaborators for the monitor tests.

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::{
    monitor::{FeedRecord, PriceFeed},
    notifications::{Alert, DailyTrigger, Defaults, Notifications, Permission},
    prelude::*,
};

pub struct StaticFeed {
    response: Mutex<Result<Vec<FeedRecord>, String>>,
    n_calls: AtomicUsize,
}

impl StaticFeed {
    pub fn with_records(records: Vec<FeedRecord>) -> Self {
        Self { response: Mutex::new(Ok(records)), n_calls: AtomicUsize::new(0) }
    }

    pub fn with_price(price: &str) -> Self {
        Self::with_records(vec![Self::record(price)])
    }

    pub fn failing(message: &str) -> Self {
        Self { response: Mutex::new(Err(message.to_owned())), n_calls: AtomicUsize::new(0) }
    }

    pub fn set_price(&self, price: &str) {
        *self.response.lock().unwrap() = Ok(vec![Self::record(price)]);
    }

    pub fn set_failing(&self, message: &str) {
        *self.response.lock().unwrap() = Err(message.to_owned());
    }

    pub fn n_calls(&self) -> usize {
        self.n_calls.load(Ordering::SeqCst)
    }

    fn record(price: &str) -> FeedRecord {
        FeedRecord { millis_utc: "1700000000000".to_owned(), price: price.to_owned() }
    }
}

#[async_trait]
impl PriceFeed for StaticFeed {
    async fn get_records(&self) -> Result<Vec<FeedRecord>> {
        self.n_calls.fetch_add(1, Ordering::SeqCst);
        self.response.lock().unwrap().clone().map_err(Error::msg)
    }
}

#[derive(Clone, Default)]
pub struct Calls {
    pub n_prompts: usize,
    pub n_configured: usize,
    pub defaults: Option<Defaults>,
    pub sent: Vec<Alert>,
    pub recurring: Vec<DailyTrigger>,
}

pub struct RecordingNotifications {
    permission: Mutex<Permission>,
    grant_on_prompt: bool,
    fail_configure: bool,
    fail_delivery: bool,
    calls: Mutex<Calls>,
}

impl RecordingNotifications {
    fn new(permission: Permission) -> Self {
        Self {
            permission: Mutex::new(permission),
            grant_on_prompt: true,
            fail_configure: false,
            fail_delivery: false,
            calls: Mutex::default(),
        }
    }

    pub fn granted() -> Self {
        Self::new(Permission::Granted)
    }

    pub fn undetermined() -> Self {
        Self::new(Permission::Undetermined)
    }

    pub fn denying() -> Self {
        Self { grant_on_prompt: false, ..Self::undetermined() }
    }

    pub fn failing_configure() -> Self {
        Self { fail_configure: true, ..Self::granted() }
    }

    pub fn failing_delivery() -> Self {
        Self { fail_delivery: true, ..Self::granted() }
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifications for RecordingNotifications {
    async fn get_permission(&self) -> Result<Permission> {
        Ok(*self.permission.lock().unwrap())
    }

    async fn request_permission(&self) -> Result<Permission> {
        self.calls.lock().unwrap().n_prompts += 1;
        let permission = if self.grant_on_prompt { Permission::Granted } else { Permission::Denied };
        *self.permission.lock().unwrap() = permission;
        Ok(permission)
    }

    async fn configure_defaults(&self, defaults: &Defaults) -> Result {
        ensure!(!self.fail_configure, "the channel cannot be registered");
        let mut calls = self.calls.lock().unwrap();
        calls.n_configured += 1;
        calls.defaults = Some(*defaults);
        Ok(())
    }

    async fn send_now(&self, alert: Alert) -> Result {
        ensure!(!self.fail_delivery, "the delivery service is unavailable");
        self.calls.lock().unwrap().sent.push(alert);
        Ok(())
    }

    async fn schedule_recurring(&self, _alert: Alert, trigger: DailyTrigger) -> Result {
        self.calls.lock().unwrap().recurring.push(trigger);
        Ok(())
    }

    async fn cancel_all(&self) -> Result {
        self.calls.lock().unwrap().recurring.clear();
        Ok(())
    }
}
