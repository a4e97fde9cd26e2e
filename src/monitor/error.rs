//! Failures of the monitor. None of them is fatal.

/// Network error, non-success status, or an empty or malformed feed.
#[derive(Debug, thiserror::Error)]
#[error("failed to fetch the current price: {0:#}")]
pub struct FetchFailed(pub anyhow::Error);

/// Denied permission or failed delivery.
#[derive(Debug, thiserror::Error)]
#[error("failed to notify: {0:#}")]
pub struct NotifyFailed(pub anyhow::Error);

/// Configuring the notifications failed while starting the schedule.
#[derive(Debug, thiserror::Error)]
#[error("failed to start monitoring: {0:#}")]
pub struct ScheduleStartFailed(pub anyhow::Error);
