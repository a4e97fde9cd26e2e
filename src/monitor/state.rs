use crate::monitor::PricePoint;

/// Read model of the monitor, as seen by a presentation layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonitorState {
    /// Latest successfully fetched price; kept when a later fetch fails.
    pub current_price: Option<PricePoint>,

    pub is_loading: bool,

    pub last_error: Option<String>,

    /// Whether the schedule has been started by the consumer.
    pub is_monitoring: bool,

    /// Polled from the scheduler.
    pub schedule_status: ScheduleStatus,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, derive_more::Display)]
pub enum ScheduleStatus {
    Active,

    #[default]
    Inactive,
}
