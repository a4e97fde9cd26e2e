pub mod client;
pub mod comed;
pub mod heartbeat;
pub mod ntfy;
