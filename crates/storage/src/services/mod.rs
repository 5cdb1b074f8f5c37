pub mod aggregator;
pub mod attendance;
pub mod auth;
pub mod import;
pub mod lifecycle;
