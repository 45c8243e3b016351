//! Port traits (hexagonal architecture boundaries).

pub mod audit_port;
pub mod config_port;
pub mod price_port;
pub mod review_log_port;
