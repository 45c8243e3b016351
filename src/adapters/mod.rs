//! Concrete adapter implementations for ports.

pub mod csv_price_adapter;
pub mod file_config_adapter;
pub mod jsonl_audit_adapter;
pub mod tracing_log_adapter;
