//! Application layer - refresh cycle orchestration

pub mod dashboard;

pub use dashboard::{DashboardMonitor, DashboardMonitorConfig, MonitorStats};
