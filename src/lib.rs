//! Tezpulse - Tezos Domains analytics aggregator
//! Built with Domain-Driven Design principles

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;
pub mod config;
pub mod report;

// Re-export main types for convenience
pub use application::DashboardMonitor;
pub use domain::{ActivityMerger, LeaderboardRanker, StatsAggregator, TimeSeriesBucketer};
pub use infrastructure::indexer::{HttpIndexerClient, IndexerApi};
pub use report::DashboardReport;
