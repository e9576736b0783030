//! Domain layer - aggregation logic over raw indexer results

pub mod stats;
pub mod activity;
pub mod growth;
pub mod holders;

pub use stats::StatsAggregator;
pub use activity::ActivityMerger;
pub use growth::TimeSeriesBucketer;
pub use holders::LeaderboardRanker;
