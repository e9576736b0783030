//! Dashboard refresh cycle over the four aggregators

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::{ContractsCfg, PollCfg};
use crate::domain::{ActivityMerger, LeaderboardRanker, StatsAggregator, TimeSeriesBucketer};
use crate::infrastructure::indexer::IndexerApi;
use crate::shared::types::DashboardSnapshot;

/// Tunables for the refresh cycle.
#[derive(Debug, Clone)]
pub struct DashboardMonitorConfig {
    pub refresh_interval_secs: u64,
    pub growth_window_days: u32,
    pub top_holders: usize,
}

impl Default for DashboardMonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 30,
            growth_window_days: 30,
            top_holders: 10,
        }
    }
}

impl From<PollCfg> for DashboardMonitorConfig {
    fn from(poll: PollCfg) -> Self {
        Self {
            refresh_interval_secs: poll.refresh_interval_secs,
            growth_window_days: poll.growth_window_days,
            top_holders: poll.top_holders,
        }
    }
}

/// Cycle bookkeeping.
#[derive(Debug, Clone)]
pub struct MonitorStats {
    pub started_at: Instant,
    pub cycles_completed: u64,
    pub last_cycle_duration: Duration,
}

impl MonitorStats {
    fn new() -> Self {
        Self {
            started_at: Instant::now(),
            cycles_completed: 0,
            last_cycle_duration: Duration::ZERO,
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Drives the four aggregators and holds the latest snapshot.
///
/// Each refresh produces a fresh snapshot and swaps it in under a single
/// write lock; overlapping refreshes (manual plus interval-driven) proceed
/// independently and the last to settle wins.
pub struct DashboardMonitor {
    config: DashboardMonitorConfig,
    stats: StatsAggregator,
    activity: ActivityMerger,
    growth: TimeSeriesBucketer,
    holders: LeaderboardRanker,
    snapshot: RwLock<DashboardSnapshot>,
    monitor_stats: RwLock<MonitorStats>,
}

impl DashboardMonitor {
    pub fn new(
        indexer: Arc<dyn IndexerApi>,
        contracts: ContractsCfg,
        config: DashboardMonitorConfig,
    ) -> Self {
        Self {
            config,
            stats: StatsAggregator::new(indexer.clone(), contracts.clone()),
            activity: ActivityMerger::new(indexer.clone(), contracts.clone()),
            growth: TimeSeriesBucketer::new(indexer.clone(), contracts.clone()),
            holders: LeaderboardRanker::new(indexer, contracts),
            snapshot: RwLock::new(DashboardSnapshot::default()),
            monitor_stats: RwLock::new(MonitorStats::new()),
        }
    }

    /// Run one full refresh cycle: fan out all aggregators concurrently,
    /// then swap in the new snapshot. Never fails - every aggregator
    /// degrades to an empty result when the indexer is unreachable.
    pub async fn refresh(&self) -> DashboardSnapshot {
        let cycle_start = Instant::now();

        let (stats, activity, growth, top_holders) = futures::join!(
            self.stats.compute_stats(),
            self.activity.recent_activity(),
            self.growth.growth_data(self.config.growth_window_days),
            self.holders.top_holders(self.config.top_holders),
        );

        let snapshot = DashboardSnapshot {
            stats,
            activity,
            growth,
            top_holders,
            refreshed_at: Some(Utc::now()),
        };

        // Last write wins when cycles overlap
        *self.snapshot.write().await = snapshot.clone();

        let mut ms = self.monitor_stats.write().await;
        ms.cycles_completed += 1;
        ms.last_cycle_duration = cycle_start.elapsed();
        info!(
            "Refresh cycle {} completed in {:?}",
            ms.cycles_completed, ms.last_cycle_duration
        );

        snapshot
    }

    /// Latest settled snapshot.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn monitor_stats(&self) -> MonitorStats {
        self.monitor_stats.read().await.clone()
    }

    /// Spawn the interval-driven refresh loop. The caller owns the handle
    /// and tears the loop down by aborting it; an in-flight cycle is then
    /// simply discarded.
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<()> {
        let monitor = Arc::clone(self);
        tokio::spawn(async move {
            let period = Duration::from_secs(monitor.config.refresh_interval_secs);
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                monitor.refresh().await;
            }
        })
    }
}
