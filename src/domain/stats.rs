//! Headline statistics from parallel count queries

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;

use crate::config::{ContractsCfg, BUY_ENTRYPOINT, RENEW_ENTRYPOINT};
use crate::infrastructure::indexer::{CountQuery, IndexerApi};
use crate::shared::types::{Metric, StatsSnapshot};
use crate::shared::utils::pct_change;

/// Computes headline metrics: totals, 24h windows, percentage deltas.
pub struct StatsAggregator {
    indexer: Arc<dyn IndexerApi>,
    contracts: ContractsCfg,
}

impl StatsAggregator {
    pub fn new(indexer: Arc<dyn IndexerApi>, contracts: ContractsCfg) -> Self {
        Self { indexer, contracts }
    }

    /// Issue all count queries concurrently and fold them into a snapshot.
    ///
    /// The 24h metrics compare the trailing window against the 24-48h-ago
    /// window; all-time totals and the active-name gauge have no baseline.
    pub async fn compute_stats(&self) -> StatsSnapshot {
        let now = Utc::now();
        let day_ago = now - Duration::hours(24);
        let two_days_ago = now - Duration::hours(48);

        let registrar = self.contracts.acquisition_contract.as_str();
        let renewer = self.contracts.renewal_contract.as_str();

        let total_q = CountQuery::new(registrar, BUY_ENTRYPOINT);
        let new_24h_q = CountQuery::new(registrar, BUY_ENTRYPOINT).since(day_ago);
        let new_prev_q = CountQuery::new(registrar, BUY_ENTRYPOINT)
            .since(two_days_ago)
            .until(day_ago);
        let renew_24h_q = CountQuery::new(renewer, RENEW_ENTRYPOINT).since(day_ago);
        let renew_prev_q = CountQuery::new(renewer, RENEW_ENTRYPOINT)
            .since(two_days_ago)
            .until(day_ago);

        let (total, new_24h, new_prev, renew_24h, renew_prev, active) = futures::join!(
            self.indexer.count(&total_q),
            self.indexer.count(&new_24h_q),
            self.indexer.count(&new_prev_q),
            self.indexer.count(&renew_24h_q),
            self.indexer.count(&renew_prev_q),
            self.indexer.active_keys(self.contracts.records_bigmap),
        );

        debug!(
            "Stats: total={} new24h={} (prev {}) renew24h={} (prev {}) active={}",
            total, new_24h, new_prev, renew_24h, renew_prev, active
        );

        StatsSnapshot {
            total_registrations: Metric::absolute(total),
            new_24h: Metric::new(new_24h, pct_change(new_24h, new_prev)),
            renewals_24h: Metric::new(renew_24h, pct_change(renew_24h, renew_prev)),
            active_names: Metric::absolute(active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::infrastructure::indexer::{ListQuery, Operation};
    use async_trait::async_trait;

    /// Stub indexer answering count queries by window shape.
    struct StubIndexer {
        total: u64,
        new_24h: u64,
        new_prev: u64,
        renew_24h: u64,
        renew_prev: u64,
        active: u64,
    }

    #[async_trait]
    impl IndexerApi for StubIndexer {
        async fn count(&self, query: &CountQuery) -> u64 {
            let windowed = query.since.is_some();
            let baseline = query.until.is_some();
            match (query.entrypoint.as_str(), windowed, baseline) {
                (BUY_ENTRYPOINT, false, false) => self.total,
                (BUY_ENTRYPOINT, true, false) => self.new_24h,
                (BUY_ENTRYPOINT, true, true) => self.new_prev,
                (RENEW_ENTRYPOINT, true, false) => self.renew_24h,
                (RENEW_ENTRYPOINT, true, true) => self.renew_prev,
                _ => 0,
            }
        }

        async fn list(&self, _query: &ListQuery) -> Option<Vec<Operation>> {
            None
        }

        async fn active_keys(&self, _bigmap_id: u64) -> u64 {
            self.active
        }
    }

    fn aggregator(stub: StubIndexer) -> StatsAggregator {
        StatsAggregator::new(Arc::new(stub), Config::default().contracts)
    }

    #[tokio::test]
    async fn test_24h_change_against_prior_window() {
        // 5 acquisitions in the last 24h, 4 in the prior window -> +25.0%
        let stats = aggregator(StubIndexer {
            total: 120,
            new_24h: 5,
            new_prev: 4,
            renew_24h: 6,
            renew_prev: 8,
            active: 90,
        })
        .compute_stats()
        .await;

        assert_eq!(stats.new_24h.value, 5);
        assert_eq!(stats.new_24h.change, Some(25.0));
        assert_eq!(stats.renewals_24h.change, Some(-25.0));
        assert_eq!(stats.total_registrations.value, 120);
        assert_eq!(stats.total_registrations.change, None);
        assert_eq!(stats.active_names.value, 90);
        assert_eq!(stats.active_names.change, None);
    }

    #[tokio::test]
    async fn test_quiet_windows_have_no_change() {
        let stats = aggregator(StubIndexer {
            total: 120,
            new_24h: 0,
            new_prev: 0,
            renew_24h: 3,
            renew_prev: 0,
            active: 90,
        })
        .compute_stats()
        .await;

        assert_eq!(stats.new_24h.change, None);
        // Activity against an empty baseline reads as +100%
        assert_eq!(stats.renewals_24h.change, Some(100.0));
    }
}
