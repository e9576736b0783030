//! Daily registration buckets over a trailing window

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::debug;

use crate::config::{ContractsCfg, BUY_ENTRYPOINT};
use crate::infrastructure::indexer::{IndexerApi, ListQuery};
use crate::shared::types::DailyBucket;
use crate::shared::utils::{mutez_to_tez, round2};

const FETCH_CAP: u32 = 10_000;

/// Buckets acquisition operations into fixed daily counts and volumes.
pub struct TimeSeriesBucketer {
    indexer: Arc<dyn IndexerApi>,
    contracts: ContractsCfg,
}

impl TimeSeriesBucketer {
    pub fn new(indexer: Arc<dyn IndexerApi>, contracts: ContractsCfg) -> Self {
        Self { indexer, contracts }
    }

    /// Gap-free daily series over the trailing window, ascending by date.
    ///
    /// A series from a successful fetch always has `window_days + 1`
    /// entries, one per calendar day through today, zero-filled where no
    /// operations occurred. A degraded or empty fetch yields an empty
    /// series instead, so callers can tell upstream unavailability apart
    /// from a genuinely quiet window.
    pub async fn growth_data(&self, window_days: u32) -> Vec<DailyBucket> {
        let now = Utc::now();
        let query = ListQuery::new(&self.contracts.acquisition_contract, BUY_ENTRYPOINT)
            .since(now - Duration::days(window_days as i64))
            .select("timestamp,amount")
            .limit(FETCH_CAP);

        let operations = match self.indexer.list(&query).await {
            Some(ops) if !ops.is_empty() => ops,
            _ => {
                debug!("Growth series degraded to empty (no data from indexer)");
                return Vec::new();
            }
        };

        // Pre-fill every day of the window so the series has no gaps
        let today = now.date_naive();
        let mut buckets: BTreeMap<NaiveDate, (u64, f64)> = (0..=window_days)
            .map(|offset| {
                let date = today - Duration::days((window_days - offset) as i64);
                (date, (0, 0.0))
            })
            .collect();

        for op in &operations {
            let Some(ts) = op.timestamp else { continue };
            if let Some((count, volume)) = buckets.get_mut(&ts.date_naive()) {
                *count += 1;
                *volume += mutez_to_tez(op.amount);
            }
        }

        buckets
            .into_iter()
            .map(|(date, (count, volume))| DailyBucket {
                date,
                label: date.format("%b %d").to_string(),
                count,
                volume: round2(volume),
            })
            .collect()
    }
}
