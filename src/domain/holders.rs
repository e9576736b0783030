//! Top-holder leaderboard from acquisition senders

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::{ContractsCfg, BUY_ENTRYPOINT};
use crate::infrastructure::indexer::{IndexerApi, ListQuery};
use crate::shared::types::AddressRanking;

const FETCH_CAP: u32 = 10_000;

/// Tallies acquisition counts per sender address and ranks the top-K.
pub struct LeaderboardRanker {
    indexer: Arc<dyn IndexerApi>,
    contracts: ContractsCfg,
}

impl LeaderboardRanker {
    pub fn new(indexer: Arc<dyn IndexerApi>, contracts: ContractsCfg) -> Self {
        Self { indexer, contracts }
    }

    /// Top `k` addresses by acquisition count, descending. Ties break by
    /// ascending address so the ordering is deterministic. Operations with
    /// missing sender data are excluded.
    pub async fn top_holders(&self, k: usize) -> Vec<AddressRanking> {
        let query = ListQuery::new(&self.contracts.acquisition_contract, BUY_ENTRYPOINT)
            .select("sender")
            .limit(FETCH_CAP);

        let operations = self.indexer.list(&query).await.unwrap_or_default();

        let mut tally: HashMap<String, u64> = HashMap::new();
        for op in &operations {
            if let Some(address) = op.sender_address() {
                *tally.entry(address.to_string()).or_insert(0) += 1;
            }
        }

        let mut rankings: Vec<AddressRanking> = tally
            .into_iter()
            .map(|(address, count)| AddressRanking { address, count })
            .collect();
        rankings.sort_by(|a, b| b.count.cmp(&a.count).then(a.address.cmp(&b.address)));
        rankings.truncate(k);

        debug!("Leaderboard: {} ranked addresses", rankings.len());
        rankings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::infrastructure::indexer::{CountQuery, Operation, OperationSender};
    use async_trait::async_trait;

    struct StubIndexer {
        operations: Option<Vec<Operation>>,
    }

    #[async_trait]
    impl IndexerApi for StubIndexer {
        async fn count(&self, _query: &CountQuery) -> u64 {
            0
        }

        async fn list(&self, _query: &ListQuery) -> Option<Vec<Operation>> {
            self.operations.clone()
        }

        async fn active_keys(&self, _bigmap_id: u64) -> u64 {
            0
        }
    }

    fn ranker(operations: Option<Vec<Operation>>) -> LeaderboardRanker {
        LeaderboardRanker::new(
            Arc::new(StubIndexer { operations }),
            Config::default().contracts,
        )
    }

    fn sent_by(address: &str) -> Operation {
        Operation {
            sender: Some(OperationSender {
                address: Some(address.to_string()),
                alias: None,
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_ranks_descending_by_count() {
        let mut ops = Vec::new();
        ops.extend((0..12).map(|_| sent_by("tz1xxx")));
        ops.extend((0..9).map(|_| sent_by("tz1yyy")));

        let rankings = ranker(Some(ops)).top_holders(10).await;
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings[0], AddressRanking { address: "tz1xxx".to_string(), count: 12 });
        assert_eq!(rankings[1], AddressRanking { address: "tz1yyy".to_string(), count: 9 });
    }

    #[tokio::test]
    async fn test_ties_break_by_address() {
        let ops = vec![sent_by("tz1bbb"), sent_by("tz1aaa"), sent_by("tz1ccc")];
        let rankings = ranker(Some(ops)).top_holders(10).await;

        let addresses: Vec<&str> = rankings.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, vec!["tz1aaa", "tz1bbb", "tz1ccc"]);
    }

    #[tokio::test]
    async fn test_truncates_to_k() {
        let ops: Vec<Operation> = (0..20).map(|i| sent_by(&format!("tz1addr{:02}", i))).collect();
        let rankings = ranker(Some(ops)).top_holders(10).await;

        assert_eq!(rankings.len(), 10);
        for pair in rankings.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
    }

    #[tokio::test]
    async fn test_missing_senders_are_excluded() {
        let ops = vec![sent_by("tz1zzz"), Operation::default()];
        let rankings = ranker(Some(ops)).top_holders(10).await;

        assert_eq!(rankings.len(), 1);
        assert_eq!(rankings[0].address, "tz1zzz");
    }

    #[tokio::test]
    async fn test_degraded_fetch_yields_empty_leaderboard() {
        assert!(ranker(None).top_holders(10).await.is_empty());
    }
}
