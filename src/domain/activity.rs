//! Unified activity feed over acquisitions and renewals

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::config::{ContractsCfg, BUY_ENTRYPOINT, RENEW_ENTRYPOINT};
use crate::infrastructure::indexer::{IndexerApi, ListQuery, Operation};
use crate::shared::types::{ActivityEvent, EventKind};
use crate::shared::utils::{decode_hex_label, looks_like_hex, mutez_to_tez};

const FEED_LIMIT: usize = 15;
const RENEWAL_FETCH_LIMIT: u32 = 10;

/// Placeholder name when a label cannot be recovered from the payload.
const UNKNOWN_LABEL: &str = "unknown";

/// Shape of the label embedded in an entrypoint parameter payload.
///
/// Acquisitions nest a hex label under `value.label`; renewals may use the
/// same nesting or carry a bare value that is either hex or already
/// human-readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelPayload {
    Hex(String),
    Plain(String),
    Missing,
}

impl LabelPayload {
    /// Classify the parameter payload without decoding anything.
    pub fn classify(parameter: Option<&Value>) -> Self {
        let Some(value) = parameter.and_then(|p| p.get("value")) else {
            return LabelPayload::Missing;
        };
        let label = match value.get("label").and_then(Value::as_str) {
            Some(nested) => nested,
            None => match value.as_str() {
                Some(bare) => bare,
                None => return LabelPayload::Missing,
            },
        };
        if looks_like_hex(label) {
            LabelPayload::Hex(label.to_string())
        } else if !label.is_empty() {
            LabelPayload::Plain(label.to_string())
        } else {
            LabelPayload::Missing
        }
    }

    /// Resolve to a bare label, decoding hex and falling back to the
    /// sentinel when nothing usable is present.
    pub fn resolve(&self) -> String {
        match self {
            LabelPayload::Hex(raw) => decode_hex_label(raw),
            LabelPayload::Plain(label) => label.clone(),
            LabelPayload::Missing => UNKNOWN_LABEL.to_string(),
        }
    }
}

/// Fetches acquisitions and renewals and merges them into one
/// time-sorted, capped feed.
pub struct ActivityMerger {
    indexer: Arc<dyn IndexerApi>,
    contracts: ContractsCfg,
}

impl ActivityMerger {
    pub fn new(indexer: Arc<dyn IndexerApi>, contracts: ContractsCfg) -> Self {
        Self { indexer, contracts }
    }

    /// The 15 most recent events across both transaction classes,
    /// descending by timestamp. A failed source contributes zero events.
    pub async fn recent_activity(&self) -> Vec<ActivityEvent> {
        let buys_q = ListQuery::new(&self.contracts.acquisition_contract, BUY_ENTRYPOINT)
            .limit(FEED_LIMIT as u32);
        let renewals_q = ListQuery::new(&self.contracts.renewal_contract, RENEW_ENTRYPOINT)
            .limit(RENEWAL_FETCH_LIMIT);

        let (buys, renewals) = futures::join!(
            self.indexer.list(&buys_q),
            self.indexer.list(&renewals_q),
        );

        let mut events: Vec<ActivityEvent> = Vec::new();
        for op in buys.unwrap_or_default() {
            events.push(self.normalize(&op, EventKind::Acquisition));
        }
        for op in renewals.unwrap_or_default() {
            events.push(self.normalize(&op, EventKind::Renewal));
        }

        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events.truncate(FEED_LIMIT);

        debug!("Activity feed: {} events after merge", events.len());
        events
    }

    fn normalize(&self, op: &Operation, kind: EventKind) -> ActivityEvent {
        let label = LabelPayload::classify(op.parameter.as_ref()).resolve();
        ActivityEvent {
            id: format!("{}-{}", kind.tag(), op.id),
            kind,
            name: format!("{}.{}", label, self.contracts.namespace),
            address: op.sender_address().unwrap_or_default().to_string(),
            timestamp: op.timestamp.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            amount: mutez_to_tez(op.amount),
        }
    }
}
