//! Common types used across the application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Class of a normalized on-chain event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Acquisition,
    Renewal,
    Transfer,
}

impl EventKind {
    /// Short tag used to prefix event identifiers so ids stay unique
    /// across merged sources.
    pub fn tag(&self) -> &'static str {
        match self {
            EventKind::Acquisition => "buy",
            EventKind::Renewal => "renew",
            EventKind::Transfer => "transfer",
        }
    }
}

/// Normalized activity feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: String,
    pub kind: EventKind,
    /// Decoded domain name including the namespace suffix, "unknown" when
    /// the label could not be recovered.
    pub name: String,
    pub address: String,
    pub timestamp: DateTime<Utc>,
    /// Amount in whole tez.
    pub amount: f64,
}

/// One calendar day of registration activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    /// Short display label, e.g. "Aug 30".
    pub label: String,
    pub count: u64,
    /// Volume in whole tez, rounded to two decimals.
    pub volume: f64,
}

/// Address paired with an occurrence count, for leaderboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRanking {
    pub address: String,
    pub count: u64,
}

/// Integer metric with an optional percentage change against the
/// immediately preceding equal-length window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub value: u64,
    pub change: Option<f64>,
}

impl Metric {
    pub fn new(value: u64, change: Option<f64>) -> Self {
        Self { value, change }
    }

    /// A metric with no prior-period baseline (all-time totals, gauges).
    pub fn absolute(value: u64) -> Self {
        Self { value, change: None }
    }
}

/// Headline statistics for one refresh cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// All-time acquisition count.
    pub total_registrations: Metric,
    /// Acquisitions in the trailing 24h window.
    pub new_24h: Metric,
    /// Renewals in the trailing 24h window.
    pub renewals_24h: Metric,
    /// Active keys in the name registry, a proxy for active holders.
    pub active_names: Metric,
}

/// Complete derived state of one refresh cycle. Replaced wholesale on
/// every poll; never mutated in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub stats: StatsSnapshot,
    pub activity: Vec<ActivityEvent>,
    pub growth: Vec<DailyBucket>,
    pub top_holders: Vec<AddressRanking>,
    pub refreshed_at: Option<DateTime<Utc>>,
}
