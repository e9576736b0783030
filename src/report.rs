// src/report.rs
use serde::Serialize;
use chrono::{DateTime, Utc};

use crate::shared::types::{
    ActivityEvent, AddressRanking, DailyBucket, DashboardSnapshot, Metric, StatsSnapshot,
};

/// Serializable view of one refresh cycle, for the terminal or JSON output.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub stats: StatsSnapshot,
    pub activity: Vec<ActivityEvent>,
    pub growth: Vec<DailyBucket>,
    pub top_holders: Vec<AddressRanking>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl DashboardReport {
    pub fn new(snapshot: DashboardSnapshot) -> Self {
        Self {
            stats: snapshot.stats,
            activity: snapshot.activity,
            growth: snapshot.growth,
            top_holders: snapshot.top_holders,
            refreshed_at: snapshot.refreshed_at,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text rendering for the terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("== Domain stats ==\n");
        out.push_str(&format!(
            "  Total registrations: {}\n",
            fmt_metric(&self.stats.total_registrations)
        ));
        out.push_str(&format!("  New (24h):           {}\n", fmt_metric(&self.stats.new_24h)));
        out.push_str(&format!(
            "  Renewals (24h):      {}\n",
            fmt_metric(&self.stats.renewals_24h)
        ));
        out.push_str(&format!(
            "  Active names:        {}\n",
            fmt_metric(&self.stats.active_names)
        ));

        out.push_str("\n== Recent activity ==\n");
        if self.activity.is_empty() {
            out.push_str("  (no data)\n");
        }
        for event in &self.activity {
            out.push_str(&format!(
                "  {} {:<12} {:<30} {:>10.2} tez  {}\n",
                event.timestamp.format("%Y-%m-%d %H:%M"),
                event.kind.tag(),
                event.name,
                event.amount,
                event.address,
            ));
        }

        out.push_str("\n== Registrations per day ==\n");
        if self.growth.is_empty() {
            out.push_str("  (no data)\n");
        }
        for bucket in &self.growth {
            out.push_str(&format!(
                "  {:<8} {:>5}  {:>12.2} tez\n",
                bucket.label, bucket.count, bucket.volume
            ));
        }

        out.push_str("\n== Top holders ==\n");
        if self.top_holders.is_empty() {
            out.push_str("  (no data)\n");
        }
        for (rank, holder) in self.top_holders.iter().enumerate() {
            out.push_str(&format!(
                "  {:>2}. {:<40} {}\n",
                rank + 1,
                holder.address,
                holder.count
            ));
        }

        if let Some(ts) = &self.refreshed_at {
            out.push_str(&format!("\nrefreshed at {}\n", ts.to_rfc3339()));
        }
        out
    }
}

fn fmt_metric(metric: &Metric) -> String {
    match metric.change {
        Some(change) => format!("{} ({:+.1}%)", metric.value, change),
        None => metric.value.to_string(),
    }
}
