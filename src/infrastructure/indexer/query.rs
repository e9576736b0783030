//! Operation model and query builders for the indexer's filter syntax

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

/// Sender of an applied transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationSender {
    pub address: Option<String>,
    pub alias: Option<String>,
}

/// A single applied transaction record as returned by the indexer.
///
/// Every field is optional or defaulted: list queries with a `select`
/// projection return only the requested fields and the model has to
/// deserialize those rows too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub id: u64,
    pub sender: Option<OperationSender>,
    pub timestamp: Option<DateTime<Utc>>,
    /// Amount in mutez.
    #[serde(default)]
    pub amount: u64,
    /// Entrypoint-specific payload; may embed a hex-encoded label.
    pub parameter: Option<serde_json::Value>,
}

impl Operation {
    pub fn sender_address(&self) -> Option<&str> {
        self.sender
            .as_ref()
            .and_then(|s| s.address.as_deref())
            .filter(|a| !a.is_empty())
    }
}

fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Filters for a transaction count query. Always restricted to applied
/// (successfully executed) transactions.
#[derive(Debug, Clone)]
pub struct CountQuery {
    pub target: String,
    pub entrypoint: String,
    /// Inclusive lower bound on the timestamp.
    pub since: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the timestamp.
    pub until: Option<DateTime<Utc>>,
}

impl CountQuery {
    pub fn new(target: impl Into<String>, entrypoint: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            entrypoint: entrypoint.into(),
            since: None,
            until: None,
        }
    }

    pub fn since(mut self, ts: DateTime<Utc>) -> Self {
        self.since = Some(ts);
        self
    }

    pub fn until(mut self, ts: DateTime<Utc>) -> Self {
        self.until = Some(ts);
        self
    }

    /// Query-string parameters in the indexer's filter syntax.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("target".to_string(), self.target.clone()),
            ("entrypoint".to_string(), self.entrypoint.clone()),
            ("status".to_string(), "applied".to_string()),
        ];
        if let Some(since) = &self.since {
            params.push(("timestamp.ge".to_string(), fmt_ts(since)));
        }
        if let Some(until) = &self.until {
            params.push(("timestamp.lt".to_string(), fmt_ts(until)));
        }
        params
    }
}

/// Filters for a transaction list query.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub target: String,
    pub entrypoint: String,
    pub since: Option<DateTime<Utc>>,
    pub limit: u32,
    /// Field to sort by, descending.
    pub sort_desc: String,
    /// Comma-separated field projection, full records when absent.
    pub select: Option<String>,
}

impl ListQuery {
    pub fn new(target: impl Into<String>, entrypoint: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            entrypoint: entrypoint.into(),
            since: None,
            limit: 100,
            sort_desc: "id".to_string(),
            select: None,
        }
    }

    pub fn since(mut self, ts: DateTime<Utc>) -> Self {
        self.since = Some(ts);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn sort_desc(mut self, field: impl Into<String>) -> Self {
        self.sort_desc = field.into();
        self
    }

    pub fn select(mut self, fields: impl Into<String>) -> Self {
        self.select = Some(fields.into());
        self
    }

    /// Query-string parameters in the indexer's filter syntax.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("target".to_string(), self.target.clone()),
            ("entrypoint".to_string(), self.entrypoint.clone()),
            ("status".to_string(), "applied".to_string()),
        ];
        if let Some(since) = &self.since {
            params.push(("timestamp.ge".to_string(), fmt_ts(since)));
        }
        params.push(("limit".to_string(), self.limit.to_string()));
        params.push(("sort.desc".to_string(), self.sort_desc.clone()));
        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.clone()));
        }
        params
    }
}
