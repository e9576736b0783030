use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::shared::errors::AppError;

/// Entrypoint invoked by domain acquisition transactions.
pub const BUY_ENTRYPOINT: &str = "buy";
/// Entrypoint invoked by domain renewal transactions.
pub const RENEW_ENTRYPOINT: &str = "renew";

#[derive(Debug, Clone, Deserialize)]
pub struct IndexerCfg {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Fixed on-chain identifiers the aggregators query against. These are
/// configuration constants, not discovered at runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractsCfg {
    /// Registrar contract receiving acquisition (buy) transactions.
    pub acquisition_contract: String,
    /// Contract receiving renewal transactions.
    pub renewal_contract: String,
    /// Name-registry bigmap; its active key count approximates active holders.
    pub records_bigmap: u64,
    /// Namespace suffix appended to decoded labels, e.g. "tez".
    pub namespace: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollCfg {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_growth_window")]
    pub growth_window_days: u32,
    #[serde(default = "default_top_holders")]
    pub top_holders: usize,
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_growth_window() -> u32 {
    30
}

fn default_top_holders() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub indexer: IndexerCfg,
    pub contracts: ContractsCfg,
    pub poll: PollCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())?;
        let cfg: Self = toml::from_str(&s).context("parse config file")?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !self.indexer.base_url.starts_with("http") {
            return Err(AppError::Config(format!(
                "invalid indexer base url: {}",
                self.indexer.base_url
            )));
        }
        if self.poll.refresh_interval_secs == 0 {
            return Err(AppError::Config(
                "refresh interval must be at least 1 second".to_string(),
            ));
        }
        if self.poll.growth_window_days == 0 {
            return Err(AppError::Config(
                "growth window must cover at least 1 day".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indexer: IndexerCfg {
                base_url: "https://api.tzkt.io".to_string(),
                timeout_ms: default_timeout_ms(),
            },
            contracts: ContractsCfg {
                // Tezos Domains mainnet registrar, renewal contract and
                // name-records bigmap
                acquisition_contract: "KT191reDVKrLxU9rjTSxg53wRqj6zh8pnHgr".to_string(),
                renewal_contract: "KT1EVYBj3f1rZHNeUtq4ZvVxPTs77wuHwARU".to_string(),
                records_bigmap: 1264,
                namespace: "tez".to_string(),
            },
            poll: PollCfg {
                refresh_interval_secs: default_refresh_interval(),
                growth_window_days: default_growth_window(),
                top_holders: default_top_holders(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.poll.refresh_interval_secs, 30);
        assert_eq!(cfg.poll.growth_window_days, 30);
        assert_eq!(cfg.poll.top_holders, 10);
        assert_eq!(cfg.contracts.namespace, "tez");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
            [indexer]
            base_url = "https://api.ghostnet.tzkt.io"

            [contracts]
            acquisition_contract = "KT1buy"
            renewal_contract = "KT1renew"
            records_bigmap = 42
            namespace = "gho"

            [poll]
            refresh_interval_secs = 15
        "#;
        let cfg: Config = toml::from_str(toml).unwrap();
        assert_eq!(cfg.indexer.timeout_ms, 10_000); // default applied
        assert_eq!(cfg.poll.refresh_interval_secs, 15);
        assert_eq!(cfg.poll.growth_window_days, 30); // default applied
        assert_eq!(cfg.contracts.records_bigmap, 42);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = Config::default();
        cfg.indexer.base_url = "ftp://nope".to_string();
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.poll.refresh_interval_secs = 0;
        assert!(cfg.validate().is_err());
    }
}
