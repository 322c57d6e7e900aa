//! Configuration management
//!
//! Reads the explorer endpoint and HTTP settings from environment variables.

use anyhow::{anyhow, Context, Result};
use bitcoin::Network;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::batch::DEFAULT_BATCH_SIZE;

pub const DEFAULT_API_URL: &str = "https://test-insight.bitpay.com/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root, always ending in `/`
    pub api_url: String,
    pub network: Network,
    pub batch_size: usize,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            network: Network::Testnet,
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load from `EXPLORER_*` variables, falling back to the public testnet explorer.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("EXPLORER_API_URL") {
            config.api_url = with_trailing_slash(url.trim());
        }

        if let Some(network) = lookup("EXPLORER_NETWORK") {
            config.network = Network::from_str(network.trim())
                .with_context(|| format!("Invalid EXPLORER_NETWORK '{}'", network))?;
        }

        if let Some(size) = lookup("EXPLORER_BATCH_SIZE") {
            let size: usize = size
                .trim()
                .parse()
                .with_context(|| format!("Invalid EXPLORER_BATCH_SIZE '{}'", size))?;
            if size == 0 {
                return Err(anyhow!("EXPLORER_BATCH_SIZE must be at least 1"));
            }
            config.batch_size = size;
        }

        if let Some(secs) = lookup("EXPLORER_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid EXPLORER_TIMEOUT_SECS '{}'", secs))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Single-address endpoint, e.g. `.../api/addr/`
    pub fn address_url(&self) -> String {
        format!("{}addr/", self.api_url)
    }

    /// Transaction endpoint, e.g. `.../api/tx/`
    pub fn tx_url(&self) -> String {
        format!("{}tx/", self.api_url)
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ClientConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(
            config.address_url(),
            "https://test-insight.bitpay.com/api/addr/"
        );
        assert_eq!(config.tx_url(), "https://test-insight.bitpay.com/api/tx/");
    }

    #[test]
    fn overrides_from_env() {
        let config = load(&[
            ("EXPLORER_API_URL", "http://localhost:3001/insight-api"),
            ("EXPLORER_NETWORK", "bitcoin"),
            ("EXPLORER_BATCH_SIZE", "5"),
            ("EXPLORER_TIMEOUT_SECS", "30"),
        ])
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:3001/insight-api/");
        assert_eq!(config.network, Network::Bitcoin);
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(load(&[("EXPLORER_BATCH_SIZE", "0")]).is_err());
        assert!(load(&[("EXPLORER_BATCH_SIZE", "many")]).is_err());
        assert!(load(&[("EXPLORER_NETWORK", "moonnet")]).is_err());
        assert!(load(&[("EXPLORER_TIMEOUT_SECS", "-1")]).is_err());
    }
}
