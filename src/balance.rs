//! Balance lookup against an esplora-style address API
//!
//! One HTTP GET per lookup, no retries, no caching: the service is a
//! single fixed collaborator and the caller decides what to do when it
//! is unreachable.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Default address index, matching the mempool.space API
pub const DEFAULT_API_BASE: &str = "https://mempool.space/api";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to reach balance service: {0}")]
    Network(#[from] reqwest::Error),

    #[error("balance service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },

    #[error("malformed balance service response: {0}")]
    Decode(String),
}

/// Funded and spent totals for an address, in satoshis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSummary {
    pub funded_sat: u64,
    pub spent_sat: u64,
}

impl BalanceSummary {
    /// An address counts as active once anything has ever funded it
    pub fn has_activity(&self) -> bool {
        self.funded_sat > 0
    }
}

/// Lookup seam between the session controller and the transport
pub trait AddressLookup {
    fn lookup(&self, address: &str) -> Result<BalanceSummary, LookupError>;
}

/// Expected response shape; unknown fields are ignored
#[derive(Debug, Deserialize)]
struct AddressStats {
    #[serde(default)]
    address: String,
    chain_stats: ChainStats,
}

#[derive(Debug, Deserialize)]
struct ChainStats {
    funded_txo_sum: u64,
    spent_txo_sum: u64,
}

/// HTTP client for the address API
pub struct BalanceClient {
    base: String,
    client: Client,
}

impl BalanceClient {
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("braincheck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetch funded/spent totals for an address
    ///
    /// Exactly one request; a timeout surfaces as a network error.
    pub async fn lookup(&self, address: &str) -> Result<BalanceSummary, LookupError> {
        let url = format!("{}/address/{}", self.base, address);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LookupError::Service {
                status: status.as_u16(),
                body,
            });
        }

        decode_summary(&body)
    }
}

/// Decode a response body into a balance summary
fn decode_summary(body: &str) -> Result<BalanceSummary, LookupError> {
    let stats: AddressStats =
        serde_json::from_str(body).map_err(|e| LookupError::Decode(e.to_string()))?;

    if !stats.address.is_empty() {
        log::debug!("balance response for {}", stats.address);
    }

    Ok(BalanceSummary {
        funded_sat: stats.chain_stats.funded_txo_sum,
        spent_sat: stats.chain_stats.spent_txo_sum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funded_address_maps_to_activity() {
        let body = r#"{"chain_stats":{"funded_txo_sum":5000,"spent_txo_sum":0}}"#;
        let summary = decode_summary(body).unwrap();

        assert!(summary.has_activity());
        assert_eq!(summary.funded_sat, 5000);
        assert_eq!(summary.spent_sat, 0);
    }

    #[test]
    fn test_untouched_address_has_no_activity() {
        let body = r#"{"chain_stats":{"funded_txo_sum":0,"spent_txo_sum":0}}"#;
        let summary = decode_summary(body).unwrap();

        assert!(!summary.has_activity());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // Real responses carry more than we read
        let body = r#"{
            "address": "1JwSSubhmg6iPtRjtyqhUYYH7bZg3Lfy1T",
            "chain_stats": {
                "funded_txo_sum": 12345,
                "spent_txo_sum": 12345,
                "tx_count": 42
            },
            "mempool_stats": {"funded_txo_sum": 0}
        }"#;
        let summary = decode_summary(body).unwrap();

        assert_eq!(summary.funded_sat, 12345);
        assert_eq!(summary.spent_sat, 12345);
    }

    #[test]
    fn test_malformed_body_is_a_decode_error() {
        assert!(matches!(
            decode_summary("not json"),
            Err(LookupError::Decode(_))
        ));
        assert!(matches!(
            decode_summary(r#"{"chain_stats":{}}"#),
            Err(LookupError::Decode(_))
        ));
    }
}
