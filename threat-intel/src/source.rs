//! Intel source seam
//!
//! Two variants implement the same read contract and are selected once at
//! construction: `FixtureSource` serves the embedded demo records, and
//! `LiveSource` attempts the vendor API and falls back to the same demo
//! records on any failure. Callers never branch on which one is active.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use validator::Validate;

use crate::errors::IntelError;
use crate::fixtures;
use crate::types::{Campaign, ThreatActor, ThreatIndicator, Vulnerability};

const VENDOR_TIMEOUT_SECS: u64 = 30;

/// Uniform read contract over vendor data or fixtures.
#[async_trait]
pub trait IntelSource: Send + Sync {
    async fn indicators(&self) -> Vec<ThreatIndicator>;
    async fn threat_actors(&self) -> Vec<ThreatActor>;
    async fn campaigns(&self) -> Vec<Campaign>;
    async fn vulnerabilities(&self) -> Vec<Vulnerability>;

    /// Whether a vendor credential backs this source.
    fn is_live(&self) -> bool;
}

/// Embedded demo records; the unconfigured default.
#[derive(Debug, Default, Clone)]
pub struct FixtureSource;

impl FixtureSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IntelSource for FixtureSource {
    async fn indicators(&self) -> Vec<ThreatIndicator> {
        fixtures::demo_indicators().to_vec()
    }

    async fn threat_actors(&self) -> Vec<ThreatActor> {
        fixtures::demo_threat_actors().to_vec()
    }

    async fn campaigns(&self) -> Vec<Campaign> {
        fixtures::demo_campaigns().to_vec()
    }

    async fn vulnerabilities(&self) -> Vec<Vulnerability> {
        fixtures::demo_vulnerabilities().to_vec()
    }

    fn is_live(&self) -> bool {
        false
    }
}

/// Credentialed vendor client.
///
/// Every read attempts the vendor endpoint, schema-validates the payload,
/// and on any error logs a warning and serves the demo fixtures instead —
/// indistinguishable to the caller from the unconfigured state.
pub struct LiveSource {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl LiveSource {
    pub fn new(api_key: String, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(VENDOR_TIMEOUT_SECS))
            .user_agent("platform-threat-intel/0.1")
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            api_key,
            base_url,
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, IntelError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        debug!(%url, "querying vendor intel API");
        let records: Vec<T> = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(records)
    }

    async fn fetch_indicators(&self) -> Result<Vec<ThreatIndicator>, IntelError> {
        let records: Vec<ThreatIndicator> = self.fetch_json("v1/indicators").await?;
        for record in &records {
            record.validate_record()?;
        }
        Ok(records)
    }

    async fn fetch_validated<T>(&self, path: &str) -> Result<Vec<T>, IntelError>
    where
        T: DeserializeOwned + Validate,
    {
        let records: Vec<T> = self.fetch_json(path).await?;
        for record in &records {
            record.validate()?;
        }
        Ok(records)
    }
}

#[async_trait]
impl IntelSource for LiveSource {
    async fn indicators(&self) -> Vec<ThreatIndicator> {
        match self.fetch_indicators().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "vendor indicator query failed; serving demo fixtures");
                fixtures::demo_indicators().to_vec()
            }
        }
    }

    async fn threat_actors(&self) -> Vec<ThreatActor> {
        match self.fetch_validated("v1/threat-actors").await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "vendor threat-actor query failed; serving demo fixtures");
                fixtures::demo_threat_actors().to_vec()
            }
        }
    }

    async fn campaigns(&self) -> Vec<Campaign> {
        match self.fetch_validated("v1/campaigns").await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "vendor campaign query failed; serving demo fixtures");
                fixtures::demo_campaigns().to_vec()
            }
        }
    }

    async fn vulnerabilities(&self) -> Vec<Vulnerability> {
        match self.fetch_validated("v1/vulnerabilities").await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "vendor vulnerability query failed; serving demo fixtures");
                fixtures::demo_vulnerabilities().to_vec()
            }
        }
    }

    fn is_live(&self) -> bool {
        true
    }
}
