//! Threat intelligence read operations
//!
//! `ThreatIntelService` wraps the active source with the search, filter,
//! recency, and analytics operations the dashboards consume. All
//! operations are asynchronous and non-mutating; nothing here holds
//! cross-call state.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use common::{env_or, Severity};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::source::{FixtureSource, IntelSource, LiveSource};
use crate::types::{Campaign, IndicatorType, ThreatActor, ThreatIndicator, Vulnerability};

const API_KEY_VAR: &str = "THREAT_INTEL_API_KEY";
const API_URL_VAR: &str = "THREAT_INTEL_API_URL";
const DEFAULT_API_URL: &str = "https://intel.vendor.example.com/api";

/// Default result cap for `search_indicators`.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;
/// Default window for `recent_indicators`, in days.
pub const DEFAULT_RECENT_DAYS: i64 = 30;

/// Aggregated dashboard counts over the active source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_indicators: usize,
    pub total_threat_actors: usize,
    pub total_campaigns: usize,
    pub total_vulnerabilities: usize,
    pub severity_breakdown: BTreeMap<String, usize>,
    pub type_breakdown: BTreeMap<String, usize>,
    pub indicators_last_7_days: usize,
    pub critical_vulnerabilities: usize,
    pub top_threat_actors: Vec<String>,
    pub active_campaigns: usize,
    pub api_configured: bool,
}

/// Read facade over the selected intel source.
pub struct ThreatIntelService {
    source: Box<dyn IntelSource>,
}

impl ThreatIntelService {
    /// Select the source from the environment: `THREAT_INTEL_API_KEY`
    /// present means the live vendor client, otherwise the demo fixtures.
    /// The choice is made once and logged.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty());
        match api_key {
            Some(key) => {
                let base_url = env_or(API_URL_VAR, DEFAULT_API_URL);
                info!(%base_url, "vendor intel API configured; using live source");
                Self::with_source(Box::new(LiveSource::new(key, base_url)))
            }
            None => {
                info!("no vendor intel credential configured; serving demo fixtures");
                Self::with_source(Box::new(FixtureSource::new()))
            }
        }
    }

    pub fn with_source(source: Box<dyn IntelSource>) -> Self {
        Self { source }
    }

    pub fn api_configured(&self) -> bool {
        self.source.is_live()
    }

    pub async fn indicators(&self) -> Vec<ThreatIndicator> {
        self.source.indicators().await
    }

    pub async fn threat_actors(&self) -> Vec<ThreatActor> {
        self.source.threat_actors().await
    }

    pub async fn campaigns(&self) -> Vec<Campaign> {
        self.source.campaigns().await
    }

    pub async fn vulnerabilities(&self) -> Vec<Vulnerability> {
        self.source.vulnerabilities().await
    }

    /// Case-insensitive substring search across indicator value,
    /// description, attributed actor, and malware family. Results keep the
    /// source order (no ranking) and are capped at `limit`
    /// (`DEFAULT_SEARCH_LIMIT` when `None`).
    pub async fn search_indicators(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Vec<ThreatIndicator> {
        let needle = query.to_lowercase();
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        self.source
            .indicators()
            .await
            .into_iter()
            .filter(|i| indicator_matches(i, &needle))
            .take(limit)
            .collect()
    }

    pub async fn indicators_by_type(&self, indicator_type: IndicatorType) -> Vec<ThreatIndicator> {
        self.source
            .indicators()
            .await
            .into_iter()
            .filter(|i| i.indicator_type == indicator_type)
            .collect()
    }

    pub async fn indicators_by_severity(&self, severity: Severity) -> Vec<ThreatIndicator> {
        self.source
            .indicators()
            .await
            .into_iter()
            .filter(|i| i.severity == severity)
            .collect()
    }

    /// Case-insensitive match against actor name or any alias; first match
    /// wins.
    pub async fn threat_actor_by_name(&self, name: &str) -> Option<ThreatActor> {
        let needle = name.to_lowercase();
        self.source.threat_actors().await.into_iter().find(|actor| {
            actor.name.to_lowercase() == needle
                || actor.aliases.iter().any(|a| a.to_lowercase() == needle)
        })
    }

    /// Campaigns whose attribution list mentions `actor_name`
    /// (case-insensitive substring per entry).
    pub async fn campaigns_by_actor(&self, actor_name: &str) -> Vec<Campaign> {
        let needle = actor_name.to_lowercase();
        self.source
            .campaigns()
            .await
            .into_iter()
            .filter(|c| {
                c.attributed_to
                    .iter()
                    .any(|a| a.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub async fn vulnerabilities_by_severity(&self, severity: Severity) -> Vec<Vulnerability> {
        self.source
            .vulnerabilities()
            .await
            .into_iter()
            .filter(|v| v.severity == severity)
            .collect()
    }

    /// Indicators seen within the trailing `days` window
    /// (`DEFAULT_RECENT_DAYS` when `None`). A record exactly `days` old is
    /// included.
    pub async fn recent_indicators(&self, days: Option<i64>) -> Vec<ThreatIndicator> {
        let days = days.unwrap_or(DEFAULT_RECENT_DAYS);
        let cutoff = Utc::now() - Duration::days(days);
        self.source
            .indicators()
            .await
            .into_iter()
            .filter(|i| i.last_seen >= cutoff)
            .collect()
    }

    /// Aggregate counts for the dashboard overview.
    pub async fn analytics_summary(&self) -> AnalyticsSummary {
        let indicators = self.source.indicators().await;
        let actors = self.source.threat_actors().await;
        let campaigns = self.source.campaigns().await;
        let vulnerabilities = self.source.vulnerabilities().await;

        let now = Utc::now();
        let week_cutoff = now - Duration::days(7);
        let year_cutoff = now - Duration::days(365);

        let mut severity_breakdown: BTreeMap<String, usize> = Severity::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        for indicator in &indicators {
            *severity_breakdown
                .entry(indicator.severity.as_str().to_string())
                .or_default() += 1;
        }

        let mut type_breakdown: BTreeMap<String, usize> = IndicatorType::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), 0))
            .collect();
        for indicator in &indicators {
            *type_breakdown
                .entry(indicator.indicator_type.as_str().to_string())
                .or_default() += 1;
        }

        AnalyticsSummary {
            total_indicators: indicators.len(),
            total_threat_actors: actors.len(),
            total_campaigns: campaigns.len(),
            total_vulnerabilities: vulnerabilities.len(),
            severity_breakdown,
            type_breakdown,
            indicators_last_7_days: indicators
                .iter()
                .filter(|i| i.last_seen >= week_cutoff)
                .count(),
            critical_vulnerabilities: vulnerabilities
                .iter()
                .filter(|v| v.severity == Severity::Critical)
                .count(),
            top_threat_actors: actors.iter().take(5).map(|a| a.name.clone()).collect(),
            active_campaigns: campaigns
                .iter()
                .filter(|c| c.last_seen >= year_cutoff)
                .count(),
            api_configured: self.source.is_live(),
        }
    }
}

fn indicator_matches(indicator: &ThreatIndicator, needle: &str) -> bool {
    let field_matches = |field: &str| field.to_lowercase().contains(needle);
    field_matches(&indicator.value)
        || indicator.description.as_deref().is_some_and(field_matches)
        || indicator.threat_actor.as_deref().is_some_and(field_matches)
        || indicator
            .malware_family
            .as_deref()
            .is_some_and(field_matches)
}
