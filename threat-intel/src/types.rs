//! Vendor record shapes for the threat intelligence layer
//!
//! Field names and enum spellings follow the vendor's wire schema
//! (lowercase hyphenated indicator types, snake_case classification
//! values). Records are read-only once constructed; in fixture mode they
//! live for the process lifetime.

use chrono::{DateTime, Utc};
use common::Severity;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::IntelError;

/// Observable type of an indicator of compromise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorType {
    Ip,
    Domain,
    File,
    Url,
    #[serde(rename = "email-addr")]
    EmailAddr,
}

impl IndicatorType {
    pub const fn as_str(self) -> &'static str {
        match self {
            IndicatorType::Ip => "ip",
            IndicatorType::Domain => "domain",
            IndicatorType::File => "file",
            IndicatorType::Url => "url",
            IndicatorType::EmailAddr => "email-addr",
        }
    }

    pub const ALL: [IndicatorType; 5] = [
        IndicatorType::Ip,
        IndicatorType::Domain,
        IndicatorType::File,
        IndicatorType::Url,
        IndicatorType::EmailAddr,
    ];
}

/// Actor sophistication tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sophistication {
    Minimal,
    Intermediate,
    Advanced,
    Strategic,
}

/// Resourcing behind an actor or attributed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceLevel {
    Individual,
    Team,
    Organization,
    Government,
}

/// Primary motivation classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motivation {
    Espionage,
    FinancialGain,
    Ideology,
    Notoriety,
}

/// Confidence in a campaign-to-actor attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionScope {
    Confirmed,
    Suspected,
}

/// Known exploitation state of a vulnerability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExploitationState {
    Active,
    Poc,
    Unreported,
}

/// Attribution sub-record carried by some indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub actor: String,
    pub motivation: Motivation,
    pub sophistication: Sophistication,
    pub resource_level: ResourceLevel,
}

/// A single indicator of compromise.
///
/// Invariants: `confidence` is bounded to [0, 100] and `valid_until`, when
/// present, is never earlier than `valid_from`. `validate_record` enforces
/// both on vendor payloads.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ThreatIndicator {
    pub id: String,
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,
    pub value: String,
    pub valid_from: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    pub labels: Vec<String>,
    #[validate(range(min = 0, max = 100))]
    pub confidence: u8,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub malware_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<Attribution>,
}

impl ThreatIndicator {
    /// Full schema check: field bounds plus the validity-window ordering
    /// the derive cannot express.
    pub fn validate_record(&self) -> Result<(), IntelError> {
        self.validate()?;
        if let Some(until) = self.valid_until {
            if until < self.valid_from {
                return Err(IntelError::InvalidRecord {
                    id: self.id.clone(),
                    reason: format!(
                        "valid_until {} precedes valid_from {}",
                        until, self.valid_from
                    ),
                });
            }
        }
        Ok(())
    }
}

/// A tracked threat actor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ThreatActor {
    pub id: String,
    pub name: String,
    pub aliases: Vec<String>,
    pub sophistication: Sophistication,
    pub resource_level: ResourceLevel,
    pub primary_motivation: Motivation,
    pub associated_campaigns: Vec<String>,
    pub targeted_sectors: Vec<String>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A named intrusion campaign.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub description: String,
    pub attributed_to: Vec<String>,
    pub attribution_scope: AttributionScope,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    pub targeted_sectors: Vec<String>,
}

/// A tracked vulnerability.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Vulnerability {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[validate(range(min = 0.0, max = 10.0))]
    pub cvss_score: f32,
    pub exploitation_state: ExploitationState,
    pub affected_products: Vec<String>,
    pub published: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn indicator() -> ThreatIndicator {
        let now = Utc::now();
        ThreatIndicator {
            id: "indicator--test".to_string(),
            indicator_type: IndicatorType::Ip,
            value: "203.0.113.7".to_string(),
            valid_from: now - Duration::days(30),
            valid_until: Some(now + Duration::days(30)),
            labels: vec!["malicious-activity".to_string()],
            confidence: 80,
            severity: Severity::High,
            malware_family: None,
            threat_actor: None,
            campaign: None,
            first_seen: now - Duration::days(30),
            last_seen: now,
            source: "unit-test".to_string(),
            description: None,
            attribution: None,
        }
    }

    #[test]
    fn well_formed_indicator_passes_validation() {
        assert!(indicator().validate_record().is_ok());
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let mut bad = indicator();
        bad.confidence = 101;
        assert!(matches!(
            bad.validate_record(),
            Err(IntelError::Schema(_))
        ));
    }

    #[test]
    fn inverted_validity_window_is_rejected() {
        let mut bad = indicator();
        bad.valid_until = Some(bad.valid_from - Duration::days(1));
        assert!(matches!(
            bad.validate_record(),
            Err(IntelError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn indicator_type_uses_vendor_wire_spelling() {
        let json = serde_json::to_string(&IndicatorType::EmailAddr).unwrap();
        assert_eq!(json, "\"email-addr\"");
        let back: IndicatorType = serde_json::from_str("\"ip\"").unwrap();
        assert_eq!(back, IndicatorType::Ip);
    }
}
