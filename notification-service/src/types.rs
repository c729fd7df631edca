//! Notification payload records
//!
//! Records are immutable once constructed: a caller builds one, the
//! dispatcher renders and submits it, and the record is discarded. Nothing
//! is persisted.

use chrono::{DateTime, Utc};
use common::Severity;
use serde::{Deserialize, Serialize};

/// A detected security incident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentNotification {
    pub incident_id: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    /// Ordered; rendered in the order supplied.
    pub affected_systems: Vec<String>,
    pub detected_at: DateTime<Utc>,
    /// NIST SP 800-53 control identifiers referenced by the incident.
    pub nist_controls: Vec<String>,
    /// Ordered; rendered in the order supplied.
    pub recommended_actions: Vec<String>,
}

/// Outcome of a compliance framework assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceAssessmentNotification {
    pub assessment_id: String,
    pub framework_id: String,
    pub framework_name: String,
    /// 0–100.
    pub overall_score: u8,
    pub compliance_status: ComplianceStatus,
    pub critical_findings: u32,
    pub high_findings: u32,
    pub completed_at: DateTime<Utc>,
    pub next_assessment_due: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    Partial,
    NonCompliant,
}

impl ComplianceStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::Partial => "partial",
            ComplianceStatus::NonCompliant => "non_compliant",
        }
    }

    pub const ALL: [ComplianceStatus; 3] = [
        ComplianceStatus::Compliant,
        ComplianceStatus::Partial,
        ComplianceStatus::NonCompliant,
    ];
}

/// An alert raised from threat intelligence correlation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatIntelligenceAlert {
    pub alert_id: String,
    pub threat_type: String,
    pub severity: Severity,
    pub indicators: Vec<String>,
    pub description: String,
    pub source_feeds: Vec<String>,
    pub detected_at: DateTime<Utc>,
    pub recommended_actions: Vec<String>,
}

/// Priority for custom notifications; controls the subject prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    #[default]
    Normal,
    High,
    Critical,
}

impl NotificationPriority {
    /// Subject prefix, empty for normal priority.
    pub const fn subject_prefix(self) -> &'static str {
        match self {
            NotificationPriority::Normal => "",
            NotificationPriority::High => "[HIGH] ",
            NotificationPriority::Critical => "[CRITICAL] ",
        }
    }
}
