#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, future_incompatible)]
//! Notification Dispatcher
//!
//! Formats structured incident, compliance-assessment, and threat-alert
//! records into subject/HTML/text email triples and submits them to an
//! outbound SMTP transport, selecting recipients by severity or status.
//! Every public send operation reports success as a plain boolean; no
//! transport failure propagates to callers.

pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod templates;
pub mod transport;
pub mod types;

pub use config::{RecipientConfig, RecipientUpdate, SmtpConfig};
pub use dispatcher::NotificationService;
pub use errors::NotificationError;
pub use templates::{RenderedEmail, TemplateEngine};
pub use transport::{MailTransport, OutboundEmail, SmtpMailTransport};
pub use types::{
    ComplianceAssessmentNotification, ComplianceStatus, IncidentNotification,
    NotificationPriority, ThreatIntelligenceAlert,
};
