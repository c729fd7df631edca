//! Notification dispatch and recipient routing
//!
//! `NotificationService` renders each record and submits it through the
//! injected transport. Routing rules:
//!
//! - incidents: admins, plus the compliance officer for critical severity
//! - assessments: compliance officer, plus admins when non-compliant
//! - threat alerts: admins, plus the compliance officer for high/critical
//!
//! Every send reports a plain boolean. Transport failures are caught and
//! logged per call; a dispatcher whose transport never initialized
//! (missing SMTP credentials) short-circuits every send to `false`.

use std::sync::Arc;
use std::time::Duration;

use common::Severity;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::{RecipientConfig, RecipientUpdate, SmtpConfig};
use crate::errors::NotificationError;
use crate::templates::{RenderedEmail, TemplateEngine};
use crate::transport::{MailTransport, OutboundEmail, SmtpMailTransport};
use crate::types::{
    ComplianceAssessmentNotification, ComplianceStatus, IncidentNotification,
    NotificationPriority, ThreatIntelligenceAlert,
};

/// Delay before the startup self-test email.
const SELF_TEST_DELAY: Duration = Duration::from_secs(2);
const SELF_TEST_SUBJECT: &str = "Notification service self-test";

#[derive(Clone)]
pub struct NotificationService {
    recipients: Arc<RwLock<RecipientConfig>>,
    templates: Arc<TemplateEngine>,
    transport: Option<Arc<dyn MailTransport>>,
}

impl NotificationService {
    /// Dispatcher with an explicit configuration and transport.
    pub fn new(recipients: RecipientConfig, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            recipients: Arc::new(RwLock::new(recipients)),
            templates: Arc::new(TemplateEngine::new()),
            transport: Some(transport),
        }
    }

    /// Dispatcher from the process environment. Missing SMTP credentials
    /// are an initialization failure for this component only: the error is
    /// logged once and every subsequent send returns `false`.
    pub fn from_env() -> Self {
        let recipients = RecipientConfig::from_env();
        let transport: Option<Arc<dyn MailTransport>> = match SmtpConfig::from_env() {
            Some(smtp) => match SmtpMailTransport::new(&smtp) {
                Ok(transport) => {
                    info!(host = %smtp.host, port = smtp.port, "SMTP transport configured");
                    Some(Arc::new(transport))
                }
                Err(e) => {
                    error!(error = %e, "SMTP transport setup failed; notification dispatch disabled");
                    None
                }
            },
            None => {
                error!("SMTP credentials missing; notification dispatch disabled");
                None
            }
        };
        Self {
            recipients: Arc::new(RwLock::new(recipients)),
            templates: Arc::new(TemplateEngine::new()),
            transport,
        }
    }

    /// Whether the transport came up at startup.
    pub fn is_initialized(&self) -> bool {
        self.transport.is_some()
    }

    /// Schedule the fire-and-forget startup self-test: one email to the
    /// default address roughly two seconds from now. Failure is logged and
    /// neither surfaced nor retried.
    pub fn initialize(&self) {
        let service = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(SELF_TEST_DELAY).await;
            let recipient = service.recipients.read().await.default_address.clone();
            let delivered = service
                .send_custom_notification(
                    SELF_TEST_SUBJECT,
                    "Automated startup check of the security notification service.",
                    None,
                    Some(vec![recipient]),
                    NotificationPriority::Normal,
                )
                .await;
            if delivered {
                info!("startup self-test email submitted");
            } else {
                warn!("startup self-test email failed");
            }
        });
    }

    /// Merge-update the recipient configuration for this instance.
    pub async fn update_configuration(&self, update: RecipientUpdate) {
        let mut recipients = self.recipients.write().await;
        recipients.merge(update);
        info!("notification recipient configuration updated");
    }

    pub async fn current_configuration(&self) -> RecipientConfig {
        self.recipients.read().await.clone()
    }

    pub async fn send_incident_notification(&self, incident: &IncidentNotification) -> bool {
        let recipients = {
            let config = self.recipients.read().await;
            if incident.severity == Severity::Critical {
                with_compliance_officer(&config)
            } else {
                config.admin_addresses.clone()
            }
        };
        let rendered = match self.templates.render_incident(incident) {
            Ok(rendered) => rendered,
            Err(e) => {
                error!(incident_id = %incident.incident_id, error = %e, "incident render failed");
                return false;
            }
        };
        self.dispatch("incident", rendered, recipients).await
    }

    pub async fn send_compliance_assessment_notification(
        &self,
        assessment: &ComplianceAssessmentNotification,
    ) -> bool {
        let recipients = {
            let config = self.recipients.read().await;
            if assessment.compliance_status == ComplianceStatus::NonCompliant {
                with_compliance_officer(&config)
            } else {
                vec![config.compliance_officer.clone()]
            }
        };
        let rendered = match self.templates.render_assessment(assessment) {
            Ok(rendered) => rendered,
            Err(e) => {
                error!(
                    assessment_id = %assessment.assessment_id,
                    error = %e,
                    "assessment render failed"
                );
                return false;
            }
        };
        self.dispatch("compliance_assessment", rendered, recipients)
            .await
    }

    pub async fn send_threat_intelligence_alert(&self, alert: &ThreatIntelligenceAlert) -> bool {
        let recipients = {
            let config = self.recipients.read().await;
            if alert.severity >= Severity::High {
                with_compliance_officer(&config)
            } else {
                config.admin_addresses.clone()
            }
        };
        let rendered = match self.templates.render_threat_alert(alert) {
            Ok(rendered) => rendered,
            Err(e) => {
                error!(alert_id = %alert.alert_id, error = %e, "threat alert render failed");
                return false;
            }
        };
        self.dispatch("threat_alert", rendered, recipients).await
    }

    /// Free-form notification. Recipients default to the admin list;
    /// priority drives the subject prefix; plain content is wrapped in an
    /// HTML envelope unless `html` is supplied.
    pub async fn send_custom_notification(
        &self,
        subject: &str,
        content: &str,
        html: Option<String>,
        recipients: Option<Vec<String>>,
        priority: NotificationPriority,
    ) -> bool {
        let recipients = match recipients {
            Some(recipients) => recipients,
            None => self.recipients.read().await.admin_addresses.clone(),
        };
        let rendered = match self.templates.render_custom(subject, content, html, priority) {
            Ok(rendered) => rendered,
            Err(e) => {
                error!(subject, error = %e, "custom notification render failed");
                return false;
            }
        };
        self.dispatch("custom", rendered, recipients).await
    }

    /// Single submission path: one outbound transport call, errors caught
    /// and converted to `false`. Transient and permanent failures are
    /// treated identically.
    async fn dispatch(&self, kind: &str, rendered: RenderedEmail, to: Vec<String>) -> bool {
        let Some(transport) = &self.transport else {
            warn!(
                kind,
                error = %NotificationError::TransportUnavailable,
                "notification dropped"
            );
            return false;
        };

        let dispatch_id = Uuid::new_v4();
        let from = self.recipients.read().await.from_address.clone();
        let email = OutboundEmail {
            from,
            to,
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        };

        match transport.send(&email).await {
            Ok(()) => {
                info!(
                    %dispatch_id,
                    kind,
                    transport = transport.name(),
                    recipients = email.to.len(),
                    subject = %email.subject,
                    "notification submitted"
                );
                true
            }
            Err(e) => {
                error!(%dispatch_id, kind, error = %e, "notification dispatch failed");
                false
            }
        }
    }
}

/// Admin list plus the compliance officer, de-duplicated, order preserved.
fn with_compliance_officer(config: &RecipientConfig) -> Vec<String> {
    let mut recipients = config.admin_addresses.clone();
    if !recipients.contains(&config.compliance_officer) {
        recipients.push(config.compliance_officer.clone());
    }
    recipients
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compliance_officer_union_deduplicates() {
        let config = RecipientConfig {
            from_address: "noreply@x.test".to_string(),
            default_address: "team@x.test".to_string(),
            compliance_officer: "admin@x.test".to_string(),
            admin_addresses: vec!["admin@x.test".to_string(), "ops@x.test".to_string()],
        };
        assert_eq!(
            with_compliance_officer(&config),
            vec!["admin@x.test".to_string(), "ops@x.test".to_string()]
        );
    }
}
