//! Email rendering
//!
//! Each notification kind renders to one subject/HTML/text triple. The
//! HTML and plain-text bodies come from handlebars templates registered
//! once at engine construction; subjects are assembled directly. Values
//! are HTML-escaped in the HTML templates and emitted verbatim in the
//! text templates.

use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use serde_json::json;

use crate::errors::NotificationError;
use crate::types::{
    ComplianceAssessmentNotification, IncidentNotification, NotificationPriority,
    ThreatIntelligenceAlert,
};

/// A fully rendered outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

const INCIDENT_HTML: &str = r#"<div style="font-family: sans-serif; max-width: 640px;">
  <h2>Security Incident {{incident_id}}</h2>
  <p><strong>Severity:</strong> {{severity_label}}</p>
  <p><strong>Detected:</strong> {{detected_at}}</p>
  <p>{{description}}</p>
  <h3>Affected Systems</h3>
  <ul>
    {{#each affected_systems}}<li>{{this}}</li>
    {{/each}}
  </ul>
  {{#if nist_controls}}
  <p><strong>Related NIST controls:</strong> {{nist_control_list}}</p>
  {{/if}}
  <h3>Recommended Actions</h3>
  <ol>
    {{#each recommended_actions}}<li>{{this}}</li>
    {{/each}}
  </ol>
</div>"#;

const INCIDENT_TEXT: &str = r#"SECURITY INCIDENT {{{incident_id}}}

Severity: {{{severity_label}}}
Detected: {{{detected_at}}}

{{{description}}}

Affected systems:
{{#each affected_systems}}  - {{{this}}}
{{/each}}
{{#if nist_controls}}Related NIST controls: {{{nist_control_list}}}
{{/if}}
Recommended actions:
{{#each recommended_actions}}  {{inc @index}}. {{{this}}}
{{/each}}"#;

const ASSESSMENT_HTML: &str = r#"<div style="font-family: sans-serif; max-width: 640px;">
  <h2>Compliance Assessment: {{framework_name}}</h2>
  <p><strong>Status:</strong> {{status_label}}</p>
  <p><strong>Overall score:</strong> {{overall_score}}/100</p>
  <p><strong>Critical findings:</strong> {{critical_findings}}
     &nbsp;|&nbsp; <strong>High findings:</strong> {{high_findings}}</p>
  <p><strong>Completed:</strong> {{completed_at}}</p>
  <p><strong>Next assessment due:</strong> {{next_assessment_due}}</p>
  {{#if report_url}}
  <p><a href="{{report_url}}">View the full assessment report</a></p>
  {{/if}}
</div>"#;

const ASSESSMENT_TEXT: &str = r#"COMPLIANCE ASSESSMENT: {{{framework_name}}}

Assessment id: {{{assessment_id}}}
Status: {{{status_label}}}
Overall score: {{{overall_score}}}/100
Critical findings: {{{critical_findings}}}
High findings: {{{high_findings}}}
Completed: {{{completed_at}}}
Next assessment due: {{{next_assessment_due}}}
{{#if report_url}}
Full report: {{{report_url}}}
{{/if}}"#;

const THREAT_ALERT_HTML: &str = r#"<div style="font-family: sans-serif; max-width: 640px;">
  <h2>Threat Intelligence Alert {{alert_id}}</h2>
  <p><strong>Threat type:</strong> {{threat_type}}</p>
  <p><strong>Severity:</strong> {{severity_label}}</p>
  <p><strong>Detected:</strong> {{detected_at}}</p>
  <p>{{description}}</p>
  <h3>Indicators</h3>
  <ul>
    {{#each indicators}}<li><code>{{this}}</code></li>
    {{/each}}
  </ul>
  <p><strong>Source feeds:</strong> {{source_feed_list}}</p>
  <h3>Recommended Actions</h3>
  <ol>
    {{#each recommended_actions}}<li>{{this}}</li>
    {{/each}}
  </ol>
</div>"#;

const THREAT_ALERT_TEXT: &str = r#"THREAT INTELLIGENCE ALERT {{{alert_id}}}

Threat type: {{{threat_type}}}
Severity: {{{severity_label}}}
Detected: {{{detected_at}}}

{{{description}}}

Indicators:
{{#each indicators}}  - {{{this}}}
{{/each}}
Source feeds: {{{source_feed_list}}}

Recommended actions:
{{#each recommended_actions}}  {{inc @index}}. {{{this}}}
{{/each}}"#;

const CUSTOM_ENVELOPE_HTML: &str = r#"<div style="font-family: sans-serif; max-width: 640px;">
  <p>{{content}}</p>
</div>"#;

pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        // 1-based list numbering for the text bodies
        handlebars::handlebars_helper!(inc: |index: u64| index + 1);
        registry.register_helper("inc", Box::new(inc));

        for (name, template) in [
            ("incident_html", INCIDENT_HTML),
            ("incident_text", INCIDENT_TEXT),
            ("assessment_html", ASSESSMENT_HTML),
            ("assessment_text", ASSESSMENT_TEXT),
            ("threat_alert_html", THREAT_ALERT_HTML),
            ("threat_alert_text", THREAT_ALERT_TEXT),
            ("custom_envelope_html", CUSTOM_ENVELOPE_HTML),
        ] {
            registry
                .register_template_string(name, template)
                .expect("built-in template failed to register");
        }
        Self { registry }
    }

    pub fn render_incident(
        &self,
        incident: &IncidentNotification,
    ) -> Result<RenderedEmail, NotificationError> {
        let severity_label = incident.severity.as_str().to_uppercase();
        let context = json!({
            "incident_id": incident.incident_id,
            "severity_label": severity_label,
            "detected_at": format_timestamp(incident.detected_at),
            "description": incident.description,
            "affected_systems": incident.affected_systems,
            "nist_controls": incident.nist_controls,
            "nist_control_list": incident.nist_controls.join(", "),
            "recommended_actions": incident.recommended_actions,
        });
        Ok(RenderedEmail {
            subject: format!("[{severity_label}] Security Incident: {}", incident.title),
            html: self.registry.render("incident_html", &context)?,
            text: self.registry.render("incident_text", &context)?,
        })
    }

    pub fn render_assessment(
        &self,
        assessment: &ComplianceAssessmentNotification,
    ) -> Result<RenderedEmail, NotificationError> {
        let status_label = assessment.compliance_status.as_str().to_uppercase();
        let context = json!({
            "assessment_id": assessment.assessment_id,
            "framework_name": assessment.framework_name,
            "status_label": status_label,
            "overall_score": assessment.overall_score,
            "critical_findings": assessment.critical_findings,
            "high_findings": assessment.high_findings,
            "completed_at": format_timestamp(assessment.completed_at),
            "next_assessment_due": format_timestamp(assessment.next_assessment_due),
            "report_url": assessment.report_url,
        });
        Ok(RenderedEmail {
            subject: format!(
                "Compliance Assessment: {} ({status_label})",
                assessment.framework_name
            ),
            html: self.registry.render("assessment_html", &context)?,
            text: self.registry.render("assessment_text", &context)?,
        })
    }

    pub fn render_threat_alert(
        &self,
        alert: &ThreatIntelligenceAlert,
    ) -> Result<RenderedEmail, NotificationError> {
        let severity_label = alert.severity.as_str().to_uppercase();
        let context = json!({
            "alert_id": alert.alert_id,
            "threat_type": alert.threat_type,
            "severity_label": severity_label,
            "detected_at": format_timestamp(alert.detected_at),
            "description": alert.description,
            "indicators": alert.indicators,
            "source_feed_list": alert.source_feeds.join(", "),
            "recommended_actions": alert.recommended_actions,
        });
        Ok(RenderedEmail {
            subject: format!(
                "[{severity_label}] Threat Intelligence Alert: {}",
                alert.threat_type
            ),
            html: self.registry.render("threat_alert_html", &context)?,
            text: self.registry.render("threat_alert_text", &context)?,
        })
    }

    /// Custom sends: subject gets the priority prefix; plain content is
    /// wrapped in a minimal HTML envelope unless the caller supplies its
    /// own HTML body.
    pub fn render_custom(
        &self,
        subject: &str,
        content: &str,
        html: Option<String>,
        priority: NotificationPriority,
    ) -> Result<RenderedEmail, NotificationError> {
        let html = match html {
            Some(html) => html,
            None => self
                .registry
                .render("custom_envelope_html", &json!({ "content": content }))?,
        };
        Ok(RenderedEmail {
            subject: format!("{}{subject}", priority.subject_prefix()),
            html,
            text: content.to_string(),
        })
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
