//! Outbound mail transport seam
//!
//! `MailTransport` is the channel boundary the dispatcher talks to; the
//! production implementation submits over SMTP via lettre. Test doubles
//! implement the same trait.

use async_trait::async_trait;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::config::SmtpConfig;
use crate::errors::NotificationError;

/// One rendered email, addressed and ready to submit.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Channel seam between the dispatcher and the wire.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Submit the message to every recipient. One network request per
    /// call from the dispatcher's perspective; no retry, no queueing.
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotificationError>;

    fn name(&self) -> &str;
}

/// SMTP relay transport over lettre's async client.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotificationError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();
        Ok(Self { transport })
    }

    fn build_message(
        email: &OutboundEmail,
        recipient: &str,
    ) -> Result<Message, NotificationError> {
        let message = Message::builder()
            .from(email.from.parse()?)
            .to(recipient.parse()?)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))?;
        Ok(message)
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotificationError> {
        for recipient in &email.to {
            let message = Self::build_message(email, recipient)?;
            self.transport.send(message).await?;
            debug!(%recipient, subject = %email.subject, "message submitted");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "smtp"
    }
}
