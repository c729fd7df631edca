//! Error types for notification dispatch
//!
//! These stay internal to the crate: the dispatcher catches every variant,
//! logs it, and reports a boolean failure to the caller. Transient and
//! permanent transport failures are deliberately not distinguished.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("mail transport is not configured")]
    TransportUnavailable,

    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp submission failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("transport rejected message: {0}")]
    Transport(String),
}
