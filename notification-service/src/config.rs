//! Dispatcher configuration
//!
//! Recipient addressing and SMTP credentials are read from the process
//! environment at startup. Recipient configuration is injected into each
//! dispatcher instance and can be merge-updated at runtime; address syntax
//! is not validated here — a bad address surfaces as a per-send transport
//! failure like any other.

use common::{env_list, env_or, env_parse};
use serde::{Deserialize, Serialize};

const FROM_ADDRESS_VAR: &str = "NOTIFY_FROM_ADDRESS";
const DEFAULT_ADDRESS_VAR: &str = "NOTIFY_DEFAULT_ADDRESS";
const COMPLIANCE_OFFICER_VAR: &str = "NOTIFY_COMPLIANCE_OFFICER";
const ADMIN_ADDRESSES_VAR: &str = "NOTIFY_ADMIN_ADDRESSES";

/// Recipient addressing for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientConfig {
    pub from_address: String,
    /// Fallback address; also receives the startup self-test.
    pub default_address: String,
    pub compliance_officer: String,
    pub admin_addresses: Vec<String>,
}

impl Default for RecipientConfig {
    fn default() -> Self {
        Self {
            from_address: "security-alerts@platform.example.com".to_string(),
            default_address: "security-team@platform.example.com".to_string(),
            compliance_officer: "compliance@platform.example.com".to_string(),
            admin_addresses: vec!["admin@platform.example.com".to_string()],
        }
    }
}

impl RecipientConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            from_address: env_or(FROM_ADDRESS_VAR, &defaults.from_address),
            default_address: env_or(DEFAULT_ADDRESS_VAR, &defaults.default_address),
            compliance_officer: env_or(COMPLIANCE_OFFICER_VAR, &defaults.compliance_officer),
            admin_addresses: env_list(ADMIN_ADDRESSES_VAR).unwrap_or(defaults.admin_addresses),
        }
    }

    /// Merge update: every `Some` field replaces the current value, `None`
    /// fields are left untouched.
    pub fn merge(&mut self, update: RecipientUpdate) {
        if let Some(from_address) = update.from_address {
            self.from_address = from_address;
        }
        if let Some(default_address) = update.default_address {
            self.default_address = default_address;
        }
        if let Some(compliance_officer) = update.compliance_officer {
            self.compliance_officer = compliance_officer;
        }
        if let Some(admin_addresses) = update.admin_addresses {
            self.admin_addresses = admin_addresses;
        }
    }
}

/// Partial recipient configuration for runtime merge updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipientUpdate {
    pub from_address: Option<String>,
    pub default_address: Option<String>,
    pub compliance_officer: Option<String>,
    pub admin_addresses: Option<Vec<String>>,
}

/// SMTP transport credentials.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl SmtpConfig {
    /// Read credentials from the environment. Host, username, and password
    /// are required; a missing one yields `None`, which the dispatcher
    /// treats as a component-level initialization failure.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;
        let username = std::env::var("SMTP_USERNAME").ok()?;
        let password = std::env::var("SMTP_PASSWORD").ok()?;
        Some(Self {
            host,
            port: env_parse("SMTP_PORT", 587),
            username,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_replaces_only_supplied_fields() {
        let mut config = RecipientConfig::default();
        let original_from = config.from_address.clone();

        config.merge(RecipientUpdate {
            compliance_officer: Some("legal@platform.example.com".to_string()),
            admin_addresses: Some(vec![
                "ops-1@platform.example.com".to_string(),
                "ops-2@platform.example.com".to_string(),
            ]),
            ..RecipientUpdate::default()
        });

        assert_eq!(config.from_address, original_from);
        assert_eq!(config.compliance_officer, "legal@platform.example.com");
        assert_eq!(config.admin_addresses.len(), 2);
    }

    #[test]
    fn empty_merge_is_a_no_op() {
        let mut config = RecipientConfig::default();
        let before = config.clone();
        config.merge(RecipientUpdate::default());
        assert_eq!(config, before);
    }
}
