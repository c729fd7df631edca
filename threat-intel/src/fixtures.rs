//! Embedded demo dataset
//!
//! Served whenever no vendor credential is configured, and as the fallback
//! when a vendor call fails. The records are built once on first access;
//! `first_seen`/`last_seen` offsets are anchored to that moment so the
//! recency operations stay meaningful for a long-running process.

use chrono::{Duration, Utc};
use common::Severity;
use once_cell::sync::Lazy;

use crate::types::{
    Attribution, AttributionScope, Campaign, ExploitationState, IndicatorType, Motivation,
    ResourceLevel, Sophistication, ThreatActor, ThreatIndicator, Vulnerability,
};

static DEMO_INDICATORS: Lazy<Vec<ThreatIndicator>> = Lazy::new(|| {
    let now = Utc::now();
    vec![
        ThreatIndicator {
            id: "indicator--demo-0001".to_string(),
            indicator_type: IndicatorType::Ip,
            value: "185.220.101.45".to_string(),
            valid_from: now - Duration::days(45),
            valid_until: Some(now + Duration::days(45)),
            labels: vec!["malicious-activity".to_string(), "c2".to_string()],
            confidence: 85,
            severity: Severity::High,
            malware_family: Some("WellMess".to_string()),
            threat_actor: Some("APT29".to_string()),
            campaign: None,
            first_seen: now - Duration::days(45),
            last_seen: now - Duration::days(2),
            source: "demo-feed".to_string(),
            description: Some(
                "Command and control endpoint observed in targeted intrusions \
                 against government networks."
                    .to_string(),
            ),
            attribution: Some(Attribution {
                actor: "APT29".to_string(),
                motivation: Motivation::Espionage,
                sophistication: Sophistication::Advanced,
                resource_level: ResourceLevel::Government,
            }),
        },
        ThreatIndicator {
            id: "indicator--demo-0002".to_string(),
            indicator_type: IndicatorType::File,
            value: "32519b85c0b422e4656de6e6c41878e95fd95026267daab4215ee59c107d6c77"
                .to_string(),
            valid_from: now - Duration::days(400),
            valid_until: None,
            labels: vec!["malicious-activity".to_string(), "backdoor".to_string()],
            confidence: 95,
            severity: Severity::Critical,
            malware_family: Some("SUNBURST".to_string()),
            threat_actor: Some("APT29".to_string()),
            campaign: Some("SolarWinds Supply Chain Compromise".to_string()),
            first_seen: now - Duration::days(400),
            last_seen: now - Duration::days(5),
            source: "demo-feed".to_string(),
            description: Some(
                "Trojanized build artifact delivering a staged backdoor through \
                 a compromised software update channel."
                    .to_string(),
            ),
            attribution: Some(Attribution {
                actor: "APT29".to_string(),
                motivation: Motivation::Espionage,
                sophistication: Sophistication::Strategic,
                resource_level: ResourceLevel::Government,
            }),
        },
        ThreatIndicator {
            id: "indicator--demo-0003".to_string(),
            indicator_type: IndicatorType::Url,
            value: "http://secure-login-portal.example.net/verify".to_string(),
            valid_from: now - Duration::days(30),
            valid_until: Some(now + Duration::days(14)),
            labels: vec!["phishing".to_string()],
            confidence: 60,
            severity: Severity::Medium,
            malware_family: None,
            threat_actor: None,
            campaign: None,
            first_seen: now - Duration::days(30),
            last_seen: now - Duration::days(21),
            source: "demo-feed".to_string(),
            description: Some(
                "Credential phishing landing page impersonating a university \
                 single sign-on portal."
                    .to_string(),
            ),
            attribution: None,
        },
    ]
});

static DEMO_THREAT_ACTORS: Lazy<Vec<ThreatActor>> = Lazy::new(|| {
    let now = Utc::now();
    vec![
        ThreatActor {
            id: "threat-actor--demo-0001".to_string(),
            name: "APT29".to_string(),
            aliases: vec![
                "Cozy Bear".to_string(),
                "The Dukes".to_string(),
                "NOBELIUM".to_string(),
            ],
            sophistication: Sophistication::Strategic,
            resource_level: ResourceLevel::Government,
            primary_motivation: Motivation::Espionage,
            associated_campaigns: vec!["SolarWinds Supply Chain Compromise".to_string()],
            targeted_sectors: vec![
                "government".to_string(),
                "education".to_string(),
                "technology".to_string(),
            ],
            first_seen: now - Duration::days(4000),
            last_seen: now - Duration::days(5),
            description: Some(
                "State-sponsored intrusion set focused on long-term espionage \
                 against diplomatic and research targets."
                    .to_string(),
            ),
        },
        ThreatActor {
            id: "threat-actor--demo-0002".to_string(),
            name: "FIN7".to_string(),
            aliases: vec!["Carbanak Group".to_string(), "Carbon Spider".to_string()],
            sophistication: Sophistication::Advanced,
            resource_level: ResourceLevel::Organization,
            primary_motivation: Motivation::FinancialGain,
            associated_campaigns: vec!["Hospitality Sector Intrusions".to_string()],
            targeted_sectors: vec![
                "retail".to_string(),
                "hospitality".to_string(),
                "finance".to_string(),
            ],
            first_seen: now - Duration::days(3000),
            last_seen: now - Duration::days(60),
            description: Some(
                "Financially motivated group known for point-of-sale compromises \
                 and large-scale card-data theft."
                    .to_string(),
            ),
        },
        ThreatActor {
            id: "threat-actor--demo-0003".to_string(),
            name: "Lazarus Group".to_string(),
            aliases: vec!["Hidden Cobra".to_string(), "Zinc".to_string()],
            sophistication: Sophistication::Advanced,
            resource_level: ResourceLevel::Government,
            primary_motivation: Motivation::FinancialGain,
            associated_campaigns: vec![],
            targeted_sectors: vec![
                "finance".to_string(),
                "cryptocurrency".to_string(),
                "defense".to_string(),
            ],
            first_seen: now - Duration::days(4500),
            last_seen: now - Duration::days(30),
            description: Some(
                "State-aligned group blending espionage operations with \
                 revenue-generating theft."
                    .to_string(),
            ),
        },
    ]
});

static DEMO_CAMPAIGNS: Lazy<Vec<Campaign>> = Lazy::new(|| {
    let now = Utc::now();
    vec![
        Campaign {
            id: "campaign--demo-0001".to_string(),
            name: "SolarWinds Supply Chain Compromise".to_string(),
            description: "Compromise of a widely deployed IT management product's \
                          build pipeline to distribute a backdoored update."
                .to_string(),
            attributed_to: vec!["APT29".to_string(), "NOBELIUM".to_string()],
            attribution_scope: AttributionScope::Confirmed,
            first_seen: now - Duration::days(2000),
            last_seen: now - Duration::days(1600),
            objective: Some("Long-term access to government and enterprise networks".to_string()),
            targeted_sectors: vec!["government".to_string(), "technology".to_string()],
        },
        Campaign {
            id: "campaign--demo-0002".to_string(),
            name: "Hospitality Sector Intrusions".to_string(),
            description: "Spear-phishing waves against hotel chains leading to \
                          payment-system compromise."
                .to_string(),
            attributed_to: vec!["FIN7".to_string()],
            attribution_scope: AttributionScope::Suspected,
            first_seen: now - Duration::days(300),
            last_seen: now - Duration::days(90),
            objective: Some("Card-data theft at scale".to_string()),
            targeted_sectors: vec!["hospitality".to_string(), "retail".to_string()],
        },
    ]
});

static DEMO_VULNERABILITIES: Lazy<Vec<Vulnerability>> = Lazy::new(|| {
    let now = Utc::now();
    vec![
        Vulnerability {
            id: "CVE-2023-23397".to_string(),
            title: "Microsoft Outlook elevation of privilege".to_string(),
            description: "Crafted calendar invites leak Net-NTLMv2 hashes without \
                          user interaction."
                .to_string(),
            severity: Severity::Critical,
            cvss_score: 9.8,
            exploitation_state: ExploitationState::Active,
            affected_products: vec!["Microsoft Outlook for Windows".to_string()],
            published: now - Duration::days(500),
            remediation: Some("Apply the March 2023 security update".to_string()),
        },
        Vulnerability {
            id: "CVE-2024-3400".to_string(),
            title: "PAN-OS GlobalProtect command injection".to_string(),
            description: "Unauthenticated command injection in the GlobalProtect \
                          gateway allows root-level code execution."
                .to_string(),
            severity: Severity::Critical,
            cvss_score: 10.0,
            exploitation_state: ExploitationState::Active,
            affected_products: vec!["Palo Alto Networks PAN-OS".to_string()],
            published: now - Duration::days(120),
            remediation: Some("Upgrade to a fixed PAN-OS release".to_string()),
        },
        Vulnerability {
            id: "CVE-2023-4863".to_string(),
            title: "WebP heap buffer overflow".to_string(),
            description: "Malformed WebP images trigger a heap overflow in the \
                          libwebp decoder embedded in browsers and messengers."
                .to_string(),
            severity: Severity::High,
            cvss_score: 8.8,
            exploitation_state: ExploitationState::Active,
            affected_products: vec!["libwebp".to_string(), "Chromium-based browsers".to_string()],
            published: now - Duration::days(320),
            remediation: Some("Update affected applications to patched builds".to_string()),
        },
    ]
});

pub fn demo_indicators() -> &'static [ThreatIndicator] {
    &DEMO_INDICATORS
}

pub fn demo_threat_actors() -> &'static [ThreatActor] {
    &DEMO_THREAT_ACTORS
}

pub fn demo_campaigns() -> &'static [Campaign] {
    &DEMO_CAMPAIGNS
}

pub fn demo_vulnerabilities() -> &'static [Vulnerability] {
    &DEMO_VULNERABILITIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_indicators_satisfy_schema() {
        for indicator in demo_indicators() {
            indicator
                .validate_record()
                .unwrap_or_else(|e| panic!("{} invalid: {e}", indicator.id));
        }
    }

    #[test]
    fn demo_set_has_expected_composition() {
        assert_eq!(demo_indicators().len(), 3);
        let critical = demo_indicators()
            .iter()
            .filter(|i| i.severity == Severity::Critical)
            .count();
        assert_eq!(critical, 1);
        let apt29 = demo_indicators()
            .iter()
            .filter(|i| i.threat_actor.as_deref() == Some("APT29"))
            .count();
        assert_eq!(apt29, 2);
    }
}
