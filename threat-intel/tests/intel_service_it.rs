//! Integration tests for the threat intelligence read operations

use async_trait::async_trait;
use chrono::{Duration, Utc};
use common::Severity;
use threat_intel::{
    fixtures, Campaign, FixtureSource, IndicatorType, IntelSource, LiveSource, ThreatActor,
    ThreatIndicator, ThreatIntelService, Vulnerability,
};

fn fixture_service() -> ThreatIntelService {
    ThreatIntelService::with_source(Box::new(FixtureSource::new()))
}

/// Source serving a caller-supplied indicator list, for boundary tests.
struct StaticSource {
    indicators: Vec<ThreatIndicator>,
}

#[async_trait]
impl IntelSource for StaticSource {
    async fn indicators(&self) -> Vec<ThreatIndicator> {
        self.indicators.clone()
    }

    async fn threat_actors(&self) -> Vec<ThreatActor> {
        Vec::new()
    }

    async fn campaigns(&self) -> Vec<Campaign> {
        Vec::new()
    }

    async fn vulnerabilities(&self) -> Vec<Vulnerability> {
        Vec::new()
    }

    fn is_live(&self) -> bool {
        false
    }
}

fn indicator_seen(id: &str, last_seen: chrono::DateTime<Utc>) -> ThreatIndicator {
    let mut indicator = fixtures::demo_indicators()[0].clone();
    indicator.id = id.to_string();
    indicator.first_seen = last_seen - Duration::days(10);
    indicator.last_seen = last_seen;
    indicator
}

#[tokio::test]
async fn search_returns_exactly_the_apt29_attributed_indicators() {
    let service = fixture_service();

    let hits = service.search_indicators("apt29", None).await;
    let ids: Vec<&str> = hits.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["indicator--demo-0001", "indicator--demo-0002"]);
}

#[tokio::test]
async fn search_is_case_insensitive_and_respects_limit() {
    let service = fixture_service();

    let upper = service.search_indicators("APT29", None).await;
    assert_eq!(upper.len(), 2);

    let capped = service.search_indicators("apt29", Some(1)).await;
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].id, "indicator--demo-0001");
}

#[tokio::test]
async fn search_covers_value_description_and_malware_family() {
    let service = fixture_service();

    // value substring
    assert_eq!(service.search_indicators("185.220", None).await.len(), 1);
    // malware family
    assert_eq!(service.search_indicators("sunburst", None).await.len(), 1);
    // description substring
    assert_eq!(
        service.search_indicators("sign-on portal", None).await.len(),
        1
    );
    // no match
    assert!(service.search_indicators("emotet", None).await.is_empty());
}

#[tokio::test]
async fn severity_filter_returns_the_single_critical_demo_indicator() {
    let service = fixture_service();

    let critical = service.indicators_by_severity(Severity::Critical).await;
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].id, "indicator--demo-0002");

    let low = service.indicators_by_severity(Severity::Low).await;
    assert!(low.is_empty());
}

#[tokio::test]
async fn type_filter_is_exact() {
    let service = fixture_service();

    let ips = service.indicators_by_type(IndicatorType::Ip).await;
    assert_eq!(ips.len(), 1);
    assert_eq!(ips[0].value, "185.220.101.45");

    let emails = service.indicators_by_type(IndicatorType::EmailAddr).await;
    assert!(emails.is_empty());
}

#[tokio::test]
async fn recent_window_includes_the_boundary() {
    let now = Utc::now();
    let service = ThreatIntelService::with_source(Box::new(StaticSource {
        indicators: vec![
            // comfortably inside the 7-day window
            indicator_seen("inside", now - Duration::days(7) + Duration::minutes(5)),
            // just past it
            indicator_seen("outside", now - Duration::days(7) - Duration::minutes(5)),
        ],
    }));

    let recent = service.recent_indicators(Some(7)).await;
    let ids: Vec<&str> = recent.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["inside"]);
}

#[tokio::test]
async fn recent_defaults_to_thirty_days_over_fixtures() {
    let service = fixture_service();

    // demo last_seen offsets: 2, 5, and 21 days
    assert_eq!(service.recent_indicators(None).await.len(), 3);
    assert_eq!(service.recent_indicators(Some(7)).await.len(), 2);
    assert_eq!(service.recent_indicators(Some(1)).await.len(), 0);
}

#[tokio::test]
async fn actor_lookup_matches_aliases_case_insensitively() {
    let service = fixture_service();

    let by_alias = service.threat_actor_by_name("cozy bear").await.unwrap();
    assert_eq!(by_alias.name, "APT29");

    let by_name = service.threat_actor_by_name("fin7").await.unwrap();
    assert_eq!(by_name.name, "FIN7");

    assert!(service.threat_actor_by_name("unknown actor").await.is_none());
}

#[tokio::test]
async fn campaigns_by_actor_matches_attribution_entries() {
    let service = fixture_service();

    let apt29 = service.campaigns_by_actor("apt29").await;
    assert_eq!(apt29.len(), 1);
    assert_eq!(apt29[0].name, "SolarWinds Supply Chain Compromise");

    let fin7 = service.campaigns_by_actor("FIN7").await;
    assert_eq!(fin7.len(), 1);
    assert_eq!(fin7[0].name, "Hospitality Sector Intrusions");

    assert!(service.campaigns_by_actor("lazarus").await.is_empty());
}

#[tokio::test]
async fn vulnerability_severity_filter_is_exact() {
    let service = fixture_service();

    let critical = service.vulnerabilities_by_severity(Severity::Critical).await;
    assert_eq!(critical.len(), 2);

    let high = service.vulnerabilities_by_severity(Severity::High).await;
    assert_eq!(high.len(), 1);
    assert_eq!(high[0].id, "CVE-2023-4863");
}

#[tokio::test]
async fn analytics_summary_reflects_the_demo_dataset() {
    let service = fixture_service();
    let summary = service.analytics_summary().await;

    assert!(!summary.api_configured);
    assert_eq!(summary.total_indicators, fixtures::demo_indicators().len());
    assert_eq!(summary.total_threat_actors, 3);
    assert_eq!(summary.total_campaigns, 2);
    assert_eq!(summary.total_vulnerabilities, 3);
    assert_eq!(summary.indicators_last_7_days, 2);
    assert_eq!(summary.critical_vulnerabilities, 2);
    assert_eq!(summary.active_campaigns, 1);
    assert_eq!(
        summary.top_threat_actors,
        vec!["APT29", "FIN7", "Lazarus Group"]
    );

    assert_eq!(summary.severity_breakdown["critical"], 1);
    assert_eq!(summary.severity_breakdown["high"], 1);
    assert_eq!(summary.severity_breakdown["medium"], 1);
    assert_eq!(summary.severity_breakdown["low"], 0);

    assert_eq!(summary.type_breakdown["ip"], 1);
    assert_eq!(summary.type_breakdown["file"], 1);
    assert_eq!(summary.type_breakdown["url"], 1);
    assert_eq!(summary.type_breakdown["domain"], 0);
    assert_eq!(summary.type_breakdown["email-addr"], 0);
}

#[tokio::test]
async fn analytics_summary_serializes_for_the_dashboard() {
    let service = fixture_service();
    let summary = service.analytics_summary().await;

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["api_configured"], serde_json::json!(false));
    assert_eq!(json["severity_breakdown"]["critical"], serde_json::json!(1));
}

#[tokio::test]
async fn live_source_falls_back_to_fixtures_on_vendor_failure() {
    // Nothing listens here; the vendor call fails fast and the source must
    // serve the demo records instead of surfacing an error.
    let source = LiveSource::new(
        "demo-key".to_string(),
        "http://127.0.0.1:9".to_string(),
    );
    let service = ThreatIntelService::with_source(Box::new(source));

    let indicators = service.indicators().await;
    assert_eq!(indicators.len(), fixtures::demo_indicators().len());

    // The credential is still reported as configured; only log lines
    // distinguish the fallback from live data.
    assert!(service.api_configured());
    assert!(service.analytics_summary().await.api_configured);
}
