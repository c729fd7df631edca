#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, future_incompatible)]
//! Threat Intelligence Provider
//!
//! Exposes a uniform, asynchronous read interface over either a configured
//! vendor API or an embedded set of demo records (indicators, threat
//! actors, campaigns, vulnerabilities), plus in-memory search, filter, and
//! analytics operations. The active source is selected once at
//! construction; callers never branch on which one is live.

pub mod errors;
pub mod fixtures;
pub mod service;
pub mod source;
pub mod types;

pub use errors::IntelError;
pub use service::{AnalyticsSummary, ThreatIntelService};
pub use source::{FixtureSource, IntelSource, LiveSource};
pub use types::{
    Attribution, AttributionScope, Campaign, ExploitationState, IndicatorType, Motivation,
    ResourceLevel, Sophistication, ThreatActor, ThreatIndicator, Vulnerability,
};
