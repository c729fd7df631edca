#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, future_incompatible)]
//! Common types and utilities shared by the platform services
//!
//! This crate provides the severity scale used across notification and
//! threat-intelligence records, plus the environment-variable helpers the
//! service constructors use to read their configuration.

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
