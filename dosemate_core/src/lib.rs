#![forbid(unsafe_code)]

//! Core domain model and business logic for the DoseMate medication tracker.
//!
//! This crate provides:
//! - Domain types (medications, adherence log, exceptions, notifications)
//! - The owned application store with its mutation entry points
//! - Adherence aggregation over a rolling 7-day window
//! - Schedule materialization with per-weekday dose exceptions
//! - The health-insight request guard
//! - Seed data, configuration and logging

pub mod types;
pub mod error;
pub mod clock;
pub mod timefmt;
pub mod adherence;
pub mod schedule;
pub mod store;
pub mod insight;
pub mod seed;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use clock::{Clock, FixedClock, SystemClock};
pub use timefmt::{format_display_time, parse_dose_time, TimeFormat};
pub use adherence::{adherence_rate, daily_breakdown, health_summary, DayAdherence};
pub use schedule::materialize;
pub use store::Store;
pub use insight::{InsightProvider, InsightRequest, InsightSnapshot, StaticInsight};
pub use seed::{build_demo_store, quote_of_the_day};
pub use config::Config;
