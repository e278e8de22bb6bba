//! Core domain types for the DoseMate medication tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Medications and their dosing schedules
//! - Adherence log entries
//! - Dose exceptions (per-weekday skips)
//! - Materialized dose instances
//! - Notifications and health summaries

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Color tags assigned to medications, cycled in order as medications are added.
pub const COLOR_TAGS: &[&str] = &[
    "blue", "rose", "emerald", "amber", "purple", "cyan", "indigo",
];

/// Number of physical pillbox compartments.
pub const COMPARTMENT_COUNT: u8 = 7;

// ============================================================================
// Medication Types
// ============================================================================

/// Dosing frequency for a medication.
///
/// Only `Daily` is implemented; `Weekly` and `Custom` are accepted by the
/// data model but never produced by the add-medication flow.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Custom,
}

/// A medication with its recurring daily dose times and inventory
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dosage: String,
    /// Physical pillbox slot, 1..=7
    pub compartment: u8,
    pub frequency: Frequency,
    /// Zero-padded 24-hour "HH:mm" strings, in configured order
    pub times: Vec<String>,
    pub inventory: u32,
    pub total_capacity: u32,
    pub color_tag: String,
}

// ============================================================================
// Adherence Log Types
// ============================================================================

/// Outcome status of a scheduled dose
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AdherenceStatus {
    Taken,
    Missed,
    Snoozed,
    Pending,
}

/// A single entry in the append-only adherence log.
///
/// Entries are immutable once created and kept newest first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdherenceLog {
    pub id: Uuid,
    pub medication_id: String,
    /// Denormalized copy so log rows survive medication renames
    pub medication_name: String,
    pub scheduled_time: DateTime<Utc>,
    pub actual_time: Option<DateTime<Utc>>,
    pub status: AdherenceStatus,
    pub compartment: u8,
}

// ============================================================================
// Schedule Types
// ============================================================================

/// Suppresses one recurring dose on one specific weekday.
///
/// The underlying medication and its other occurrences are unaffected.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoseException {
    pub medication_id: String,
    /// "HH:mm" time of the suppressed dose
    pub time: String,
    /// Weekday index, 0 = Sunday .. 6 = Saturday
    pub day_index: u8,
}

/// A materialized dose instance: one medication at one time on the viewed day.
///
/// Derived by the schedule materializer, never stored.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DoseInstance {
    pub medication_id: String,
    pub name: String,
    pub dosage: String,
    pub compartment: u8,
    pub color_tag: String,
    /// "HH:mm" sort key; display formatting happens elsewhere
    pub dose_time: String,
}

impl DoseInstance {
    /// Build an instance from a medication and one of its dose times
    pub fn from_medication(med: &Medication, time: &str) -> Self {
        Self {
            medication_id: med.id.clone(),
            name: med.name.clone(),
            dosage: med.dosage.clone(),
            compartment: med.compartment,
            color_tag: med.color_tag.clone(),
            dose_time: time.to_string(),
        }
    }
}

// ============================================================================
// Notification Types
// ============================================================================

/// Severity/kind of a notification
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
}

/// An in-app notification, kept newest first
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub time: DateTime<Utc>,
    pub kind: NotificationKind,
    pub read: bool,
}

impl Notification {
    /// Create a fresh unread notification stamped with the given time
    pub fn new(title: &str, message: String, kind: NotificationKind, time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            message,
            time,
            kind,
            read: false,
        }
    }
}

// ============================================================================
// Summary Types
// ============================================================================

/// Rolled-up weekly adherence figures for the dashboard
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthSummary {
    /// Percentage of windowed entries with status Taken, 0..=100
    pub weekly_adherence: u8,
    pub missed_doses: usize,
    pub total_scheduled: usize,
}

// ============================================================================
// Draft / Form Types
// ============================================================================

/// Input for the add-medication operation.
///
/// Mirrors the add-medication form: name, dosage, compartment slot and
/// one to three daily dose times. Validation failure blocks creation,
/// there is no partial save.
#[derive(Clone, Debug, Default)]
pub struct MedicationDraft {
    pub name: String,
    pub dosage: String,
    pub compartment: u8,
    pub times: Vec<String>,
}

impl MedicationDraft {
    /// Validate the draft against the rules the form enforces
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("medication name must not be empty".into()));
        }
        if self.dosage.trim().is_empty() {
            return Err(Error::Validation("dosage must not be empty".into()));
        }
        if self.compartment < 1 || self.compartment > COMPARTMENT_COUNT {
            return Err(Error::Validation(format!(
                "compartment must be between 1 and {}, got {}",
                COMPARTMENT_COUNT, self.compartment
            )));
        }
        if self.times.is_empty() || self.times.len() > 3 {
            return Err(Error::Validation(format!(
                "expected 1 to 3 dose times, got {}",
                self.times.len()
            )));
        }
        for time in &self.times {
            crate::timefmt::parse_dose_time(time)?;
        }
        Ok(())
    }
}
