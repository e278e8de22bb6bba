//! Health-insight collaborator interface and request guard state.
//!
//! The insight collaborator receives snapshots of the medication set and
//! adherence log and returns a natural-language advisory string. It lives
//! outside this core; the store only tracks an explicit request-state flag
//! so at most one request is outstanding at a time, and a failed fetch
//! never surfaces past the guard.

use crate::{adherence, AdherenceLog, Medication, Result};

/// Title used for insight notifications posted by the store
pub const INSIGHT_TITLE: &str = "DoseMate Insight";

/// Request-state flag for the insight guard.
///
/// `Idle` -> `InFlight` when a request is issued, `InFlight` -> `Done` on
/// success, `InFlight` -> `Idle` on failure (nothing is produced that
/// cycle). Dismissing the insight notification re-arms `Done` -> `Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InsightRequest {
    #[default]
    Idle,
    InFlight,
    Done,
}

/// Consistent snapshot handed to the collaborator when a request is issued
#[derive(Clone, Debug)]
pub struct InsightSnapshot {
    pub medications: Vec<Medication>,
    pub logs: Vec<AdherenceLog>,
}

/// An external advisory collaborator.
///
/// Implementations must not panic; a failure is reported as `Err` and the
/// caller swallows it (no insight produced this cycle).
pub trait InsightProvider {
    fn insight(&self, medications: &[Medication], logs: &[AdherenceLog]) -> Result<String>;
}

/// Offline advisory provider deriving a short message from the log itself.
///
/// Stands in for the networked collaborator, which is out of scope.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticInsight;

impl InsightProvider for StaticInsight {
    fn insight(&self, medications: &[Medication], logs: &[AdherenceLog]) -> Result<String> {
        let now = logs
            .iter()
            .map(|l| l.scheduled_time)
            .max()
            .unwrap_or_else(chrono::Utc::now);
        let rate = adherence::adherence_rate(logs, now);
        let low: Vec<&str> = medications
            .iter()
            .filter(|m| m.inventory <= 5)
            .map(|m| m.name.as_str())
            .collect();

        let mut message = if rate >= 80 {
            format!(
                "Great consistency this week ({}% adherence). Keep taking doses at the same times each day.",
                rate
            )
        } else if rate > 0 {
            format!(
                "Weekly adherence is at {}%. Pairing doses with a daily routine like meals can help you stay on track.",
                rate
            )
        } else {
            "No doses recorded this week yet. Mark doses as taken so DoseMate can track your progress.".to_string()
        };

        if !low.is_empty() {
            message.push_str(&format!(" Running low: {}.", low.join(", ")));
        }

        Ok(message)
    }
}
