//! Demo seed data: medications, a week of adherence history and the
//! health-wisdom quote list.
//!
//! The original device shipped with a randomized mock history; the seed
//! here is deterministic so demos and tests are reproducible.

use crate::{
    AdherenceLog, AdherenceStatus, Clock, Frequency, Medication, Notification, NotificationKind,
    Store,
};
use chrono::{Datelike, Days, NaiveDate};
use once_cell::sync::Lazy;
use uuid::Uuid;

/// Cached demo medications - built once and cloned per store
static DEMO_MEDICATIONS: Lazy<Vec<Medication>> = Lazy::new(build_demo_medications);

fn build_demo_medications() -> Vec<Medication> {
    vec![
        Medication {
            id: "1".into(),
            name: "Lisinopril".into(),
            dosage: "10mg".into(),
            compartment: 1,
            frequency: Frequency::Daily,
            times: vec!["08:00".into(), "12:55".into()],
            inventory: 24,
            total_capacity: 30,
            color_tag: "blue".into(),
        },
        Medication {
            id: "2".into(),
            name: "Atorvastatin".into(),
            dosage: "20mg".into(),
            compartment: 2,
            frequency: Frequency::Daily,
            times: vec!["20:00".into()],
            inventory: 4,
            total_capacity: 30,
            color_tag: "rose".into(),
        },
    ]
}

/// The built-in demo medications
pub fn demo_medications() -> Vec<Medication> {
    DEMO_MEDICATIONS.clone()
}

/// A deterministic seven-day demo log, newest first.
///
/// Two entries per day, one per demo medication, with a fixed miss pattern
/// (day 3 for the first medication, days 2 and 5 for the second).
pub fn demo_logs(now: chrono::DateTime<chrono::Utc>) -> Vec<AdherenceLog> {
    let meds = demo_medications();
    let mut logs = Vec::with_capacity(14);
    for day in 0..7u64 {
        let scheduled = now.checked_sub_days(Days::new(day)).unwrap_or(now);
        for med in &meds {
            let missed = match med.id.as_str() {
                "1" => day == 3,
                _ => day == 2 || day == 5,
            };
            logs.push(AdherenceLog {
                id: Uuid::new_v4(),
                medication_id: med.id.clone(),
                medication_name: med.name.clone(),
                scheduled_time: scheduled,
                actual_time: (!missed).then_some(scheduled),
                status: if missed {
                    AdherenceStatus::Missed
                } else {
                    AdherenceStatus::Taken
                },
                compartment: med.compartment,
            });
        }
    }
    logs
}

/// Build a fully seeded demo store: medications, a week of history and the
/// welcome notification
pub fn build_demo_store(clock: Box<dyn Clock>) -> Store {
    let now = clock.now();
    let welcome = Notification {
        id: Uuid::new_v4(),
        title: "Welcome to DoseMate".into(),
        message: "Your smart pillbox is successfully connected and ready.".into(),
        time: now - chrono::Duration::hours(1),
        kind: NotificationKind::Success,
        read: true,
    };
    Store::with_seed(clock, demo_medications(), demo_logs(now), vec![welcome])
}

/// Health-wisdom quotes shown on the dashboard
pub const MEDICINE_QUOTES: &[&str] = &[
    "Medicines cure diseases only when taken the right way.",
    "The right dose heals; the wrong dose harms.",
    "Medicine is powerful - use it wisely.",
    "Never share your medicines; your cure may be someone else's poison.",
    "Follow the prescription, not assumptions.",
    "A doctor's advice is as important as the medicine itself.",
    "Trust your doctor, take your medicine on time.",
    "Incomplete treatment leads to incomplete recovery.",
    "Don't stop medicines just because you feel better.",
    "Take medicine on time - health doesn't wait.",
    "Skipping doses skips recovery.",
    "Consistency in medication is consistency in healing.",
    "Finish the course, don't invite relapse.",
    "Self-medication can be self-destruction.",
    "Antibiotics are not candies - use responsibly.",
    "Read the label before you swallow.",
    "When in doubt, ask a doctor - not Google.",
];

/// Quote rotated by calendar day rather than picked at random
pub fn quote_of_the_day(date: NaiveDate) -> &'static str {
    MEDICINE_QUOTES[date.ordinal() as usize % MEDICINE_QUOTES.len()]
}
