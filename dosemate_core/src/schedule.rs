//! Schedule materialization.
//!
//! Expands medications with recurring daily dose times into concrete
//! per-weekday dose instances, dropping any (medication, time) pair that a
//! dose exception suppresses for the viewed day. The dashboard's "today"
//! view and the weekly schedule view are this one function called with
//! different day indices.

use crate::{DoseException, DoseInstance, Medication};

/// True if an exception suppresses `(med_id, time)` on the given weekday
pub fn is_excepted(
    exceptions: &[DoseException],
    med_id: &str,
    time: &str,
    day_index: u8,
) -> bool {
    exceptions
        .iter()
        .any(|ex| ex.medication_id == med_id && ex.time == time && ex.day_index == day_index)
}

/// Materialize the dose instances for one weekday (0 = Sunday .. 6 = Saturday).
///
/// The result is sorted ascending by the raw "HH:mm" key; zero-padded
/// 24-hour strings sort lexicographically in chronological order. The sort
/// is stable, so instances sharing a time keep their input order.
pub fn materialize(
    medications: &[Medication],
    exceptions: &[DoseException],
    day_index: u8,
) -> Vec<DoseInstance> {
    let mut instances: Vec<DoseInstance> = medications
        .iter()
        .flat_map(|med| {
            med.times
                .iter()
                .filter(|time| !is_excepted(exceptions, &med.id, time, day_index))
                .map(|time| DoseInstance::from_medication(med, time))
        })
        .collect();

    instances.sort_by(|a, b| a.dose_time.cmp(&b.dose_time));
    instances
}
