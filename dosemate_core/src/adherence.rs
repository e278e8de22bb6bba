//! Rolling 7-day adherence aggregation.
//!
//! Pure functions over a log snapshot and a reference "now". The window is
//! seven calendar days back from `now`, inclusive at the lower bound, so an
//! entry scheduled exactly seven days ago still counts. Snoozed and Pending
//! entries count toward the denominator but never the numerator: they are
//! not yet successes.

use crate::{AdherenceLog, AdherenceStatus, HealthSummary};
use chrono::{DateTime, Days, NaiveDate, Utc};

/// Start of the rolling window: `now` minus seven calendar days
fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_days(Days::new(7))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn windowed<'a>(logs: &'a [AdherenceLog], now: DateTime<Utc>) -> Vec<&'a AdherenceLog> {
    let start = window_start(now);
    logs.iter()
        .filter(|l| l.scheduled_time >= start && l.scheduled_time <= now)
        .collect()
}

/// Percentage rate out of `total`, rounded half-up
fn percentage(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u8
}

/// Compute the rolling 7-day adherence rate, 0..=100.
///
/// An empty window yields 0 rather than a division by zero.
pub fn adherence_rate(logs: &[AdherenceLog], now: DateTime<Utc>) -> u8 {
    let windowed = windowed(logs, now);
    let taken = windowed
        .iter()
        .filter(|l| l.status == AdherenceStatus::Taken)
        .count();
    percentage(taken, windowed.len())
}

/// Adherence figures for one calendar day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayAdherence {
    pub date: NaiveDate,
    pub taken: usize,
    pub missed: usize,
    pub total: usize,
    /// Taken percentage for the day, 0 when nothing was scheduled
    pub rate: u8,
}

/// Per-day breakdown of the last seven calendar days, oldest first.
///
/// Feeds the weekly activity chart; days with no entries appear with
/// zeroed counts so the chart always has seven buckets.
pub fn daily_breakdown(logs: &[AdherenceLog], now: DateTime<Utc>) -> Vec<DayAdherence> {
    (0..7u64)
        .rev()
        .map(|back| {
            let date = now
                .date_naive()
                .checked_sub_days(Days::new(back))
                .unwrap_or(NaiveDate::MIN);
            let day_logs: Vec<_> = logs
                .iter()
                .filter(|l| l.scheduled_time.date_naive() == date)
                .collect();
            let taken = day_logs
                .iter()
                .filter(|l| l.status == AdherenceStatus::Taken)
                .count();
            let missed = day_logs
                .iter()
                .filter(|l| l.status == AdherenceStatus::Missed)
                .count();
            DayAdherence {
                date,
                taken,
                missed,
                total: day_logs.len(),
                rate: percentage(taken, day_logs.len()),
            }
        })
        .collect()
}

/// Weekly summary for the dashboard header
pub fn health_summary(logs: &[AdherenceLog], now: DateTime<Utc>) -> HealthSummary {
    let windowed = windowed(logs, now);
    let taken = windowed
        .iter()
        .filter(|l| l.status == AdherenceStatus::Taken)
        .count();
    let missed = windowed
        .iter()
        .filter(|l| l.status == AdherenceStatus::Missed)
        .count();
    HealthSummary {
        weekly_adherence: percentage(taken, windowed.len()),
        missed_doses: missed,
        total_scheduled: windowed.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn entry(status: AdherenceStatus, scheduled: DateTime<Utc>) -> AdherenceLog {
        AdherenceLog {
            id: Uuid::new_v4(),
            medication_id: "1".into(),
            medication_name: "Lisinopril".into(),
            scheduled_time: scheduled,
            actual_time: None,
            status,
            compartment: 1,
        }
    }

    fn reference_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_log_is_zero() {
        assert_eq!(adherence_rate(&[], reference_now()), 0);
    }

    #[test]
    fn test_all_taken_is_100() {
        let now = reference_now();
        let logs: Vec<_> = (0..5)
            .map(|i| entry(AdherenceStatus::Taken, now - Duration::days(i)))
            .collect();
        assert_eq!(adherence_rate(&logs, now), 100);
    }

    #[test]
    fn test_seven_taken_three_missed_is_70() {
        let now = reference_now();
        let mut logs = Vec::new();
        for i in 0..7 {
            logs.push(entry(AdherenceStatus::Taken, now - Duration::hours(i)));
        }
        for i in 7..10 {
            logs.push(entry(AdherenceStatus::Missed, now - Duration::hours(i)));
        }
        assert_eq!(adherence_rate(&logs, now), 70);
    }

    #[test]
    fn test_rate_always_in_range() {
        let now = reference_now();
        let statuses = [
            AdherenceStatus::Taken,
            AdherenceStatus::Missed,
            AdherenceStatus::Snoozed,
            AdherenceStatus::Pending,
        ];
        for n in 0..20usize {
            let logs: Vec<_> = (0..n)
                .map(|i| entry(statuses[i % 4], now - Duration::hours(i as i64)))
                .collect();
            let rate = adherence_rate(&logs, now);
            assert!(rate <= 100);
        }
    }

    #[test]
    fn test_boundary_entry_seven_days_old_included() {
        let now = reference_now();
        let boundary = now.checked_sub_days(Days::new(7)).unwrap();
        let logs = vec![entry(AdherenceStatus::Taken, boundary)];
        assert_eq!(adherence_rate(&logs, now), 100);
    }

    #[test]
    fn test_entry_older_than_window_excluded() {
        let now = reference_now();
        let old = now.checked_sub_days(Days::new(7)).unwrap() - Duration::seconds(1);
        let logs = vec![
            entry(AdherenceStatus::Missed, old),
            entry(AdherenceStatus::Taken, now),
        ];
        // The old Missed entry is out of window, so the rate is 100
        assert_eq!(adherence_rate(&logs, now), 100);
    }

    #[test]
    fn test_snoozed_and_pending_count_denominator_only() {
        let now = reference_now();
        let logs = vec![
            entry(AdherenceStatus::Taken, now),
            entry(AdherenceStatus::Snoozed, now - Duration::hours(1)),
            entry(AdherenceStatus::Pending, now - Duration::hours(2)),
            entry(AdherenceStatus::Taken, now - Duration::hours(3)),
        ];
        // 2 taken out of 4 windowed entries
        assert_eq!(adherence_rate(&logs, now), 50);
    }

    #[test]
    fn test_rounding_half_up() {
        let now = reference_now();
        // 1 of 8 = 12.5% -> rounds to 13
        let mut logs = vec![entry(AdherenceStatus::Taken, now)];
        for i in 1..8 {
            logs.push(entry(AdherenceStatus::Missed, now - Duration::hours(i)));
        }
        assert_eq!(adherence_rate(&logs, now), 13);
    }

    #[test]
    fn test_daily_breakdown_has_seven_buckets_oldest_first() {
        let now = reference_now();
        let breakdown = daily_breakdown(&[], now);
        assert_eq!(breakdown.len(), 7);
        assert_eq!(breakdown[6].date, now.date_naive());
        assert_eq!(
            breakdown[0].date,
            now.date_naive().checked_sub_days(Days::new(6)).unwrap()
        );
        assert!(breakdown.iter().all(|d| d.total == 0 && d.rate == 0));
    }

    #[test]
    fn test_daily_breakdown_buckets_by_calendar_day() {
        let now = reference_now();
        let yesterday = now - Duration::days(1);
        let logs = vec![
            entry(AdherenceStatus::Taken, now),
            entry(AdherenceStatus::Missed, now),
            entry(AdherenceStatus::Taken, yesterday),
        ];
        let breakdown = daily_breakdown(&logs, now);
        let today = &breakdown[6];
        assert_eq!(today.total, 2);
        assert_eq!(today.taken, 1);
        assert_eq!(today.missed, 1);
        assert_eq!(today.rate, 50);
        let prev = &breakdown[5];
        assert_eq!(prev.total, 1);
        assert_eq!(prev.rate, 100);
    }

    #[test]
    fn test_health_summary_counts() {
        let now = reference_now();
        let logs = vec![
            entry(AdherenceStatus::Taken, now),
            entry(AdherenceStatus::Missed, now - Duration::hours(1)),
            entry(AdherenceStatus::Missed, now - Duration::hours(2)),
            entry(AdherenceStatus::Taken, now - Duration::days(10)),
        ];
        let summary = health_summary(&logs, now);
        assert_eq!(summary.total_scheduled, 3);
        assert_eq!(summary.missed_doses, 2);
        assert_eq!(summary.weekly_adherence, 33);
    }
}
