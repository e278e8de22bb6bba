//! Dose-time parsing and display formatting.
//!
//! Dose times are stored and sorted as zero-padded 24-hour "HH:mm" strings
//! (lexicographic order equals chronological order). The 12-hour/24-hour
//! rendering here is display-only and never feeds back into sorting.

use crate::{Error, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Display preference for times
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// Parse a zero-padded 24-hour "HH:mm" dose time
pub fn parse_dose_time(time: &str) -> Result<NaiveTime> {
    // %H rejects hours > 23 but accepts single digits; require the padding
    // explicitly so stored keys always sort chronologically.
    if time.len() != 5 || time.as_bytes()[2] != b':' {
        return Err(Error::Validation(format!(
            "invalid dose time {:?}: expected \"HH:mm\"",
            time
        )));
    }
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|e| Error::Validation(format!("invalid dose time {:?}: {}", time, e)))
}

/// Render an "HH:mm" dose time for display.
///
/// Falls back to the raw string if it does not parse; display must never
/// fail even if a malformed time slipped into the store.
pub fn format_display_time(time: &str, format: TimeFormat) -> String {
    match parse_dose_time(time) {
        Ok(t) => match format {
            TimeFormat::TwelveHour => t.format("%-I:%M %p").to_string(),
            TimeFormat::TwentyFourHour => t.format("%H:%M").to_string(),
        },
        Err(_) => time.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_times() {
        assert!(parse_dose_time("00:00").is_ok());
        assert!(parse_dose_time("08:00").is_ok());
        assert!(parse_dose_time("12:55").is_ok());
        assert!(parse_dose_time("23:59").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_dose_time("24:00").is_err());
        assert!(parse_dose_time("8:00").is_err());
        assert!(parse_dose_time("08:60").is_err());
        assert!(parse_dose_time("0800").is_err());
        assert!(parse_dose_time("").is_err());
        assert!(parse_dose_time("noon").is_err());
    }

    #[test]
    fn test_twelve_hour_display() {
        assert_eq!(format_display_time("08:00", TimeFormat::TwelveHour), "8:00 AM");
        assert_eq!(format_display_time("12:55", TimeFormat::TwelveHour), "12:55 PM");
        assert_eq!(format_display_time("00:05", TimeFormat::TwelveHour), "12:05 AM");
        assert_eq!(format_display_time("20:00", TimeFormat::TwelveHour), "8:00 PM");
    }

    #[test]
    fn test_twenty_four_hour_display() {
        assert_eq!(
            format_display_time("20:00", TimeFormat::TwentyFourHour),
            "20:00"
        );
        assert_eq!(
            format_display_time("08:00", TimeFormat::TwentyFourHour),
            "08:00"
        );
    }

    #[test]
    fn test_display_falls_back_on_garbage() {
        assert_eq!(format_display_time("??:??", TimeFormat::TwelveHour), "??:??");
    }

    #[test]
    fn test_lexicographic_order_matches_chronological() {
        let times = ["00:00", "07:30", "08:00", "12:55", "20:00", "23:59"];
        for pair in times.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(parse_dose_time(pair[0]).unwrap() < parse_dose_time(pair[1]).unwrap());
        }
    }
}
