//! The fixed weekly time-slot domain.
//!
//! Bookings are made in whole-hour slots from 09:00 through 17:00. The set
//! is closed: anything outside it is a validation error, never a new slot.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// One bookable hour slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    T0900,
    T1000,
    T1100,
    T1200,
    T1300,
    T1400,
    T1500,
    T1600,
    T1700,
}

/// All slots in chronological order.
pub const ALL_SLOTS: [TimeSlot; 9] = [
    TimeSlot::T0900,
    TimeSlot::T1000,
    TimeSlot::T1100,
    TimeSlot::T1200,
    TimeSlot::T1300,
    TimeSlot::T1400,
    TimeSlot::T1500,
    TimeSlot::T1600,
    TimeSlot::T1700,
];

impl TimeSlot {
    /// Canonical zero-padded label, e.g. `"09:00"`.
    ///
    /// This is the form persisted and emitted everywhere. Legacy clients
    /// sent `"9:00"` for the first slot; [`TimeSlot::parse`] accepts it.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::T0900 => "09:00",
            TimeSlot::T1000 => "10:00",
            TimeSlot::T1100 => "11:00",
            TimeSlot::T1200 => "12:00",
            TimeSlot::T1300 => "13:00",
            TimeSlot::T1400 => "14:00",
            TimeSlot::T1500 => "15:00",
            TimeSlot::T1600 => "16:00",
            TimeSlot::T1700 => "17:00",
        }
    }

    /// The slot's starting hour (24h clock).
    pub fn hour(self) -> u32 {
        match self {
            TimeSlot::T0900 => 9,
            TimeSlot::T1000 => 10,
            TimeSlot::T1100 => 11,
            TimeSlot::T1200 => 12,
            TimeSlot::T1300 => 13,
            TimeSlot::T1400 => 14,
            TimeSlot::T1500 => 15,
            TimeSlot::T1600 => 16,
            TimeSlot::T1700 => 17,
        }
    }

    /// Parse a slot label. Accepts the canonical `"09:00"` form and the
    /// unpadded `"9:00"` variant.
    pub fn parse(label: &str) -> Option<TimeSlot> {
        let canonical = match label {
            "9:00" => "09:00",
            other => other,
        };
        ALL_SLOTS.iter().copied().find(|s| s.as_str() == canonical)
    }

    /// The instant this slot starts on the given calendar day.
    pub fn start_on(self, date: NaiveDate) -> NaiveDateTime {
        // hour() is always in 0..24, so and_hms_opt cannot fail.
        date.and_hms_opt(self.hour(), 0, 0)
            .expect("slot hour is a valid time of day")
    }

    /// Whether this slot on `date` has already started as of `now`.
    ///
    /// Past slots remain viewable but are not selectable for new bookings.
    pub fn is_past(self, date: NaiveDate, now: NaiveDateTime) -> bool {
        self.start_on(date) < now
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for TimeSlot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Format a calendar day the way activity entries record it,
/// e.g. `Jun 10, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn test_parse_canonical_labels() {
        for slot in ALL_SLOTS {
            assert_eq!(TimeSlot::parse(slot.as_str()), Some(slot));
        }
    }

    #[test]
    fn test_parse_accepts_unpadded_first_slot() {
        assert_eq!(TimeSlot::parse("9:00"), Some(TimeSlot::T0900));
    }

    #[test]
    fn test_parse_rejects_unknown_labels() {
        assert_eq!(TimeSlot::parse("08:00"), None);
        assert_eq!(TimeSlot::parse("18:00"), None);
        assert_eq!(TimeSlot::parse("10:30"), None);
        assert_eq!(TimeSlot::parse(""), None);
    }

    #[test]
    fn test_is_past_compares_slot_start() {
        let date = d(2024, 6, 10);
        let before = d(2024, 6, 10).and_hms_opt(9, 59, 0).unwrap();
        let after = d(2024, 6, 10).and_hms_opt(10, 0, 1).unwrap();

        assert!(!TimeSlot::T1000.is_past(date, before));
        assert!(TimeSlot::T1000.is_past(date, after));

        // A slot starting exactly now has not yet elapsed.
        let exactly = d(2024, 6, 10).and_hms_opt(10, 0, 0).unwrap();
        assert!(!TimeSlot::T1000.is_past(date, exactly));
    }

    #[test]
    fn test_is_past_on_earlier_day() {
        let now = d(2024, 6, 11).and_hms_opt(8, 0, 0).unwrap();
        assert!(TimeSlot::T1700.is_past(d(2024, 6, 10), now));
        assert!(!TimeSlot::T0900.is_past(d(2024, 6, 12), now));
    }

    #[test]
    fn test_format_date_matches_activity_style() {
        assert_eq!(format_date(d(2024, 6, 10)), "Jun 10, 2024");
        assert_eq!(format_date(d(2025, 1, 3)), "Jan 3, 2025");
    }
}
