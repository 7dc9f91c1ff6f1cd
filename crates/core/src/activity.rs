//! Activity-log constants and detail-string builders.
//!
//! Activity entries denormalize the classroom name and a formatted date into
//! a human-readable `details` string, so the feed stays meaningful even
//! after the referenced rows change or disappear.

use chrono::NaiveDate;

use crate::timeslot::{format_date, TimeSlot};

/// Known activity types.
pub mod activity_types {
    pub const BOOKING: &str = "booking";
    pub const USER: &str = "user";
    pub const CLASSROOM: &str = "classroom";
}

/// Known activity actions.
pub mod actions {
    pub const CREATED: &str = "created";
    pub const UPDATED: &str = "updated";
    pub const DELETED: &str = "deleted";
}

/// Prefix applied when an Admin acts on another user's booking.
const ADMIN_PREFIX: &str = "(Admin) ";

fn admin_prefix(admin_override: bool) -> &'static str {
    if admin_override {
        ADMIN_PREFIX
    } else {
        ""
    }
}

/// `Booked {classroom} for {date} at {time}`
pub fn booking_created_details(classroom: &str, date: NaiveDate, slot: TimeSlot) -> String {
    format!("Booked {classroom} for {} at {slot}", format_date(date))
}

/// `Updated booking for {classroom} to {date} at {time}`, with the
/// `(Admin) ` prefix when an Admin edited someone else's booking.
pub fn booking_updated_details(
    classroom: &str,
    date: NaiveDate,
    slot: TimeSlot,
    admin_override: bool,
) -> String {
    format!(
        "{}Updated booking for {classroom} to {} at {slot}",
        admin_prefix(admin_override),
        format_date(date)
    )
}

/// `Cancelled booking for {classroom}`, with the same `(Admin) ` rule.
pub fn booking_deleted_details(classroom: &str, admin_override: bool) -> String {
    format!(
        "{}Cancelled booking for {classroom}",
        admin_prefix(admin_override)
    )
}

/// `Updated classroom {name}`
pub fn classroom_updated_details(name: &str) -> String {
    format!("Updated classroom {name}")
}

/// `Updated user {name}`
pub fn user_updated_details(name: &str) -> String {
    format!("Updated user {name}")
}

/// `Deleted user {name}`
pub fn user_deleted_details(name: &str) -> String {
    format!("Deleted user {name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_booking_created_details() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(
            booking_created_details("Room 101", date, TimeSlot::T1000),
            "Booked Room 101 for Jun 10, 2024 at 10:00"
        );
    }

    #[test]
    fn test_admin_prefix_only_on_override() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(
            booking_updated_details("Lab A", date, TimeSlot::T1100, false),
            "Updated booking for Lab A to Jun 10, 2024 at 11:00"
        );
        assert_eq!(
            booking_updated_details("Lab A", date, TimeSlot::T1100, true),
            "(Admin) Updated booking for Lab A to Jun 10, 2024 at 11:00"
        );
        assert_eq!(
            booking_deleted_details("Lab A", true),
            "(Admin) Cancelled booking for Lab A"
        );
    }
}
