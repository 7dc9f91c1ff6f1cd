//! Week-grid scheduling logic.
//!
//! A schedule view is a 7-day window anchored at a caller-chosen start day,
//! with one cell per (day, slot) pair. Every cell resolves to exactly one
//! [`CellState`]; the precedence is Past, then Booked, then Selected, then
//! Free — an elapsed cell is Past even if a booking sits in it, and a booked
//! cell can never be Selected.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::timeslot::{TimeSlot, ALL_SLOTS};
use crate::types::DbId;

/// Days shown per schedule window.
pub const WEEK_DAYS: u64 = 7;

/// The slice of a booking the grid needs to classify cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSlot {
    pub booking_id: DbId,
    pub owner_id: DbId,
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

/// Display state of a single (day, slot) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Past,
    BookedByOther,
    BookedBySelf,
    Selected,
    Free,
}

/// The viewer's current (not yet booked) slot choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

/// What a click on a cell means for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The viewer clicked their own booking: open it for editing.
    OpenEdit(DbId),
    /// The viewer picked a free, future cell.
    Select(Selection),
    /// Past or foreign-booked cells do not react.
    Ignored,
}

/// One classified cell.
#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    pub slot: TimeSlot,
    pub state: CellState,
    /// Present when a booking occupies this cell (also for Past cells).
    pub booking_id: Option<DbId>,
}

/// One day column of the grid.
#[derive(Debug, Clone, Serialize)]
pub struct DayCells {
    pub date: NaiveDate,
    pub cells: Vec<Cell>,
}

/// A fully classified 7-day window.
#[derive(Debug, Clone, Serialize)]
pub struct WeekGrid {
    pub week_start: NaiveDate,
    pub days: Vec<DayCells>,
}

fn booking_at(bookings: &[BookingSlot], date: NaiveDate, slot: TimeSlot) -> Option<&BookingSlot> {
    bookings.iter().find(|b| b.date == date && b.slot == slot)
}

/// Classify a single cell for `viewer`.
pub fn cell_state(
    date: NaiveDate,
    slot: TimeSlot,
    bookings: &[BookingSlot],
    viewer: DbId,
    selection: Option<Selection>,
    now: NaiveDateTime,
) -> CellState {
    if slot.is_past(date, now) {
        return CellState::Past;
    }
    if let Some(booking) = booking_at(bookings, date, slot) {
        return if booking.owner_id == viewer {
            CellState::BookedBySelf
        } else {
            CellState::BookedByOther
        };
    }
    if selection.is_some_and(|s| s.date == date && s.slot == slot) {
        return CellState::Selected;
    }
    CellState::Free
}

/// Resolve a click on (date, slot).
///
/// Clicking a self-owned booking opens it for editing instead of creating a
/// new one; free future cells become the new selection; everything else is
/// inert.
pub fn click(
    date: NaiveDate,
    slot: TimeSlot,
    bookings: &[BookingSlot],
    viewer: DbId,
    now: NaiveDateTime,
) -> ClickOutcome {
    if let Some(booking) = booking_at(bookings, date, slot) {
        return if booking.owner_id == viewer {
            ClickOutcome::OpenEdit(booking.booking_id)
        } else {
            ClickOutcome::Ignored
        };
    }
    if slot.is_past(date, now) {
        return ClickOutcome::Ignored;
    }
    ClickOutcome::Select(Selection { date, slot })
}

/// Fold a click outcome into the current selection.
///
/// Selections are mutually exclusive: a new selection replaces the previous
/// one; non-selecting outcomes leave it untouched.
pub fn apply_click(current: Option<Selection>, outcome: ClickOutcome) -> Option<Selection> {
    match outcome {
        ClickOutcome::Select(selection) => Some(selection),
        ClickOutcome::OpenEdit(_) | ClickOutcome::Ignored => current,
    }
}

/// Whether the window may move one week earlier.
///
/// Disallowed once the new start would precede the current day.
pub fn can_go_to_previous_week(week_start: NaiveDate, today: NaiveDate) -> bool {
    match week_start.checked_sub_days(Days::new(WEEK_DAYS)) {
        Some(previous_start) => previous_start >= today,
        None => false,
    }
}

impl WeekGrid {
    /// Classify every cell of the 7-day window starting at `week_start`.
    ///
    /// `bookings` should already be filtered to the classroom being viewed;
    /// entries outside the window are ignored.
    pub fn build(
        week_start: NaiveDate,
        bookings: &[BookingSlot],
        viewer: DbId,
        selection: Option<Selection>,
        now: NaiveDateTime,
    ) -> WeekGrid {
        let days = (0..WEEK_DAYS)
            .map(|offset| {
                let date = week_start + Days::new(offset);
                let cells = ALL_SLOTS
                    .iter()
                    .map(|&slot| Cell {
                        slot,
                        state: cell_state(date, slot, bookings, viewer, selection, now),
                        booking_id: booking_at(bookings, date, slot).map(|b| b.booking_id),
                    })
                    .collect();
                DayCells { date, cells }
            })
            .collect();

        WeekGrid { week_start, days }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWER: DbId = 1;
    const OTHER: DbId = 2;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).expect("valid date")
    }

    /// Noon on June 10th: the 09:00-11:00 slots of that day have elapsed.
    fn noon_on_the_10th() -> NaiveDateTime {
        d(10).and_hms_opt(12, 0, 0).unwrap()
    }

    fn booking(id: DbId, owner: DbId, date: NaiveDate, slot: TimeSlot) -> BookingSlot {
        BookingSlot {
            booking_id: id,
            owner_id: owner,
            date,
            slot,
        }
    }

    #[test]
    fn test_cell_states_cover_all_cases() {
        let bookings = vec![
            booking(10, VIEWER, d(11), TimeSlot::T1000),
            booking(11, OTHER, d(11), TimeSlot::T1100),
        ];
        let now = noon_on_the_10th();
        let selection = Some(Selection {
            date: d(12),
            slot: TimeSlot::T0900,
        });

        assert_eq!(
            cell_state(d(10), TimeSlot::T0900, &bookings, VIEWER, selection, now),
            CellState::Past
        );
        assert_eq!(
            cell_state(d(11), TimeSlot::T1000, &bookings, VIEWER, selection, now),
            CellState::BookedBySelf
        );
        assert_eq!(
            cell_state(d(11), TimeSlot::T1100, &bookings, VIEWER, selection, now),
            CellState::BookedByOther
        );
        assert_eq!(
            cell_state(d(12), TimeSlot::T0900, &bookings, VIEWER, selection, now),
            CellState::Selected
        );
        assert_eq!(
            cell_state(d(12), TimeSlot::T1000, &bookings, VIEWER, selection, now),
            CellState::Free
        );
    }

    #[test]
    fn test_past_wins_over_booked() {
        // A booking in an elapsed slot renders as Past, not Booked.
        let bookings = vec![booking(10, OTHER, d(10), TimeSlot::T0900)];
        let state = cell_state(
            d(10),
            TimeSlot::T0900,
            &bookings,
            VIEWER,
            None,
            noon_on_the_10th(),
        );
        assert_eq!(state, CellState::Past);
    }

    #[test]
    fn test_click_own_booking_opens_edit() {
        let bookings = vec![booking(42, VIEWER, d(11), TimeSlot::T1000)];
        let outcome = click(d(11), TimeSlot::T1000, &bookings, VIEWER, noon_on_the_10th());
        assert_eq!(outcome, ClickOutcome::OpenEdit(42));
    }

    #[test]
    fn test_click_foreign_booking_is_ignored() {
        let bookings = vec![booking(42, OTHER, d(11), TimeSlot::T1000)];
        let outcome = click(d(11), TimeSlot::T1000, &bookings, VIEWER, noon_on_the_10th());
        assert_eq!(outcome, ClickOutcome::Ignored);
    }

    #[test]
    fn test_click_past_cell_is_ignored() {
        let outcome = click(d(10), TimeSlot::T0900, &[], VIEWER, noon_on_the_10th());
        assert_eq!(outcome, ClickOutcome::Ignored);
    }

    #[test]
    fn test_click_free_cell_selects() {
        let outcome = click(d(11), TimeSlot::T0900, &[], VIEWER, noon_on_the_10th());
        assert_eq!(
            outcome,
            ClickOutcome::Select(Selection {
                date: d(11),
                slot: TimeSlot::T0900,
            })
        );
    }

    #[test]
    fn test_selection_is_mutually_exclusive() {
        let now = noon_on_the_10th();
        let first = apply_click(None, click(d(11), TimeSlot::T0900, &[], VIEWER, now));
        assert_eq!(
            first,
            Some(Selection {
                date: d(11),
                slot: TimeSlot::T0900,
            })
        );

        // Selecting a second cell replaces the first selection entirely.
        let second = apply_click(first, click(d(12), TimeSlot::T1400, &[], VIEWER, now));
        assert_eq!(
            second,
            Some(Selection {
                date: d(12),
                slot: TimeSlot::T1400,
            })
        );

        // An ignored click leaves the selection alone.
        let third = apply_click(second, click(d(10), TimeSlot::T0900, &[], VIEWER, now));
        assert_eq!(third, second);
    }

    #[test]
    fn test_previous_week_lower_bound() {
        let today = d(10);
        // Window anchored at today: going back would precede today.
        assert!(!can_go_to_previous_week(d(10), today));
        // One week out: going back lands exactly on today, which is allowed.
        assert!(can_go_to_previous_week(d(17), today));
        assert!(can_go_to_previous_week(d(24), today));
        // Mid-window anchor: back would land before today.
        assert!(!can_go_to_previous_week(d(13), today));
    }

    #[test]
    fn test_week_grid_dimensions_and_booking_ids() {
        let bookings = vec![booking(7, VIEWER, d(11), TimeSlot::T1000)];
        let grid = WeekGrid::build(d(10), &bookings, VIEWER, None, noon_on_the_10th());

        assert_eq!(grid.week_start, d(10));
        assert_eq!(grid.days.len(), 7);
        assert!(grid.days.iter().all(|day| day.cells.len() == ALL_SLOTS.len()));
        assert_eq!(grid.days[0].date, d(10));
        assert_eq!(grid.days[6].date, d(16));

        let cell = grid.days[1]
            .cells
            .iter()
            .find(|c| c.slot == TimeSlot::T1000)
            .unwrap();
        assert_eq!(cell.state, CellState::BookedBySelf);
        assert_eq!(cell.booking_id, Some(7));
    }
}
