//! Domain types for the classroom booking service.
//!
//! This crate has no database or HTTP dependencies so the scheduling and
//! conflict rules can be exercised by plain unit tests and reused by any
//! future CLI or worker tooling.

pub mod activity;
pub mod error;
pub mod roles;
pub mod schedule;
pub mod timeslot;
pub mod types;
