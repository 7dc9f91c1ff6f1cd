pub mod activities;
pub mod auth;
pub mod bookings;
pub mod classrooms;
pub mod dashboard;
pub mod schedule;
pub mod users;
