// --- File: crates/tutorly_booking/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod logic;
pub mod routes;

pub use logic::{BookingError, ScheduleRequest, ScheduleResponse, SessionsResponse};
pub use routes::routes;
