// --- File: crates/tutorly_zoom/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
#[cfg(test)]
mod auth_test;
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod provisioner;
pub mod routes;
#[cfg(test)]
pub mod testing;

pub use auth::{RefreshOutcome, TokenManager};
pub use logic::{HttpZoomApi, ZoomApi, ZoomError};
pub use provisioner::MeetingProvisioner;
pub use routes::routes;
