//! Database integration for Tutorly
//!
//! This crate provides a Postgres client built on SQLx plus the repositories
//! for the two persisted entities the core cares about: tutoring session
//! slots and the single OAuth credential row.
//!
//! Slot booking and join-URL writes are conditional UPDATEs; the database
//! decides races, not in-process locks. The credential row is only written
//! by the token manager in `tutorly_zoom`.

pub mod client;
pub mod error;
pub mod mock;
pub mod repositories;

// Re-export the client and repository types for ease of use
pub use client::DbClient;
pub use error::DbError;
pub use repositories::{
    AvailableSession, Credential, CredentialRepository, Slot, SlotRepository,
    SqlCredentialRepository, SqlSlotRepository,
};
