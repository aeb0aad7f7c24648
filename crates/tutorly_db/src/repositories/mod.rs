//! Repository modules for database access
//!
//! This module contains repository traits and implementations for the
//! session slot and credential entities.

pub mod credential;
pub mod credential_sql;
pub mod slot;
pub mod slot_sql;

// Re-export the repositories for ease of use
pub use credential::{Credential, CredentialRepository};
pub use credential_sql::SqlCredentialRepository;
pub use slot::{AvailableSession, Slot, SlotRepository};
pub use slot_sql::SqlSlotRepository;
