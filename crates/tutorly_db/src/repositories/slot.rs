//! Repository for tutoring session slots
//!
//! A slot is identified by its date string ("YYYY-MM-DD HH:MM") plus the
//! tutor teaching it. A slot is available iff its `student` column is NULL.

use crate::error::DbError;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::FromRow;

/// An open session as shown to students browsing a day: the tutor's display
/// name and the slot's full date-time string.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct AvailableSession {
    pub name: String,
    pub date: String,
}

/// A full session row.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct Slot {
    pub date: String,
    pub tutor_id: i32,
    pub student: Option<String>,
    pub email: Option<String>,
    pub join_url: Option<String>,
}

impl Slot {
    pub fn is_available(&self) -> bool {
        self.student.is_none()
    }
}

/// Repository for session slots.
///
/// Booking and join-URL writes are expressed as conditional updates so the
/// storage layer provides the atomicity; callers never read-check-write.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// All available slots on the given calendar day ("YYYY-MM-DD"),
    /// ordered by time ascending, annotated with the tutor's name.
    async fn list_available(&self, day: &str) -> Result<Vec<AvailableSession>, DbError>;

    /// Atomically transition the slot at `date` from available to booked.
    ///
    /// Returns the owning tutor's id if this call won the slot, or `None`
    /// if the conditional update matched zero rows (already booked, or no
    /// such slot).
    async fn book(&self, date: &str, student: &str, email: &str)
        -> Result<Option<i32>, DbError>;

    /// Look up a single slot by its (date, tutor) key.
    async fn find(&self, date: &str, tutor_id: i32) -> Result<Option<Slot>, DbError>;

    /// Store the meeting join URL on the slot, only if none is set yet.
    ///
    /// Returns `false` if the slot already carried a join URL (or does not
    /// exist); the stored link is left untouched in that case.
    async fn set_join_url(
        &self,
        date: &str,
        tutor_id: i32,
        join_url: &str,
    ) -> Result<bool, DbError>;
}
