// --- File: crates/tutorly_booking/src/logic.rs ---

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use tutorly_common::HttpStatusCode;
use tutorly_db::{AvailableSession, DbError, SlotRepository};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum BookingError {
    /// The conditional update matched zero rows: the slot was already taken
    /// or does not exist. Distinct from a storage failure on purpose.
    #[error("session is already booked or does not exist")]
    AlreadyBooked,
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] DbError),
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::AlreadyBooked => 409,
            BookingError::Validation(_) => 400,
            BookingError::Storage(_) => 500,
        }
    }
}

// --- Data Structures ---

/// Form body for `POST /schedule`. The `sessions` field is the
/// comma-separated slot selection coming from the calendar UI.
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ScheduleRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Bob-Lee"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "b@x.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = "2024-03-01 10:00"))]
    pub sessions: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SessionsResponse {
    pub sessions: Vec<AvailableSession>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ScheduleResponse {
    #[cfg_attr(feature = "openapi", schema(example = "2024-03-01 10:00"))]
    pub date: String,
    /// The booked slot's tutor id.
    pub id: i32,
    #[cfg_attr(feature = "openapi", schema(example = "b@x.com"))]
    pub email: String,
}

// --- Core Logic Functions ---

/// All available sessions on the given day, ordered by time ascending.
/// An empty result is not an error here; the handler decides what an empty
/// day means for the caller.
pub async fn list_available(
    slots: &dyn SlotRepository,
    day: &str,
) -> Result<Vec<AvailableSession>, BookingError> {
    if day.trim().is_empty() {
        return Err(BookingError::Validation("date must not be empty".to_string()));
    }
    Ok(slots.list_available(day).await?)
}

/// Book the slot at `date` for the given student.
///
/// The write is a single compare-and-swap on the student column, so under
/// two concurrent bookings exactly one caller gets the slot and the other
/// gets `AlreadyBooked`.
pub async fn book_slot(
    slots: &dyn SlotRepository,
    date: &str,
    name: &str,
    email: &str,
) -> Result<i32, BookingError> {
    if date.trim().is_empty() {
        return Err(BookingError::Validation("session date is required".to_string()));
    }
    if name.trim().is_empty() {
        return Err(BookingError::Validation("name is required".to_string()));
    }
    if email.trim().is_empty() {
        return Err(BookingError::Validation("email is required".to_string()));
    }

    match slots.book(date, name, email).await? {
        Some(tutor_id) => {
            info!("Booked session at {} with tutor {}", date, tutor_id);
            Ok(tutor_id)
        }
        None => Err(BookingError::AlreadyBooked),
    }
}

/// The slot honored out of a multi-slot selection: the first entry.
/// Multi-slot booking stays out of the contract; extra selections are
/// ignored rather than silently booked.
pub fn first_selected_slot(sessions: &str) -> Option<&str> {
    sessions
        .split(',')
        .map(str::trim)
        .find(|s| !s.is_empty())
}
