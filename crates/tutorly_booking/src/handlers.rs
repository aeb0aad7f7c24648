// File: crates/tutorly_booking/src/handlers.rs

use crate::logic::{
    book_slot, first_selected_slot, list_available, BookingError, ScheduleRequest,
    ScheduleResponse, SessionsResponse,
};
use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;
use tutorly_common::{ErrorResponse, HttpStatusCode};
use tutorly_config::AppConfig;
use tutorly_db::SlotRepository;

// Define shared state needed by booking handlers
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub slots: Arc<dyn SlotRepository>,
}

#[derive(Deserialize, Debug)]
pub struct SessionQuery {
    pub date: Option<String>,
}

fn booking_error_response(err: BookingError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!("Booking request failed: {}", err);
        // don't leak storage details to the caller
        return (
            status,
            Json(ErrorResponse::new(
                "Something went wrong on the server, please try again later.",
            )),
        );
    }
    (status, Json(ErrorResponse::new(err.to_string())))
}

/// Handler to list the open sessions on a day.
#[axum::debug_handler]
pub async fn get_sessions_handler(
    State(state): State<Arc<BookingState>>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<SessionsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let date = query.date.as_deref().unwrap_or("").trim().to_string();
    if date.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing date parameters")),
        ));
    }

    let sessions = list_available(state.slots.as_ref(), &date)
        .await
        .map_err(booking_error_response)?;

    if sessions.is_empty() {
        // the surrounding UI treats an empty day as a client-visible condition
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("No available sessions for today")),
        ));
    }

    Ok(Json(SessionsResponse { sessions }))
}

/// Handler to book the selected session.
#[axum::debug_handler]
pub async fn schedule_handler(
    State(state): State<Arc<BookingState>>,
    Form(request): Form<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, (StatusCode, Json<ErrorResponse>)> {
    let date = first_selected_slot(&request.sessions).ok_or_else(|| {
        booking_error_response(BookingError::Validation(
            "at least one session must be selected".to_string(),
        ))
    })?;

    let tutor_id = book_slot(state.slots.as_ref(), date, &request.name, &request.email)
        .await
        .map_err(booking_error_response)?;

    Ok(Json(ScheduleResponse {
        date: date.to_string(),
        id: tutor_id,
        email: request.email,
    }))
}
