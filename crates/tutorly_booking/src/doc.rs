// File: crates/tutorly_booking/src/doc.rs
#![allow(dead_code)] // Allow dead code for doc functions

#[cfg(feature = "openapi")]
use crate::logic::{ScheduleRequest, ScheduleResponse, SessionsResponse};
#[cfg(feature = "openapi")]
use utoipa::OpenApi;

// Dummy functions carrying the handler attributes for utoipa
#[cfg(feature = "openapi")]
#[utoipa::path(
    get,
    path = "/session",
    params(("date" = String, Query, description = "Calendar day, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Open sessions for the day", body = SessionsResponse),
        (status = 400, description = "Missing date, or no sessions on that day"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Booking"
)]
fn doc_get_sessions_handler() {}

#[cfg(feature = "openapi")]
#[utoipa::path(
    post,
    path = "/schedule",
    request_body(content = ScheduleRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Session booked", body = ScheduleResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Session already booked"),
        (status = 500, description = "Storage failure")
    ),
    tag = "Booking"
)]
fn doc_schedule_handler() {}

#[cfg(feature = "openapi")]
#[derive(OpenApi)]
#[openapi(
    paths(doc_get_sessions_handler, doc_schedule_handler),
    components(schemas(ScheduleRequest, ScheduleResponse, SessionsResponse)),
    tags(
        (name = "Booking", description = "Tutoring session booking API")
    )
)]
pub struct BookingApiDoc;
