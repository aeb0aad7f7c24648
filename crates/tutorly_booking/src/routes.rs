// --- File: crates/tutorly_booking/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tutorly_config::AppConfig;
use tutorly_db::SlotRepository;

use crate::handlers::{get_sessions_handler, schedule_handler, BookingState};

/// Creates a router containing all routes for the booking feature.
///
/// # Arguments
/// * `config` - Shared application configuration (`Arc<AppConfig>`).
/// * `slots` - The slot repository the booking engine writes through.
pub fn routes(config: Arc<AppConfig>, slots: Arc<dyn SlotRepository>) -> Router {
    let booking_state = Arc::new(BookingState { config, slots });

    Router::new()
        .route("/session", get(get_sessions_handler))
        .route("/schedule", post(schedule_handler))
        .with_state(booking_state)
}
