// File: crates/tutorly_zoom/src/handlers.rs

use crate::auth::{RefreshOutcome, TokenManager};
use crate::logic::ZoomError;
use crate::provisioner::MeetingProvisioner;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;
use tutorly_common::{ErrorResponse, HttpStatusCode};
use tutorly_config::AppConfig;

// Define shared state needed by Zoom handlers
#[derive(Clone)]
pub struct ZoomState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenManager>,
    pub provisioner: Arc<MeetingProvisioner>,
}

#[derive(Deserialize, Debug)]
pub struct AuthorizationCodeQuery {
    #[serde(rename = "authorizationCode")]
    pub authorization_code: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreateMeetingQuery {
    pub date: Option<String>,
    /// Tutor id of the booked slot.
    pub id: Option<i32>,
}

fn zoom_error_response(err: ZoomError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match err {
        // operators need to see these, so the message goes through as-is
        ZoomError::NotAuthorized | ZoomError::SlotNotFound { .. } => {
            (status, Json(ErrorResponse::new(err.to_string())))
        }
        err => {
            error!("Zoom request failed: {}", err);
            (
                status,
                Json(ErrorResponse::new(
                    "Something went wrong on the server, please try again later.",
                )),
            )
        }
    }
}

fn missing_param(name: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(format!("Missing {name} parameter"))),
    )
}

/// Handler for the OAuth redirect: exchange the authorization code and store
/// the resulting credential.
#[axum::debug_handler]
pub async fn authorization_code_handler(
    State(state): State<Arc<ZoomState>>,
    Query(query): Query<AuthorizationCodeQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let code = query
        .authorization_code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| missing_param("authorizationCode"))?;

    let credential = state
        .tokens
        .exchange_authorization_code(code)
        .await
        .map_err(zoom_error_response)?;

    Ok(Json(json!({ "date": credential.expires_at })))
}

/// Handler to refresh the stored token if it is due.
#[axum::debug_handler]
pub async fn refresh_token_handler(
    State(state): State<Arc<ZoomState>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    match state.tokens.refresh_if_due().await.map_err(zoom_error_response)? {
        RefreshOutcome::NotExpired => Ok(Json(json!({ "status": "not expired" }))),
        RefreshOutcome::Refreshed(credential) => Ok(Json(json!({
            "status": "refreshed",
            "date": credential.expires_at,
        }))),
    }
}

/// Handler to provision the Zoom meeting for a booked slot.
#[axum::debug_handler]
pub async fn create_meeting_handler(
    State(state): State<Arc<ZoomState>>,
    Query(query): Query<CreateMeetingQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let date = query
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| missing_param("date"))?;
    let tutor_id = query.id.ok_or_else(|| missing_param("id"))?;

    let payload = state
        .provisioner
        .provision_meeting(date, tutor_id)
        .await
        .map_err(zoom_error_response)?;

    Ok(Json(payload))
}
