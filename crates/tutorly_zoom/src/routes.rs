// --- File: crates/tutorly_zoom/src/routes.rs ---

use axum::{routing::get, Router};
use std::sync::Arc;
use tutorly_config::AppConfig;
use tutorly_db::{
    CredentialRepository, DbClient, SlotRepository, SqlCredentialRepository, SqlSlotRepository,
};

use crate::auth::TokenManager;
use crate::handlers::{
    authorization_code_handler, create_meeting_handler, refresh_token_handler, ZoomState,
};
use crate::logic::{HttpZoomApi, ZoomApi};
use crate::provisioner::MeetingProvisioner;

/// Creates a router containing all routes for the Zoom feature.
///
/// Wires the token manager and provisioner over the SQL repositories.
/// Requires the `zoom` config section and the client credential env vars;
/// missing either is a startup error.
pub fn routes(config: Arc<AppConfig>, db_client: DbClient) -> Router {
    let zoom_config = config
        .zoom
        .as_ref()
        .expect("Zoom config missing")
        .clone();
    let api: Arc<dyn ZoomApi> = Arc::new(
        HttpZoomApi::from_env(zoom_config.clone())
            .expect("Zoom client credential missing (ZOOM_CREDENTIALS or ZOOM_CLIENT_ID/ZOOM_CLIENT_SECRET)"),
    );
    let credentials: Arc<dyn CredentialRepository> =
        Arc::new(SqlCredentialRepository::new(db_client.clone()));
    let slots: Arc<dyn SlotRepository> = Arc::new(SqlSlotRepository::new(db_client));

    let tokens = Arc::new(TokenManager::new(credentials, api.clone()));
    let provisioner = Arc::new(MeetingProvisioner::new(
        tokens.clone(),
        api,
        slots,
        zoom_config,
    ));

    let zoom_state = Arc::new(ZoomState {
        config,
        tokens,
        provisioner,
    });

    Router::new()
        .route("/authorizationCode", get(authorization_code_handler))
        .route("/refreshToken", get(refresh_token_handler))
        .route("/createMeeting", get(create_meeting_handler))
        .with_state(zoom_state)
}
