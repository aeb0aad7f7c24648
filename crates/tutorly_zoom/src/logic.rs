// --- File: crates/tutorly_zoom/src/logic.rs ---

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as base64_engine, Engine as _};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};
use tutorly_common::{HttpStatusCode, HTTP_CLIENT};
use tutorly_config::ZoomConfig;
use tutorly_db::DbError;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum ZoomError {
    /// Meeting API request failed at the transport level.
    #[error("Zoom API request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Meeting API returned a non-success status or an unexpected payload.
    #[error("Zoom API returned an error: status={status}, body='{body}'")]
    Provider { status: u16, body: String },
    /// Authorization-code or refresh exchange failed, or the token response
    /// was missing one of the tokens.
    #[error("OAuth token exchange failed: {0}")]
    Exchange(String),
    /// No credential on file and none obtainable without a fresh
    /// authorization code. Terminal until re-authorization.
    #[error("no Zoom authorization on file, re-authorization required")]
    NotAuthorized,
    #[error("failed to parse Zoom response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Zoom configuration or client credential missing")]
    Config,
    #[error("no session found for date '{date}' and tutor {tutor_id}")]
    SlotNotFound { date: String, tutor_id: i32 },
    #[error(transparent)]
    Storage(#[from] DbError),
}

impl HttpStatusCode for ZoomError {
    fn status_code(&self) -> u16 {
        match self {
            ZoomError::SlotNotFound { .. } => 404,
            _ => 500,
        }
    }
}

// --- Data Structures ---

/// Token payload returned by Zoom's OAuth token endpoint. Both fields are
/// optional on purpose: the manager rejects responses that lack either one.
#[derive(Deserialize, Debug, Clone)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Body for `POST /v2/users/{host}/meetings`.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MeetingRequest {
    pub topic: String,
    /// 2 = scheduled meeting
    #[serde(rename = "type")]
    pub meeting_type: i32,
    #[cfg_attr(feature = "openapi", schema(example = "2024-03-01T10:00:00"))]
    pub start_time: String,
    pub duration: i64,
    pub schedule_for: String,
    pub timezone: String,
    pub password: String,
    pub agenda: String,
    pub settings: MeetingSettings,
}

/// Fixed meeting options; static configuration, not per-request data.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MeetingSettings {
    pub host_video: bool,
    pub participant_video: bool,
    pub join_before_host: bool,
    pub mute_upon_entry: bool,
    pub watermark: bool,
    pub use_pmi: bool,
    pub approval_type: i32,
    pub audio: String,
    pub auto_recording: String,
}

impl Default for MeetingSettings {
    fn default() -> Self {
        Self {
            host_video: false,
            participant_video: false,
            join_before_host: true,
            mute_upon_entry: true,
            watermark: false,
            use_pmi: false,
            approval_type: 2,
            audio: "both".to_string(),
            auto_recording: "none".to_string(),
        }
    }
}

impl MeetingRequest {
    /// Build the meeting request for a session slot.
    ///
    /// Slot dates are stored as "YYYY-MM-DD HH:MM"; Zoom wants the ISO form
    /// with a `T` separator.
    pub fn for_slot(config: &ZoomConfig, slot_date: &str) -> Self {
        Self {
            topic: config
                .meeting_topic
                .clone()
                .unwrap_or_else(|| "Tutoring session".to_string()),
            meeting_type: 2,
            start_time: slot_date.replace(' ', "T"),
            duration: config.meeting_duration_minutes(),
            schedule_for: config.host_email.clone(),
            timezone: config.timezone().to_string(),
            password: String::new(),
            agenda: config
                .meeting_agenda
                .clone()
                .unwrap_or_else(|| "Tutoring session".to_string()),
            settings: MeetingSettings::default(),
        }
    }
}

// --- Client Credential ---

/// Base64 credential for the token endpoint's Basic auth header.
pub fn encode_basic_credentials(client_id: &str, client_secret: &str) -> String {
    base64_engine.encode(format!("{client_id}:{client_secret}"))
}

/// Loads the Zoom OAuth client credential from the environment.
///
/// `ZOOM_CREDENTIALS` (pre-encoded `base64(client_id:client_secret)`) wins;
/// otherwise `ZOOM_CLIENT_ID` + `ZOOM_CLIENT_SECRET` are encoded here.
pub fn basic_credentials_from_env() -> Result<String, ZoomError> {
    if let Ok(encoded) = std::env::var("ZOOM_CREDENTIALS") {
        if !encoded.is_empty() {
            return Ok(encoded);
        }
    }
    match (
        std::env::var("ZOOM_CLIENT_ID"),
        std::env::var("ZOOM_CLIENT_SECRET"),
    ) {
        (Ok(id), Ok(secret)) if !id.is_empty() && !secret.is_empty() => {
            Ok(encode_basic_credentials(&id, &secret))
        }
        _ => Err(ZoomError::Config),
    }
}

// --- Provider API ---

/// The outbound Zoom surface the core depends on. Implemented over HTTP in
/// production and mocked in tests.
#[async_trait]
pub trait ZoomApi: Send + Sync {
    /// One authorization-code exchange.
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ZoomError>;

    /// One refresh-token exchange. The refresh token is single-use; callers
    /// must not issue two of these concurrently with the same token.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ZoomError>;

    /// Create a meeting and return the provider's payload.
    async fn create_meeting(
        &self,
        access_token: &str,
        request: &MeetingRequest,
    ) -> Result<serde_json::Value, ZoomError>;
}

/// HTTP implementation of [`ZoomApi`] backed by the shared client, so every
/// call is bounded by the default timeout.
pub struct HttpZoomApi {
    config: ZoomConfig,
    credentials: String,
}

impl HttpZoomApi {
    pub fn new(config: ZoomConfig, credentials: String) -> Self {
        Self {
            config,
            credentials,
        }
    }

    /// Construct with the client credential taken from the environment.
    pub fn from_env(config: ZoomConfig) -> Result<Self, ZoomError> {
        let credentials = basic_credentials_from_env()?;
        Ok(Self::new(config, credentials))
    }

    async fn token_request(
        &self,
        params: &[(&str, &str)],
    ) -> Result<TokenResponse, ZoomError> {
        let url = format!("{}/oauth/token", self.config.oauth_base_url());
        debug!("Sending token request to {}", url);

        let response = HTTP_CLIENT
            .post(&url)
            .query(params)
            .header(AUTHORIZATION, format!("Basic {}", self.credentials))
            .send()
            .await
            .map_err(|e| ZoomError::Exchange(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ZoomError::Exchange(e.to_string()))?;

        if !status.is_success() {
            error!("Token endpoint returned {}: {}", status, body);
            return Err(ZoomError::Exchange(format!(
                "token endpoint returned status {status}"
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| ZoomError::Exchange(format!("invalid token response: {e}")))
    }
}

#[async_trait]
impl ZoomApi for HttpZoomApi {
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ZoomError> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("redirect_uri", &self.config.redirect_uri),
            ("code", code),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ZoomError> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn create_meeting(
        &self,
        access_token: &str,
        request: &MeetingRequest,
    ) -> Result<serde_json::Value, ZoomError> {
        let url = format!(
            "{}/v2/users/{}/meetings",
            self.config.api_base_url(),
            self.config.host_email
        );
        debug!("Creating meeting via {}", url);

        let response = HTTP_CLIENT
            .post(&url)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Meeting creation failed with {}: {}", status, body);
            return Err(ZoomError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
