// --- File: crates/tutorly_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g., DATABASE_URL loaded via APP_DATABASE__URL or DATABASE_URL
}

// --- Zoom Config ---
// Holds non-secret Zoom config. The OAuth client credential is loaded directly
// from env vars: ZOOM_CREDENTIALS (pre-encoded) or ZOOM_CLIENT_ID / ZOOM_CLIENT_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ZoomConfig {
    /// Zoom user that hosts the tutoring meetings.
    pub host_email: String,
    /// Redirect URI registered with the Zoom OAuth app.
    pub redirect_uri: String,
    /// OAuth token endpoint base, override for testing. Defaults to https://zoom.us.
    #[serde(default)]
    pub oauth_base_url: Option<String>,
    /// REST API base, override for testing. Defaults to https://api.zoom.us.
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>, // defaults to America/Los_Angeles
    #[serde(default)]
    pub meeting_duration_minutes: Option<i64>, // defaults to 30
    #[serde(default)]
    pub meeting_topic: Option<String>,
    #[serde(default)]
    pub meeting_agenda: Option<String>,
}

impl ZoomConfig {
    pub fn oauth_base_url(&self) -> &str {
        self.oauth_base_url.as_deref().unwrap_or("https://zoom.us")
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or("https://api.zoom.us")
    }

    pub fn timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or("America/Los_Angeles")
    }

    pub fn meeting_duration_minutes(&self) -> i64 {
        self.meeting_duration_minutes.unwrap_or(30)
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>, // Central DB config
    #[serde(default)]
    pub zoom: Option<ZoomConfig>,
}
