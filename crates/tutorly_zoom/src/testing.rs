//! Shared test doubles for the Zoom crate.

use crate::logic::{MeetingRequest, TokenResponse, ZoomApi, ZoomError};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tutorly_config::ZoomConfig;

mockall::mock! {
    pub Zoom {}

    #[async_trait]
    impl ZoomApi for Zoom {
        async fn exchange_code(&self, code: &str) -> Result<TokenResponse, ZoomError>;
        async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, ZoomError>;
        async fn create_meeting(
            &self,
            access_token: &str,
            request: &MeetingRequest,
        ) -> Result<serde_json::Value, ZoomError>;
    }
}

/// A call-counting fake with a configurable refresh delay, for exercising
/// concurrent callers. Each refresh hands out a fresh numbered token pair,
/// so a duplicated refresh shows up as diverging tokens as well as a count.
#[derive(Default)]
pub struct CountingZoomApi {
    pub refresh_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub refresh_delay: Duration,
}

impl CountingZoomApi {
    pub fn with_refresh_delay(delay: Duration) -> Self {
        Self {
            refresh_delay: delay,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ZoomApi for CountingZoomApi {
    async fn exchange_code(&self, _code: &str) -> Result<TokenResponse, ZoomError> {
        Ok(TokenResponse {
            access_token: Some("exchanged-access".to_string()),
            refresh_token: Some("exchanged-refresh".to_string()),
        })
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenResponse, ZoomError> {
        tokio::time::sleep(self.refresh_delay).await;
        let n = self.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TokenResponse {
            access_token: Some(format!("access-{n}")),
            refresh_token: Some(format!("refresh-{n}")),
        })
    }

    async fn create_meeting(
        &self,
        _access_token: &str,
        _request: &MeetingRequest,
    ) -> Result<serde_json::Value, ZoomError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "id": 1, "join_url": "https://zoom.us/j/fake" }))
    }
}

pub fn zoom_config() -> ZoomConfig {
    ZoomConfig {
        host_email: "tutor@example.com".to_string(),
        redirect_uri: "https://tutorly.example.com/authorization.html".to_string(),
        oauth_base_url: None,
        api_base_url: None,
        timezone: None,
        meeting_duration_minutes: None,
        meeting_topic: None,
        meeting_agenda: None,
    }
}
