// File: crates/tutorly_zoom/src/provisioner.rs
//! Meeting provisioning for booked sessions.
//!
//! Orchestrates the token manager, the Zoom meeting API, and the slot store:
//! obtain a valid token, create the meeting, write the join URL back to the
//! slot. Provisioning is idempotent per slot: a slot that already carries a
//! join URL is never provisioned again.

use crate::auth::TokenManager;
use crate::logic::{MeetingRequest, ZoomApi, ZoomError};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use tutorly_config::ZoomConfig;
use tutorly_db::SlotRepository;

pub struct MeetingProvisioner {
    tokens: Arc<TokenManager>,
    api: Arc<dyn ZoomApi>,
    slots: Arc<dyn SlotRepository>,
    config: ZoomConfig,
}

impl MeetingProvisioner {
    pub fn new(
        tokens: Arc<TokenManager>,
        api: Arc<dyn ZoomApi>,
        slots: Arc<dyn SlotRepository>,
        config: ZoomConfig,
    ) -> Self {
        Self {
            tokens,
            api,
            slots,
            config,
        }
    }

    /// Provision a meeting for the slot at (`date`, `tutor_id`) and return
    /// the provider's meeting payload.
    ///
    /// Spawned so an aborted request cannot cancel the flow between meeting
    /// creation and the join-URL write; once the remote meeting exists its
    /// link is always committed to the slot.
    pub async fn provision_meeting(
        &self,
        date: &str,
        tutor_id: i32,
    ) -> Result<serde_json::Value, ZoomError> {
        let tokens = self.tokens.clone();
        let api = self.api.clone();
        let slots = self.slots.clone();
        let config = self.config.clone();
        let date = date.to_string();

        let handle = tokio::spawn(async move {
            run_provision(tokens, api, slots, config, date, tutor_id).await
        });

        handle
            .await
            .map_err(|e| ZoomError::Exchange(format!("provisioning task failed: {e}")))?
    }
}

async fn run_provision(
    tokens: Arc<TokenManager>,
    api: Arc<dyn ZoomApi>,
    slots: Arc<dyn SlotRepository>,
    config: ZoomConfig,
    date: String,
    tutor_id: i32,
) -> Result<serde_json::Value, ZoomError> {
    let slot = slots
        .find(&date, tutor_id)
        .await?
        .ok_or_else(|| ZoomError::SlotNotFound {
            date: date.clone(),
            tutor_id,
        })?;

    // Idempotence guard: never create a second remote meeting for a slot
    // that already has one.
    if let Some(join_url) = slot.join_url {
        info!("Slot at {} already provisioned, returning stored link", date);
        return Ok(json!({ "join_url": join_url }));
    }

    let access_token = tokens.get_valid_access_token().await?;
    let request = MeetingRequest::for_slot(&config, &date);
    let payload = api.create_meeting(&access_token, &request).await?;

    let join_url = payload
        .get("join_url")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ZoomError::Provider {
            status: 200,
            body: "meeting payload did not include a join_url".to_string(),
        })?;

    let stored = slots.set_join_url(&date, tutor_id, join_url).await?;
    if !stored {
        // Lost a race with another provisioning call; the stored link wins.
        warn!(
            "Slot at {} gained a join URL concurrently, keeping the stored link",
            date
        );
    } else {
        info!("Join URL stored for slot at {} (tutor {})", date, tutor_id);
    }

    Ok(payload)
}
