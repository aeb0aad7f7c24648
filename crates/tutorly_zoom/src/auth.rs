// File: crates/tutorly_zoom/src/auth.rs
//! Credential lifecycle management.
//!
//! One `TokenManager` owns the single Zoom credential record. It is the only
//! writer of that record, and it guarantees that at most one refresh
//! exchange is in flight process-wide: Zoom invalidates a refresh token the
//! moment it is used, so two concurrent refreshes with the same token would
//! leave one of them permanently unable to authenticate.

use crate::logic::{TokenResponse, ZoomApi, ZoomError};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use tutorly_db::{Credential, CredentialRepository};

/// Access token lifetime window, in milliseconds (~3500 seconds).
pub const TOKEN_LIFETIME_MS: i64 = 3_500_000;

/// Result of an explicit refresh request (`GET /refreshToken`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The stored token is still valid; no exchange was performed.
    NotExpired,
    /// The token was due and has been rotated.
    Refreshed(Credential),
}

/// Owns the credential state machine: Unauthorized, Authorized, Refreshing.
pub struct TokenManager {
    repo: Arc<dyn CredentialRepository>,
    api: Arc<dyn ZoomApi>,
    /// Serializes refresh exchanges. Readers of a non-expired token never
    /// touch this lock.
    refresh_lock: Arc<Mutex<()>>,
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn credential_from(tokens: TokenResponse, now_ms: i64) -> Result<Credential, ZoomError> {
    let access_token = tokens
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ZoomError::Exchange("response did not include an access token".to_string()))?;
    let refresh_token = tokens
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ZoomError::Exchange("response did not include a refresh token".to_string()))?;

    Ok(Credential {
        access_token,
        refresh_token,
        expires_at: now_ms + TOKEN_LIFETIME_MS,
    })
}

impl TokenManager {
    pub fn new(repo: Arc<dyn CredentialRepository>, api: Arc<dyn ZoomApi>) -> Self {
        Self {
            repo,
            api,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Unauthorized -> Authorized: exchange a fresh authorization code for
    /// the first token pair and persist it.
    pub async fn exchange_authorization_code(
        &self,
        code: &str,
    ) -> Result<Credential, ZoomError> {
        let tokens = self.api.exchange_code(code).await?;
        let credential = credential_from(tokens, now_ms())?;
        self.repo.store(&credential).await?;
        info!(
            "Authorization code exchanged, token expires at {}",
            credential.expires_at
        );
        Ok(credential)
    }

    /// The only entry point other components use to obtain a token.
    ///
    /// Returns a token whose `expires_at` is in the future at the instant of
    /// return, refreshing first if needed.
    pub async fn get_valid_access_token(&self) -> Result<String, ZoomError> {
        let credential = self.repo.load().await?.ok_or(ZoomError::NotAuthorized)?;
        if !credential.is_expired_at(now_ms()) {
            return Ok(credential.access_token);
        }
        let refreshed = self.refresh_expired().await?;
        Ok(refreshed.access_token)
    }

    /// Explicit refresh check for the `/refreshToken` endpoint.
    pub async fn refresh_if_due(&self) -> Result<RefreshOutcome, ZoomError> {
        let credential = self.repo.load().await?.ok_or(ZoomError::NotAuthorized)?;
        if !credential.is_expired_at(now_ms()) {
            return Ok(RefreshOutcome::NotExpired);
        }
        let refreshed = self.refresh_expired().await?;
        Ok(RefreshOutcome::Refreshed(refreshed))
    }

    /// Authorized(expired) -> Refreshing -> Authorized.
    ///
    /// Spawned so that a caller aborting its request mid-flight cannot
    /// cancel the exchange after the provider has consumed the refresh
    /// token; the new credential is always committed once the call is made.
    async fn refresh_expired(&self) -> Result<Credential, ZoomError> {
        let repo = self.repo.clone();
        let api = self.api.clone();
        let lock = self.refresh_lock.clone();

        let handle = tokio::spawn(async move {
            let _guard = lock.lock().await;

            // Whoever held the lock before us may have refreshed already;
            // re-check before issuing our own exchange.
            let credential = repo.load().await?.ok_or(ZoomError::NotAuthorized)?;
            let now = now_ms();
            if !credential.is_expired_at(now) {
                debug!("Token already refreshed by a concurrent caller");
                return Ok(credential);
            }

            match api.refresh(&credential.refresh_token).await {
                Ok(tokens) => match credential_from(tokens, now_ms()) {
                    Ok(refreshed) => {
                        repo.store(&refreshed).await?;
                        info!("Token refreshed, expires at {}", refreshed.expires_at);
                        Ok(refreshed)
                    }
                    Err(err) => {
                        // The provider consumed our refresh token but did
                        // not hand back a usable pair; the stored credential
                        // is dead either way.
                        warn!("Refresh returned an unusable token pair: {}", err);
                        clear_credential(&repo).await;
                        Err(err)
                    }
                },
                Err(err) => {
                    warn!("Refresh exchange failed: {}", err);
                    clear_credential(&repo).await;
                    Err(err)
                }
            }
        });

        handle
            .await
            .map_err(|e| ZoomError::Exchange(format!("refresh task failed: {e}")))?
    }
}

async fn clear_credential(repo: &Arc<dyn CredentialRepository>) {
    if let Err(err) = repo.clear().await {
        error!("Failed to clear consumed credential: {}", err);
    }
}
