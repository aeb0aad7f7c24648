//! Repository for the OAuth credential
//!
//! Exactly one logical credential record exists: the access/refresh token
//! pair used to call the meeting provider, plus its expiration instant.
//! Only the token manager in `tutorly_zoom` writes through this trait.

use crate::error::DbError;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::FromRow;

/// The single OAuth credential shared by all requests.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiration instant in epoch milliseconds.
    pub expires_at: i64,
}

impl Credential {
    /// Whether the access token is expired at the given instant (epoch ms).
    #[inline]
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at <= now_ms
    }
}

/// Repository for the single credential row.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Load the current credential, or `None` if no authorization is on file.
    async fn load(&self) -> Result<Option<Credential>, DbError>;

    /// Overwrite the credential row (insert on first authorization).
    async fn store(&self, credential: &Credential) -> Result<(), DbError>;

    /// Drop the credential, returning the system to the unauthorized state.
    /// Used after a failed refresh: the refresh token is single-use and must
    /// not be retained once the provider has seen it.
    async fn clear(&self) -> Result<(), DbError>;
}
