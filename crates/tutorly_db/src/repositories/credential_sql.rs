//! SQL implementation of the credential repository
//!
//! The `zoom_oauth` table holds at most one row. Store is an update-or-insert
//! so first authorization and later refreshes go through the same call.

use crate::error::DbError;
use crate::repositories::credential::{Credential, CredentialRepository};
use crate::DbClient;
use async_trait::async_trait;
use tracing::{debug, error, info};

/// SQL implementation of the credential repository
#[derive(Debug, Clone)]
pub struct SqlCredentialRepository {
    db_client: DbClient,
}

impl SqlCredentialRepository {
    /// Create a new SQL credential repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

#[async_trait]
impl CredentialRepository for SqlCredentialRepository {
    async fn load(&self) -> Result<Option<Credential>, DbError> {
        let query = r#"
            SELECT access_token, refresh_token, expiration_date AS expires_at
            FROM zoom_oauth
            LIMIT 1
        "#;

        sqlx::query_as::<_, Credential>(query)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to load credential: {}", e);
                DbError::QueryError(e.to_string())
            })
    }

    async fn store(&self, credential: &Credential) -> Result<(), DbError> {
        debug!("Storing credential expiring at {}", credential.expires_at);

        let update = r#"
            UPDATE zoom_oauth
            SET access_token = $1, refresh_token = $2, expiration_date = $3
        "#;

        let result = sqlx::query(update)
            .bind(&credential.access_token)
            .bind(&credential.refresh_token)
            .bind(credential.expires_at)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update credential: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            // First authorization, no row yet
            let insert = r#"
                INSERT INTO zoom_oauth (access_token, refresh_token, expiration_date)
                VALUES ($1, $2, $3)
            "#;

            sqlx::query(insert)
                .bind(&credential.access_token)
                .bind(&credential.refresh_token)
                .bind(credential.expires_at)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to insert credential: {}", e);
                    DbError::QueryError(e.to_string())
                })?;
        }

        info!("Credential stored, expires at {}", credential.expires_at);
        Ok(())
    }

    async fn clear(&self) -> Result<(), DbError> {
        debug!("Clearing stored credential");

        sqlx::query("DELETE FROM zoom_oauth")
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to clear credential: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(())
    }
}
