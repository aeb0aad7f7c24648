//! SQL implementation of the slot repository
//!
//! All mutations are single conditional UPDATE statements; a booking race is
//! decided by the database, not by application-level locking.

use crate::error::DbError;
use crate::repositories::slot::{AvailableSession, Slot, SlotRepository};
use crate::DbClient;
use async_trait::async_trait;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the slot repository
#[derive(Debug, Clone)]
pub struct SqlSlotRepository {
    db_client: DbClient,
}

impl SqlSlotRepository {
    /// Create a new SQL slot repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

#[async_trait]
impl SlotRepository for SqlSlotRepository {
    async fn list_available(&self, day: &str) -> Result<Vec<AvailableSession>, DbError> {
        debug!("Listing available sessions for day: {}", day);

        // Slot dates are stored as "YYYY-MM-DD HH:MM"; the day is everything
        // before the space. Lexicographic order on the full string is
        // chronological within a day because HH:MM is zero-padded.
        let query = r#"
            SELECT t.name, s.date
            FROM tutors t
            JOIN sessions s ON t.id = s.tutor_id
            WHERE split_part(s.date, ' ', 1) = $1
              AND s.student IS NULL
            ORDER BY s.date ASC
        "#;

        let sessions = sqlx::query_as::<_, AvailableSession>(query)
            .bind(day)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list available sessions: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(sessions)
    }

    async fn book(
        &self,
        date: &str,
        student: &str,
        email: &str,
    ) -> Result<Option<i32>, DbError> {
        debug!("Attempting to book slot at {}", date);

        // Compare-and-swap on the student column. Under two concurrent
        // bookings for the same slot exactly one UPDATE matches a row.
        let query = r#"
            UPDATE sessions
            SET student = $1, email = $2
            WHERE date = $3 AND student IS NULL
            RETURNING tutor_id
        "#;

        let row = sqlx::query(query)
            .bind(student)
            .bind(email)
            .bind(date)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to book slot: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        match row {
            Some(row) => {
                let tutor_id: i32 = row
                    .try_get("tutor_id")
                    .map_err(|e| DbError::QueryError(e.to_string()))?;
                info!("Slot at {} booked with tutor {}", date, tutor_id);
                Ok(Some(tutor_id))
            }
            None => Ok(None),
        }
    }

    async fn find(&self, date: &str, tutor_id: i32) -> Result<Option<Slot>, DbError> {
        let query = r#"
            SELECT date, tutor_id, student, email, join_url
            FROM sessions
            WHERE date = $1 AND tutor_id = $2
        "#;

        sqlx::query_as::<_, Slot>(query)
            .bind(date)
            .bind(tutor_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to look up slot: {}", e);
                DbError::QueryError(e.to_string())
            })
    }

    async fn set_join_url(
        &self,
        date: &str,
        tutor_id: i32,
        join_url: &str,
    ) -> Result<bool, DbError> {
        debug!("Storing join URL for slot at {} (tutor {})", date, tutor_id);

        // The join_url IS NULL guard keeps a second provisioning attempt
        // from overwriting the link handed out to the student.
        let query = r#"
            UPDATE sessions
            SET join_url = $1
            WHERE date = $2 AND tutor_id = $3 AND join_url IS NULL
        "#;

        let result = sqlx::query(query)
            .bind(join_url)
            .bind(date)
            .bind(tutor_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to store join URL: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
