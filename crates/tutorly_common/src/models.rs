// --- File: crates/tutorly_common/src/models.rs ---

use serde::{Deserialize, Serialize};

/// JSON error body rendered at the HTTP boundary: `{"error": "..."}`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
