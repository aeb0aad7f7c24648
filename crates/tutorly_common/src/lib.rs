// --- File: crates/tutorly_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared data structures

// Re-export for easier access
pub use error::HttpStatusCode;
pub use http::{create_client, HTTP_CLIENT};
pub use models::ErrorResponse;
