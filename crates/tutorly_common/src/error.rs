// --- File: crates/tutorly_common/src/error.rs ---

/// A trait for converting errors to HTTP status codes.
///
/// Domain errors stay typed all the way up; only the handler layer calls
/// `status_code()` and turns the error into a response. Nothing below the
/// boundary decides a status or renders a user-facing string.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}
