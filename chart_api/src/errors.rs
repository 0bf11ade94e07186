//! Error types for the chart API client.

/// Errors that can occur when requesting a chart.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The body was not a chart document.
    #[error("Failed to parse chart response: {0}")]
    Parse(String),
}
