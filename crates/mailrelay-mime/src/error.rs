//! Error types for message composition.

/// Result type alias for MIME operations.
pub type Result<T> = std::result::Result<T, Error>;

/// MIME error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A header value would inject extra header lines.
    #[error("Invalid value for header {name}: line breaks are not allowed")]
    InvalidHeader {
        /// Header name.
        name: String,
    },

    /// A header the message cannot go out without.
    #[error("Missing required header: {0}")]
    MissingHeader(String),
}
