//! Error types for POP3 operations.

use std::io;

/// Result type alias for POP3 operations.
pub type Result<T> = std::result::Result<T, Error>;

/// POP3 error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error on the underlying socket.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TLS setup or handshake error.
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    /// Server answered `-ERR`.
    #[error("POP3 server error: {0}")]
    Server(String),

    /// Response did not follow the protocol.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Connection closed while a response was pending.
    #[error("Connection closed by server")]
    ConnectionClosed,
}
