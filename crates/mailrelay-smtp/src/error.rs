//! Error types for SMTP operations.

use std::io;

/// Result type alias for SMTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// SMTP error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error on the underlying socket.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TLS setup or handshake error.
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    /// Server rejected a command.
    #[error("SMTP error {code}: {message}")]
    Smtp {
        /// Reply code (e.g., 550).
        code: u16,
        /// Reply text from the server.
        message: String,
    },

    /// The server sent something that is not a valid reply.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Envelope address rejected before it reached the server.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Server does not advertise a required extension.
    #[error("Server does not support {0}")]
    NotSupported(String),

    /// Connection closed while a reply was pending.
    #[error("Connection closed by server")]
    ConnectionClosed,
}

impl Error {
    /// Builds an error from a rejected reply.
    #[must_use]
    pub fn rejected(reply: &crate::types::Reply) -> Self {
        Self::Smtp {
            code: reply.code.as_u16(),
            message: reply.message_text(),
        }
    }

    /// Returns true if this is a permanent error (5xx).
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self, Self::Smtp { code, .. } if *code >= 500 && *code < 600)
    }

    /// Returns true if this is a transient error (4xx).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Smtp { code, .. } if *code >= 400 && *code < 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_reply_codes() {
        let permanent = Error::Smtp {
            code: 550,
            message: "no such user".into(),
        };
        let transient = Error::Smtp {
            code: 421,
            message: "try later".into(),
        };
        assert!(permanent.is_permanent());
        assert!(!permanent.is_transient());
        assert!(transient.is_transient());
        assert!(!Error::ConnectionClosed.is_permanent());
    }
}
