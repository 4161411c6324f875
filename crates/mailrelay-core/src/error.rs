//! Error types for the core library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file missing or malformed.
    #[error("failed to load configuration from {}: {reason}", path.display())]
    ConfigLoad {
        /// File that was being loaded.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Recipient is neither an address nor an address-book name.
    #[error("unable to resolve \"{0}\" in addressbook")]
    UnresolvedRecipient(String),

    /// Network, authentication or relay failure in either transport.
    #[error("transport error: {0}")]
    Transport(String),

    /// Archival requested for a message that is not backed by a file.
    #[error("no source file attached to message")]
    MissingSourceFile,

    /// Writing a cached message failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Target file.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// Reading an outbox file failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Source file.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// Moving a file into an archive directory failed.
    #[error("failed to move {} to {}: {source}", from.display(), to.display())]
    Archive {
        /// Original location.
        from: PathBuf,
        /// Intended location.
        to: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// Neither the sender nor the recipient is the local account.
    #[error("unable to determine if sent or received email (from {sender}, to {recipient})")]
    UnclassifiableDirection {
        /// Message sender.
        sender: String,
        /// Message recipient.
        recipient: String,
    },

    /// Message text does not follow the expected layout.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Directory-level I/O failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Directory or file involved.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

impl From<mailrelay_smtp::Error> for Error {
    fn from(err: mailrelay_smtp::Error) -> Self {
        Self::Transport(format!("SMTP: {err}"))
    }
}

impl From<mailrelay_pop3::Error> for Error {
    fn from(err: mailrelay_pop3::Error) -> Self {
        Self::Transport(format!("POP3: {err}"))
    }
}

impl From<mailrelay_mime::Error> for Error {
    fn from(err: mailrelay_mime::Error) -> Self {
        Self::MalformedMessage(err.to_string())
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// A batch that stopped at its first fault.
///
/// `completed` counts the items fully processed before the fault; the
/// faulting item and everything after it were left untouched.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct BatchError {
    /// Items completed before the fault.
    pub completed: usize,
    /// The fault that stopped the batch.
    pub source: Error,
}

impl BatchError {
    /// Wraps a fault with the running count.
    #[must_use]
    pub const fn new(completed: usize, source: Error) -> Self {
        Self { completed, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_keep_protocol_context() {
        let err: Error = mailrelay_pop3::Error::Server("mailbox locked".into()).into();
        assert_eq!(
            err.to_string(),
            "transport error: POP3: POP3 server error: mailbox locked"
        );
    }

    #[test]
    fn batch_error_displays_its_source() {
        let batch = BatchError::new(2, Error::UnresolvedRecipient("bob".into()));
        assert_eq!(batch.completed, 2);
        assert_eq!(batch.to_string(), "unable to resolve \"bob\" in addressbook");
    }
}
