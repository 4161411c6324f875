//! POP3 response parsing.

use crate::error::{Error, Result};

/// A parsed single-line status response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// `+OK`, with the rest of the line.
    Ok(String),
    /// `-ERR`, with the rest of the line.
    Err(String),
}

impl Status {
    /// Parses a status line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line starts with neither `+OK` nor `-ERR`.
    pub fn parse(line: &str) -> Result<Self> {
        if let Some(rest) = line.strip_prefix("+OK") {
            Ok(Self::Ok(rest.trim_start().to_string()))
        } else if let Some(rest) = line.strip_prefix("-ERR") {
            Ok(Self::Err(rest.trim_start().to_string()))
        } else {
            Err(Error::Protocol(format!("Unexpected status line: {line}")))
        }
    }

    /// Converts `-ERR` into an error, returning the `+OK` text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] for `-ERR`.
    pub fn into_result(self) -> Result<String> {
        match self {
            Self::Ok(text) => Ok(text),
            Self::Err(text) => Err(Error::Server(text)),
        }
    }
}

/// Result of `STAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailboxStat {
    /// Number of messages in the maildrop.
    pub count: usize,
    /// Total size in octets.
    pub octets: u64,
}

impl MailboxStat {
    /// Parses the text after `+OK` in a STAT reply (`"2 320"`).
    ///
    /// # Errors
    ///
    /// Returns an error if either field is missing or not a number.
    pub fn parse(text: &str) -> Result<Self> {
        let mut fields = text.split_whitespace();
        let malformed = || Error::Protocol(format!("Malformed STAT reply: {text}"));

        let count = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(malformed)?;
        let octets = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(malformed)?;

        Ok(Self { count, octets })
    }
}

/// Removes byte-stuffing from one line of a multi-line response.
///
/// Returns `None` for the terminating `.` line.
#[must_use]
pub fn unstuff(line: &[u8]) -> Option<&[u8]> {
    match line {
        b"." => None,
        [b'.', rest @ ..] => Some(rest),
        other => Some(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_lines() {
        assert_eq!(
            Status::parse("+OK POP3 ready").unwrap(),
            Status::Ok("POP3 ready".into())
        );
        assert_eq!(Status::parse("+OK").unwrap(), Status::Ok(String::new()));
        assert_eq!(
            Status::parse("-ERR bad login").unwrap(),
            Status::Err("bad login".into())
        );
        assert!(Status::parse("* IMAP?").is_err());
    }

    #[test]
    fn err_status_becomes_server_error() {
        let err = Status::Err("locked".into()).into_result().unwrap_err();
        assert!(matches!(err, Error::Server(text) if text == "locked"));
    }

    #[test]
    fn parses_stat() {
        assert_eq!(
            MailboxStat::parse("2 320").unwrap(),
            MailboxStat {
                count: 2,
                octets: 320
            }
        );
        assert!(MailboxStat::parse("two").is_err());
        assert!(MailboxStat::parse("2").is_err());
    }

    #[test]
    fn unstuffs_lines() {
        assert_eq!(unstuff(b"."), None);
        assert_eq!(unstuff(b"..leading dot"), Some(&b".leading dot"[..]));
        assert_eq!(unstuff(b"plain"), Some(&b"plain"[..]));
        assert_eq!(unstuff(b""), Some(&b""[..]));
    }
}
