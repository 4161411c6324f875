//! The mail entity and its on-disk text convention.
//!
//! Outbox files carry the recipient on the first line, the subject on the
//! second and the body on the rest:
//!
//! ```text
//! alice
//! Hello
//! Hi there
//! ```
//!
//! The sender is not stored in outbox files; it is the local account identity.
//! Cached inbox files use the same three-part shape with the sender on the
//! first line instead.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::Recipient;
use crate::contacts::AddressBook;
use crate::error::{Error, Result};

/// Timestamp format shared by cache filenames and sent-archive prefixes.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S%6f";

/// Suffix of every message file.
pub const MESSAGE_SUFFIX: &str = ".email";

/// One email message held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct MailEntity {
    /// Mail address or display form of the sender.
    pub sender: String,
    /// Literal address or address-book name.
    pub recipient: Recipient,
    /// Single-line subject.
    pub subject: String,
    /// Message body, may span lines.
    pub body: String,
    source_file: Option<PathBuf>,
}

impl MailEntity {
    /// Creates an entity that is not backed by a file.
    #[must_use]
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: Recipient::classify(recipient),
            subject: subject.into(),
            body: body.into(),
            source_file: None,
        }
    }

    /// Parses outbox text: recipient line, subject line, then the body.
    ///
    /// Body lines are rejoined with `\n`; a trailing newline is not kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMessage`] if the text has fewer than two lines.
    pub fn parse(sender: impl Into<String>, raw: &str) -> Result<Self> {
        let mut lines = raw.lines();
        let (Some(recipient), Some(subject)) = (lines.next(), lines.next()) else {
            return Err(Error::MalformedMessage(
                "expected a recipient line and a subject line".to_string(),
            ));
        };
        let body = lines.collect::<Vec<_>>().join("\n");
        Ok(Self::new(sender, recipient, subject, body))
    }

    /// Returns the canonical `sender\nsubject\nbody` form.
    #[must_use]
    pub fn serialize(&self) -> String {
        format!("{}\n{}\n{}", self.sender, self.subject, self.body)
    }

    /// Returns true if the recipient already looks like a mail address.
    #[must_use]
    pub const fn recipient_is_literal_address(&self) -> bool {
        self.recipient.is_literal()
    }

    /// Replaces a named recipient with its address-book address.
    ///
    /// Literal recipients are left alone, so calling this twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedRecipient`] if the name is not in `book`.
    pub fn resolve_recipient(&mut self, book: &AddressBook) -> Result<()> {
        self.recipient = self.recipient.resolve(book)?;
        Ok(())
    }

    /// Returns the backing file, if any.
    #[must_use]
    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }

    /// Attaches or replaces the backing file.
    pub fn set_source_file(&mut self, path: impl Into<PathBuf>) {
        self.source_file = Some(path.into());
    }

    /// Builder-style variant of [`MailEntity::set_source_file`].
    #[must_use]
    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.set_source_file(path);
        self
    }

    /// Generates an inbox filename from the current time and the sender.
    #[must_use]
    pub fn generate_cache_filename(&self) -> String {
        self.cache_filename_at(Local::now())
    }

    /// Generates an inbox filename for a fixed timestamp.
    #[must_use]
    pub fn cache_filename_at(&self, at: DateTime<Local>) -> String {
        format!(
            "{}_{}{MESSAGE_SUFFIX}",
            at.format(TIMESTAMP_FORMAT),
            sender_token(&self.sender)
        )
    }
}

/// Longest sender token in bytes; keeps cache filenames well under `NAME_MAX`.
const MAX_TOKEN_LEN: usize = 100;

fn sender_token(sender: &str) -> String {
    let mut token = String::new();
    for c in sender.chars().filter(|c| *c != ' ') {
        let c = match c {
            '<' | '>' | '/' | '\\' => '_',
            c if c.is_control() => '_',
            other => other,
        };
        if token.len() + c.len_utf8() > MAX_TOKEN_LEN {
            break;
        }
        token.push(c);
    }
    token
}

impl fmt::Debug for MailEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailEntity")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("subject", &self.subject)
            .field("body_len", &self.body.len())
            .field("source_file", &self.source_file)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::contacts::Address;
    use chrono::TimeZone;

    #[test]
    fn test_parse_outbox_file() {
        let entity = MailEntity::parse("me@example.com", "alice\nHello\nHi there").unwrap();
        assert_eq!(entity.sender, "me@example.com");
        assert_eq!(entity.recipient, Recipient::Named("alice".into()));
        assert_eq!(entity.subject, "Hello");
        assert_eq!(entity.body, "Hi there");
        assert!(entity.source_file().is_none());
    }

    #[test]
    fn test_parse_multiline_body() {
        let raw = "bob@example.com\r\nStatus\r\nline one\r\n\r\nline three\r\n";
        let entity = MailEntity::parse("me@example.com", raw).unwrap();
        assert!(entity.recipient_is_literal_address());
        assert_eq!(entity.body, "line one\n\nline three");
    }

    #[test]
    fn test_parse_without_body() {
        let entity = MailEntity::parse("me", "bob\nSubject only").unwrap();
        assert_eq!(entity.body, "");
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            MailEntity::parse("me", "only one line"),
            Err(Error::MalformedMessage(_))
        ));
        assert!(MailEntity::parse("me", "").is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let entity = MailEntity::new("me@example.com", "me@example.com", "Hi", "a\nb\n\nc");
        let text = entity.serialize();
        assert_eq!(text, "me@example.com\nHi\na\nb\n\nc");

        let parsed = MailEntity::parse("me@example.com", &text).unwrap();
        assert_eq!(parsed.recipient, entity.recipient);
        assert_eq!(parsed.subject, entity.subject);
        assert_eq!(parsed.body, entity.body);
    }

    #[test]
    fn test_resolve_recipient() {
        let book = AddressBook::new(vec![Address::new("Alice", "alice@example.com")]);
        let mut entity = MailEntity::parse("me@example.com", "alice\nHello\nHi").unwrap();
        entity.resolve_recipient(&book).unwrap();
        assert_eq!(entity.recipient.as_str(), "alice@example.com");
        assert!(entity.recipient_is_literal_address());

        let mut unknown = MailEntity::new("me", "zed", "s", "b");
        let err = unknown.resolve_recipient(&book).unwrap_err();
        assert_eq!(err.to_string(), "unable to resolve \"zed\" in addressbook");
        assert_eq!(unknown.recipient, Recipient::Named("zed".into()));
    }

    #[test]
    fn test_cache_filename() {
        let at = Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .unwrap()
            .checked_add_signed(chrono::TimeDelta::microseconds(42))
            .unwrap();
        let entity = MailEntity::new("Jane Doe <jane@example.com>", "me", "s", "b");
        assert_eq!(
            entity.cache_filename_at(at),
            "20240309140507000042_JaneDoe_jane@example.com_.email"
        );
    }

    #[test]
    fn test_cache_filename_strips_separators() {
        let entity = MailEntity::new("../../etc/passwd", "me", "s", "b");
        let name = entity.generate_cache_filename();
        assert!(!name.contains('/'));
        assert!(name.ends_with("_.._.._etc_passwd.email"));
    }

    #[test]
    fn test_cache_filename_caps_long_sender() {
        let sender = format!("{} <x@example.com>", "é".repeat(300));
        let entity = MailEntity::new(sender, "me", "s", "b");
        let name = entity.generate_cache_filename();
        let token = name
            .strip_suffix(MESSAGE_SUFFIX)
            .and_then(|rest| rest.split_once('_'))
            .map(|(_, token)| token)
            .unwrap();
        assert_eq!(token.len(), MAX_TOKEN_LEN);
        assert!(token.chars().all(|c| c == 'é'));
        assert!(name.len() < 255);
    }

    #[test]
    fn test_cache_filename_replaces_control_characters() {
        let entity = MailEntity::new("a\tb\u{0}c@example.com", "me", "s", "b");
        assert!(
            entity
                .generate_cache_filename()
                .ends_with("_a_b_c@example.com.email")
        );
    }

    #[test]
    fn test_source_file() {
        let entity = MailEntity::new("me", "you@example.com", "s", "b")
            .with_source_file("/tmp/outbox/x.email");
        assert_eq!(entity.source_file(), Some(Path::new("/tmp/outbox/x.email")));
    }
}
