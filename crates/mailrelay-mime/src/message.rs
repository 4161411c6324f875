//! Message parsing and composition.

use crate::error::{Error, Result};
use crate::header::Headers;
use chrono::{DateTime, FixedOffset, Local};

/// A parsed message: headers plus the raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Message headers.
    pub headers: Headers,
    body: String,
}

impl Message {
    /// Parses a raw message.
    ///
    /// Headers end at the first empty line; everything after it is the body,
    /// kept verbatim. A message without an empty line has no body.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (head, body) = split_head_body(raw);
        Self {
            headers: Headers::parse(head),
            body: body.to_string(),
        }
    }

    /// Gets the From header.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.headers.get("from")
    }

    /// Gets the To header.
    #[must_use]
    pub fn to(&self) -> Option<&str> {
        self.headers.get("to")
    }

    /// Gets the Subject header.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.headers.get("subject")
    }

    /// Returns the undecoded payload.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

fn split_head_body(raw: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in raw.split_inclusive('\n') {
        let end = offset + line.len();
        if line.trim_end_matches(['\r', '\n']).is_empty() {
            return (&raw[..offset], &raw[end..]);
        }
        offset = end;
    }
    (raw, "")
}

/// Composes a single-part `text/plain` message.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    from: Option<String>,
    to: Option<String>,
    subject: String,
    date: Option<DateTime<FixedOffset>>,
    body: String,
}

impl MessageBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the From header.
    #[must_use]
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Sets the To header.
    #[must_use]
    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Sets the Subject header.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Pins the Date header (defaults to the current local time).
    #[must_use]
    pub fn date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the plain-text body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Renders the message with CRLF header lines.
    ///
    /// # Errors
    ///
    /// Returns an error if From or To is missing, or if any header value
    /// contains a line break.
    pub fn build(self) -> Result<String> {
        let from = self
            .from
            .ok_or_else(|| Error::MissingHeader("From".into()))?;
        let to = self.to.ok_or_else(|| Error::MissingHeader("To".into()))?;
        let date = self
            .date
            .unwrap_or_else(|| Local::now().fixed_offset())
            .to_rfc2822();

        let mut headers = Headers::new();
        for (name, value) in [("From", from), ("To", to), ("Subject", self.subject)] {
            if value.contains(['\r', '\n']) {
                return Err(Error::InvalidHeader { name: name.into() });
            }
            headers.add(name, value);
        }
        headers.add("Date", date);
        headers.add("MIME-Version", "1.0");
        headers.add("Content-Type", "text/plain; charset=utf-8");
        headers.add("Content-Transfer-Encoding", "8bit");

        Ok(format!("{headers}\r\n{}", self.body))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_simple_message() {
        let message = Message::parse(
            "From: Jane <jane@example.com>\r\nTo: me@example.com\r\nSubject: Lunch\r\n\r\nNoon?\r\nJ\r\n",
        );
        assert_eq!(message.from(), Some("Jane <jane@example.com>"));
        assert_eq!(message.to(), Some("me@example.com"));
        assert_eq!(message.subject(), Some("Lunch"));
        assert_eq!(message.body(), "Noon?\r\nJ\r\n");
    }

    #[test]
    fn test_parse_without_body() {
        let message = Message::parse("Subject: empty\n");
        assert_eq!(message.subject(), Some("empty"));
        assert_eq!(message.body(), "");
    }

    #[test]
    fn test_body_keeps_later_blank_lines() {
        let message = Message::parse("Subject: x\n\npara one\n\npara two");
        assert_eq!(message.body(), "para one\n\npara two");
    }

    #[test]
    fn test_build_message() {
        let date = DateTime::parse_from_rfc2822("Tue, 1 Jul 2025 10:52:37 +0200").unwrap();
        let wire = MessageBuilder::new()
            .from("me@example.com")
            .to("you@example.com")
            .subject("Hello")
            .date(date)
            .body("Hi there")
            .build()
            .unwrap();

        assert_eq!(
            wire,
            concat!(
                "From: me@example.com\r\n",
                "To: you@example.com\r\n",
                "Subject: Hello\r\n",
                "Date: Tue, 1 Jul 2025 10:52:37 +0200\r\n",
                "MIME-Version: 1.0\r\n",
                "Content-Type: text/plain; charset=utf-8\r\n",
                "Content-Transfer-Encoding: 8bit\r\n",
                "\r\n",
                "Hi there",
            )
        );
    }

    #[test]
    fn test_build_rejects_header_injection() {
        let result = MessageBuilder::new()
            .from("me@example.com")
            .to("you@example.com")
            .subject("Hi\r\nBcc: victim@example.com")
            .build();
        assert!(matches!(result, Err(Error::InvalidHeader { name }) if name == "Subject"));
    }

    #[test]
    fn test_build_requires_recipient() {
        let result = MessageBuilder::new().from("me@example.com").build();
        assert!(matches!(result, Err(Error::MissingHeader(h)) if h == "To"));
    }

    proptest! {
        #[test]
        fn built_messages_parse_back(
            subject in "[A-Za-z0-9 ,.!?]{0,40}",
            body in "[A-Za-z0-9 \n]{0,200}",
        ) {
            let wire = MessageBuilder::new()
                .from("me@example.com")
                .to("you@example.com")
                .subject(subject.clone())
                .body(body.clone())
                .build()
                .unwrap();
            let parsed = Message::parse(&wire);
            prop_assert_eq!(parsed.subject(), Some(subject.trim()));
            prop_assert_eq!(parsed.body(), body.as_str());
        }
    }
}
