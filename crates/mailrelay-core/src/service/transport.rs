//! Transport capabilities consumed by the batch services.

use crate::account::Account;
use crate::error::Result;
use crate::mail::MailEntity;

/// Sends one message through an outbound relay.
pub trait OutboundTransport {
    /// Delivers `subject` and `body` from the account to `recipient`, which
    /// must already be a literal address.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] on network, authentication or
    /// relay failure.
    fn send(&mut self, account: &Account, recipient: &str, subject: &str, body: &str)
    -> Result<()>;
}

/// Opens sessions against an inbound mailbox.
pub trait InboundTransport {
    /// Session type produced by [`InboundTransport::open_session`].
    type Session: InboundSession;

    /// Connects and logs in. The message count is fixed at this point.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] if the mailbox cannot be opened.
    fn open_session(&mut self, account: &Account) -> Result<Self::Session>;
}

/// An open inbound mailbox.
pub trait InboundSession: Sized {
    /// Number of messages reported when the session was opened.
    fn message_count(&self) -> usize;

    /// Retrieves message `index` (1-based).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] if retrieval fails.
    fn retrieve(&mut self, index: usize) -> Result<RawMessage>;

    /// Ends the session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] if the server rejects the close.
    fn close(self) -> Result<()>;

    /// Lazily retrieves messages `1..=message_count()` in order.
    fn list_raw(&mut self) -> RawMessages<'_, Self> {
        RawMessages {
            count: self.message_count(),
            next: 1,
            session: self,
        }
    }
}

/// Iterator returned by [`InboundSession::list_raw`].
#[derive(Debug)]
pub struct RawMessages<'a, S> {
    session: &'a mut S,
    next: usize,
    count: usize,
}

impl<S: InboundSession> Iterator for RawMessages<'_, S> {
    type Item = Result<RawMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.count {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(self.session.retrieve(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

/// A received message reduced to the fields the queue keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMessage {
    /// From header.
    pub from: String,
    /// To header.
    pub to: String,
    /// Subject header.
    pub subject: String,
    /// Undecoded payload.
    pub body: String,
}

impl RawMessage {
    /// Extracts the fields from RFC 5322 text. Missing headers become empty.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let message = mailrelay_mime::Message::parse(text);
        Self {
            from: message.from().unwrap_or_default().to_string(),
            to: message.to().unwrap_or_default().to_string(),
            subject: message.subject().unwrap_or_default().to_string(),
            body: message.body().to_string(),
        }
    }

    /// Converts into an entity with sender and recipient taken from the
    /// headers.
    #[must_use]
    pub fn into_entity(self) -> MailEntity {
        MailEntity::new(self.from, self.to, self.subject, self.body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Scripted {
        messages: Vec<&'static str>,
    }

    impl InboundSession for Scripted {
        fn message_count(&self) -> usize {
            self.messages.len()
        }

        fn retrieve(&mut self, index: usize) -> Result<RawMessage> {
            self.messages
                .get(index - 1)
                .map(|text| RawMessage::parse(text))
                .ok_or_else(|| Error::Transport(format!("no message {index}")))
        }

        fn close(self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_parse_headers() {
        let raw = RawMessage::parse(
            "From: Jane <jane@example.com>\nTo: me@example.com\nSubject: Hi\n\nline 1\nline 2\n",
        );
        assert_eq!(raw.from, "Jane <jane@example.com>");
        assert_eq!(raw.to, "me@example.com");
        assert_eq!(raw.subject, "Hi");
        assert_eq!(raw.body, "line 1\nline 2\n");
    }

    #[test]
    fn test_parse_missing_headers() {
        let raw = RawMessage::parse("X-Other: 1\n\nbody");
        assert_eq!(raw.from, "");
        assert_eq!(raw.subject, "");
        assert_eq!(raw.body, "body");
    }

    #[test]
    fn test_list_raw_in_index_order() {
        let mut session = Scripted {
            messages: vec!["Subject: one\n\n", "Subject: two\n\n"],
        };
        let mut list = session.list_raw();
        assert_eq!(list.size_hint(), (2, Some(2)));
        let subjects: Vec<_> = list.by_ref().map(|m| m.unwrap().subject).collect();
        assert_eq!(subjects, vec!["one", "two"]);
        assert!(list.next().is_none());
    }

    #[test]
    fn test_into_entity() {
        let entity = RawMessage::parse("From: a@example.com\nTo: me@example.com\nSubject: s\n\nb")
            .into_entity();
        assert_eq!(entity.sender, "a@example.com");
        assert_eq!(entity.recipient.as_str(), "me@example.com");
        assert!(entity.source_file().is_none());
    }
}
