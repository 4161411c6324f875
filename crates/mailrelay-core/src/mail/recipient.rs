//! Recipient addressing.

use std::fmt;

use crate::contacts::AddressBook;
use crate::error::{Error, Result};

/// Returns true if `value` looks like a mail address: an `@` followed
/// somewhere later by a `.`.
///
/// This is a local heuristic, not an RFC 5322 validator.
#[must_use]
pub fn is_literal_address(value: &str) -> bool {
    value
        .find('@')
        .is_some_and(|at| value[at + 1..].contains('.'))
}

/// A recipient as written by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Already a mail address.
    Literal(String),
    /// An address-book name, to be resolved before sending.
    Named(String),
}

impl Recipient {
    /// Classifies raw recipient text.
    #[must_use]
    pub fn classify(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if is_literal_address(&raw) {
            Self::Literal(raw)
        } else {
            Self::Named(raw)
        }
    }

    /// Returns the address or name as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(value) | Self::Named(value) => value,
        }
    }

    /// Returns true for [`Recipient::Literal`].
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Resolves a name against the address book. Literals resolve to
    /// themselves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedRecipient`] if no entry matches the name.
    pub fn resolve(&self, book: &AddressBook) -> Result<Self> {
        match self {
            Self::Literal(_) => Ok(self.clone()),
            Self::Named(name) => book
                .lookup(name)
                .map(|entry| Self::Literal(entry.address.clone()))
                .ok_or_else(|| Error::UnresolvedRecipient(name.clone())),
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::contacts::Address;
    use proptest::prelude::*;

    #[test]
    fn test_literal_examples() {
        assert!(is_literal_address("alice@example.com"));
        assert!(is_literal_address("Alice <alice@mail.example.org>"));
        assert!(is_literal_address("@."));
        assert!(!is_literal_address("alice"));
        assert!(!is_literal_address("alice@localhost"));
        assert!(!is_literal_address("first.last@"));
        assert!(!is_literal_address(""));
    }

    #[test]
    fn test_classify() {
        assert!(Recipient::classify("bob@example.com").is_literal());
        assert_eq!(Recipient::classify("bob"), Recipient::Named("bob".into()));
    }

    #[test]
    fn test_resolve_named() {
        let book = AddressBook::new(vec![Address::new("Bob", "bob@example.com")]);
        let resolved = Recipient::classify("BOB").resolve(&book).unwrap();
        assert_eq!(resolved, Recipient::Literal("bob@example.com".into()));
        // Resolution is idempotent.
        assert_eq!(resolved.resolve(&book).unwrap(), resolved);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = Recipient::classify("carol")
            .resolve(&AddressBook::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvedRecipient(name) if name == "carol"));
    }

    proptest! {
        #[test]
        fn at_then_dot_is_literal(
            local in "[^\n]*",
            middle in "[^\n]*",
            tail in "[^\n]*",
        ) {
            let candidate = format!("{local}@{middle}.{tail}");
            prop_assert!(is_literal_address(&candidate));
        }

        #[test]
        fn without_at_is_never_literal(value in "[^@]*") {
            prop_assert!(!is_literal_address(&value));
        }
    }
}
