//! Envelope address type.

use crate::error::{Error, Result};

/// A bare mailbox address as used in `MAIL FROM` and `RCPT TO`.
///
/// Display forms such as `Jane <jane@example.com>` are accepted and reduced to
/// the part between the angle brackets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Creates a new envelope address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is empty, lacks exactly one `@` with
    /// text on both sides, or contains characters that would break the
    /// command line.
    pub fn new(addr: impl AsRef<str>) -> Result<Self> {
        let addr = strip_display_name(addr.as_ref().trim());

        if addr.is_empty() {
            return Err(Error::InvalidAddress("Address cannot be empty".into()));
        }
        if addr.chars().any(|c| c.is_whitespace() || c == '<' || c == '>') {
            return Err(Error::InvalidAddress(format!(
                "Address contains illegal characters: {addr}"
            )));
        }

        match addr.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(addr.to_string()))
            }
            _ => Err(Error::InvalidAddress(format!(
                "Address must be local@domain: {addr}"
            ))),
        }
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn strip_display_name(addr: &str) -> &str {
    match (addr.rfind('<'), addr.rfind('>')) {
        (Some(open), Some(close)) if open < close => &addr[open + 1..close],
        _ => addr,
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address() {
        let addr = Address::new("user@example.com").unwrap();
        assert_eq!(addr.as_str(), "user@example.com");
    }

    #[test]
    fn test_display_form_is_reduced() {
        let addr = Address::new("Jane Doe <jane@example.com>").unwrap();
        assert_eq!(addr.as_str(), "jane@example.com");
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(Address::new("").is_err());
        assert!(Address::new("userexample.com").is_err());
        assert!(Address::new("@example.com").is_err());
        assert!(Address::new("user@").is_err());
        assert!(Address::new("a@b@c").is_err());
        assert!(Address::new("user name@example.com").is_err());
    }
}
