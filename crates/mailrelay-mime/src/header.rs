//! RFC 5322 header handling.

use std::fmt;

/// Ordered collection of message headers with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header, keeping any existing values.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Gets the first value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of header lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a header block.
    ///
    /// Folded lines (starting with space or tab) are joined onto the previous
    /// header with a single space. Parsing stops at the first empty line.
    /// Lines without a colon are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut headers = Self::new();
        let mut current: Option<(String, String)> = None;

        for line in text.lines() {
            if line.is_empty() {
                break;
            }

            if line.starts_with([' ', '\t']) {
                if let Some((_, value)) = current.as_mut() {
                    value.push(' ');
                    value.push_str(line.trim());
                }
                continue;
            }

            if let Some((name, value)) = current.take() {
                headers.add(name, value);
            }
            if let Some((name, value)) = line.split_once(':') {
                current = Some((name.trim().to_string(), value.trim().to_string()));
            }
        }

        if let Some((name, value)) = current {
            headers.add(name, value);
        }

        headers
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.entries {
            write!(f, "{name}: {value}\r\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let headers = Headers::parse("Subject: Hello\nFROM: a@example.com\n");
        assert_eq!(headers.get("subject"), Some("Hello"));
        assert_eq!(headers.get("From"), Some("a@example.com"));
        assert_eq!(headers.get("to"), None);
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_folded_header() {
        let headers = Headers::parse("Subject: a very\r\n\tlong subject\r\nTo: b@example.com\r\n");
        assert_eq!(headers.get("subject"), Some("a very long subject"));
        assert_eq!(headers.get("to"), Some("b@example.com"));
    }

    #[test]
    fn test_stops_at_blank_line() {
        let headers = Headers::parse("Subject: x\n\nNot: a header\n");
        assert_eq!(headers.get("not"), None);
    }

    #[test]
    fn test_first_value_wins() {
        let headers = Headers::parse("Received: one\nReceived: two\n");
        assert_eq!(headers.get("received"), Some("one"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_display_uses_crlf() {
        let mut headers = Headers::new();
        headers.add("Subject", "Hi");
        headers.add("To", "b@example.com");
        assert_eq!(headers.to_string(), "Subject: Hi\r\nTo: b@example.com\r\n");
        assert!(!headers.is_empty());
    }
}
