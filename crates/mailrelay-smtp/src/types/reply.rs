//! SMTP reply types.

/// A complete (possibly multi-line) reply from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply code (e.g., 250).
    pub code: ReplyCode,
    /// Text of each reply line, code and separator stripped.
    pub message: Vec<String>,
}

impl Reply {
    /// Creates a new reply.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec is not const-compatible
    pub fn new(code: ReplyCode, message: Vec<String>) -> Self {
        Self { code, message }
    }

    /// Returns true if this is a success reply (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Returns the reply text joined with newlines.
    #[must_use]
    pub fn message_text(&self) -> String {
        self.message.join("\n")
    }
}

/// Three-digit SMTP reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// 220 Service ready
    pub const SERVICE_READY: Self = Self(220);
    /// 221 Service closing transmission channel
    pub const CLOSING: Self = Self(221);
    /// 235 Authentication succeeded
    pub const AUTH_SUCCESS: Self = Self(235);
    /// 250 Requested mail action okay, completed
    pub const OK: Self = Self(250);
    /// 334 Continue with authentication
    pub const AUTH_CONTINUE: Self = Self(334);
    /// 354 Start mail input
    pub const START_DATA: Self = Self(354);

    /// Creates a new reply code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this is a success code (2xx).
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }
}

impl std::fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(ReplyCode::OK.is_success());
        assert!(ReplyCode::CLOSING.is_success());
        assert!(!ReplyCode::START_DATA.is_success());
        assert!(!ReplyCode::new(550).is_success());
    }

    #[test]
    fn message_text_joins_lines() {
        let reply = Reply::new(
            ReplyCode::SERVICE_READY,
            vec!["smtp.example.com ESMTP".into(), "ready".into()],
        );
        assert_eq!(reply.message_text(), "smtp.example.com ESMTP\nready");
        assert_eq!(ReplyCode::OK.to_string(), "250");
    }
}
