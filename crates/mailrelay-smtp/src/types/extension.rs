//! SMTP extension types.

/// An extension advertised in the EHLO reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Extension {
    /// STARTTLS - TLS upgrade
    StartTls,
    /// AUTH - Authentication mechanisms
    Auth(Vec<AuthMechanism>),
    /// SIZE - Maximum message size
    Size(Option<usize>),
    /// 8BITMIME - 8-bit MIME transport
    EightBitMime,
    /// PIPELINING - Command pipelining
    Pipelining,
    /// SMTPUTF8 - UTF-8 email addresses
    SmtpUtf8,
    /// Anything else, verbatim
    Unknown(String),
}

impl Extension {
    /// Parses one EHLO capability line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Self::Unknown(line.to_string());
        };

        match keyword.to_ascii_uppercase().as_str() {
            "STARTTLS" => Self::StartTls,
            "AUTH" => Self::Auth(words.filter_map(AuthMechanism::parse).collect()),
            "SIZE" => Self::Size(words.next().and_then(|s| s.parse().ok())),
            "8BITMIME" => Self::EightBitMime,
            "PIPELINING" => Self::Pipelining,
            "SMTPUTF8" => Self::SmtpUtf8,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// SASL mechanisms this client can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMechanism {
    /// PLAIN - single base64 blob
    Plain,
    /// LOGIN - username and password as separate challenges
    Login,
}

impl AuthMechanism {
    /// Parses a mechanism name, ignoring ones we cannot drive.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PLAIN" => Some(Self::Plain),
            "LOGIN" => Some(Self::Login),
            _ => None,
        }
    }

    /// Returns the mechanism name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "PLAIN",
            Self::Login => "LOGIN",
        }
    }
}
