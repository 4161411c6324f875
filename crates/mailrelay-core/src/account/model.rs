//! Account model types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Security/encryption mode for connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Security {
    /// No encryption (not recommended).
    None,
    /// Implicit TLS (connect directly with TLS).
    Tls,
    /// STARTTLS upgrade after plaintext connect.
    #[serde(rename = "starttls")]
    StartTls,
}

impl Security {
    /// Get display name for the security mode.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None (insecure)",
            Self::Tls => "SSL/TLS",
            Self::StartTls => "STARTTLS",
        }
    }
}

/// Outbound relay settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Security mode.
    pub security: Security,
}

impl SmtpConfig {
    /// Get default port for the security mode.
    #[must_use]
    pub const fn default_port(security: Security) -> u16 {
        match security {
            Security::None => 25,
            Security::StartTls => 587,
            Security::Tls => 465,
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: Self::default_port(Security::StartTls),
            security: Security::StartTls,
        }
    }
}

/// Inbound mailbox settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pop3Config {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Security mode. STARTTLS is not offered for POP3.
    pub security: Security,
}

impl Default for Pop3Config {
    fn default() -> Self {
        Self {
            host: "pop.gmail.com".to_string(),
            port: 995,
            security: Security::Tls,
        }
    }
}

/// The local mail account: identity, credential and servers.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Login name, also the identity used to classify messages.
    pub username: String,
    /// Credential for both servers.
    pub password: String,
    /// Outbound relay.
    pub smtp: SmtpConfig,
    /// Inbound mailbox.
    pub pop3: Pop3Config,
}

impl Account {
    /// Creates an account using the default servers.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            smtp: SmtpConfig::default(),
            pop3: Pop3Config::default(),
        }
    }

    /// The address that identifies this account in sender/recipient fields.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &"****")
            .field("smtp", &self.smtp)
            .field("pop3", &self.pop3)
            .finish()
    }
}
