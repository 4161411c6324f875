//! SMTP command serialization.

use crate::types::{Address, AuthMechanism};

/// A command the client can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// EHLO - Extended greeting
    Ehlo {
        /// Client hostname
        hostname: String,
    },
    /// STARTTLS - Upgrade to TLS
    StartTls,
    /// AUTH - Begin authentication
    Auth {
        /// Authentication mechanism
        mechanism: AuthMechanism,
        /// Initial response (SASL-IR)
        initial_response: Option<String>,
    },
    /// A bare base64 line answering a 334 challenge
    AuthResponse(String),
    /// MAIL FROM - Start mail transaction
    MailFrom {
        /// Sender address
        from: Address,
        /// Declare `BODY=8BITMIME`
        eight_bit: bool,
    },
    /// RCPT TO - Add recipient
    RcptTo {
        /// Recipient address
        to: Address,
    },
    /// DATA - Begin message data
    Data,
    /// RSET - Abort the transaction
    Rset,
    /// QUIT - Close connection
    Quit,
}

impl Command {
    /// Serializes the command, including the trailing CRLF.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut line = match self {
            Self::Ehlo { hostname } => format!("EHLO {hostname}"),
            Self::StartTls => "STARTTLS".to_string(),
            Self::Auth {
                mechanism,
                initial_response: Some(response),
            } => format!("AUTH {} {response}", mechanism.as_str()),
            Self::Auth {
                mechanism,
                initial_response: None,
            } => format!("AUTH {}", mechanism.as_str()),
            Self::AuthResponse(response) => response.clone(),
            Self::MailFrom { from, eight_bit } => {
                if *eight_bit {
                    format!("MAIL FROM:<{from}> BODY=8BITMIME")
                } else {
                    format!("MAIL FROM:<{from}>")
                }
            }
            Self::RcptTo { to } => format!("RCPT TO:<{to}>"),
            Self::Data => "DATA".to_string(),
            Self::Rset => "RSET".to_string(),
            Self::Quit => "QUIT".to_string(),
        }
        .into_bytes();

        line.extend_from_slice(b"\r\n");
        line
    }

    /// Returns a form of the command that is safe to log.
    #[must_use]
    pub fn redacted(&self) -> String {
        match self {
            Self::Auth { mechanism, .. } => format!("AUTH {} ****", mechanism.as_str()),
            Self::AuthResponse(_) => "****".to_string(),
            other => String::from_utf8_lossy(&other.serialize())
                .trim_end()
                .to_string(),
        }
    }
}
