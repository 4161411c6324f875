//! SMTP connection management with type-state pattern.

mod client;
mod stream;

pub use client::{Authenticated, Client, Connected, Data, MailTransaction, RecipientAdded};
pub use stream::{SmtpStream, Socket, connect, connect_tls};

use crate::types::{AuthMechanism, Extension};
use std::collections::HashSet;
use std::time::Duration;

/// Where to connect and how long to wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Read/write timeout once connected.
    pub io_timeout: Duration,
}

impl Endpoint {
    /// Creates an endpoint with a 30s connect and 60s I/O timeout.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: Duration::from_secs(30),
            io_timeout: Duration::from_secs(60),
        }
    }

    /// Overrides both timeouts.
    #[must_use]
    pub const fn with_timeouts(mut self, connect: Duration, io: Duration) -> Self {
        self.connect_timeout = connect;
        self.io_timeout = io;
        self
    }
}

/// Server capabilities from the greeting and EHLO reply.
#[derive(Debug, Clone, Default)]
pub struct ServerInfo {
    /// Server hostname from greeting.
    pub hostname: String,
    /// Advertised extensions.
    pub extensions: HashSet<Extension>,
}

impl ServerInfo {
    /// Checks if the server advertises an extension.
    #[must_use]
    pub fn supports(&self, ext: &Extension) -> bool {
        self.extensions.contains(ext)
    }

    /// Returns the maximum message size, if advertised.
    #[must_use]
    pub fn max_message_size(&self) -> Option<usize> {
        self.extensions.iter().find_map(|ext| match ext {
            Extension::Size(size) => *size,
            _ => None,
        })
    }

    /// Returns the advertised authentication mechanisms we can drive.
    #[must_use]
    pub fn auth_mechanisms(&self) -> Vec<AuthMechanism> {
        self.extensions
            .iter()
            .find_map(|ext| match ext {
                Extension::Auth(mechanisms) => Some(mechanisms.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }
}
