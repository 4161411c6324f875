//! POP3 connection management with type-state pattern.

mod client;
mod stream;

pub use client::{Authorization, Client, Transaction};
pub use stream::{Pop3Stream, Socket, connect, connect_tls};

use std::time::Duration;

/// Where to connect and how long to wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Server hostname.
    pub host: String,
    /// Server port (995 for implicit TLS, 110 for plaintext).
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
}
