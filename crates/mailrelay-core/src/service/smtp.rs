//! Outbound transport over SMTP.

use mailrelay_mime::MessageBuilder;
use mailrelay_smtp::connection::{connect, connect_tls};
use mailrelay_smtp::{Address, Client, Endpoint};
use tracing::{debug, info};

use super::OutboundTransport;
use crate::account::{Account, Security};
use crate::error::Result;

/// Sends each message over its own SMTP connection.
#[derive(Debug, Clone)]
pub struct SmtpTransport {
    client_hostname: String,
}

impl SmtpTransport {
    /// Creates a transport that introduces itself as `client_hostname` in EHLO.
    #[must_use]
    pub fn new(client_hostname: impl Into<String>) -> Self {
        Self {
            client_hostname: client_hostname.into(),
        }
    }
}

impl Default for SmtpTransport {
    fn default() -> Self {
        Self::new("localhost")
    }
}

impl OutboundTransport for SmtpTransport {
    fn send(
        &mut self,
        account: &Account,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<()> {
        let payload = MessageBuilder::new()
            .from(account.identity())
            .to(recipient)
            .subject(subject)
            .body(body)
            .build()?;
        let from = Address::new(account.identity())?;
        let to = Address::new(recipient)?;

        let settings = &account.smtp;
        let endpoint = Endpoint::new(&settings.host, settings.port);
        debug!(
            host = %endpoint.host,
            port = endpoint.port,
            security = settings.security.display_name(),
            "connecting to relay"
        );

        // Connect based on security mode
        let stream = match settings.security {
            Security::Tls => connect_tls(&endpoint)?,
            Security::StartTls | Security::None => connect(&endpoint)?,
        };
        let client = Client::from_stream(stream)?.ehlo(&self.client_hostname)?;

        // Upgrade to TLS if using STARTTLS
        let client = if settings.security == Security::StartTls {
            client.starttls(&settings.host)?
        } else {
            client
        };

        client
            .authenticate(&account.username, &account.password)?
            .mail_from(from)?
            .rcpt_to(to)?
            .data()?
            .send_message(payload.as_bytes())?
            .quit()?;

        info!(to = recipient, subject, "message relayed");
        Ok(())
    }
}
