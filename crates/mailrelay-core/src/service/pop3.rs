//! Inbound transport over POP3.

use mailrelay_pop3::connection::{connect, connect_tls};
use mailrelay_pop3::{Client, Endpoint, Transaction};
use tracing::debug;

use super::{InboundSession, InboundTransport, RawMessage};
use crate::account::{Account, Security};
use crate::error::{Error, Result};

/// Opens POP3 sessions using the account's inbound settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pop3Transport;

impl Pop3Transport {
    /// Creates the transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InboundTransport for Pop3Transport {
    type Session = Pop3Session;

    fn open_session(&mut self, account: &Account) -> Result<Pop3Session> {
        let settings = &account.pop3;
        let endpoint = Endpoint::new(&settings.host, settings.port);
        let stream = match settings.security {
            Security::Tls => connect_tls(&endpoint)?,
            Security::None => connect(&endpoint)?,
            Security::StartTls => {
                return Err(Error::Transport(
                    "POP3: STARTTLS is not supported, use tls or none".to_string(),
                ));
            }
        };

        let mut client = Client::from_stream(stream)?.login(&account.username, &account.password)?;
        let stat = client.stat()?;
        debug!(host = %endpoint.host, messages = stat.count, octets = stat.octets, "mailbox opened");

        Ok(Pop3Session {
            client,
            count: stat.count,
        })
    }
}

/// A logged-in POP3 session. Messages are deleted only by the server's own
/// policy; this client never issues DELE.
#[derive(Debug)]
pub struct Pop3Session {
    client: Client<Transaction>,
    count: usize,
}

impl InboundSession for Pop3Session {
    fn message_count(&self) -> usize {
        self.count
    }

    fn retrieve(&mut self, index: usize) -> Result<RawMessage> {
        let bytes = self.client.retr(index)?;
        Ok(RawMessage::parse(&String::from_utf8_lossy(&bytes)))
    }

    fn close(self) -> Result<()> {
        self.client.quit()?;
        Ok(())
    }
}
