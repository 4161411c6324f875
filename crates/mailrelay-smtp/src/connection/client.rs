//! Type-state SMTP client.

use super::{ServerInfo, SmtpStream};
use crate::command::Command;
use crate::error::{Error, Result};
use crate::parser::{is_last_reply_line, parse_reply};
use crate::types::{Address, AuthMechanism, Extension, Reply, ReplyCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::HashSet;
use std::marker::PhantomData;
use tracing::debug;

/// Type-state marker: greeting read, not yet authenticated.
#[derive(Debug)]
pub struct Connected;

/// Type-state marker: authenticated.
#[derive(Debug)]
pub struct Authenticated;

/// Type-state marker: `MAIL FROM` accepted.
#[derive(Debug)]
pub struct MailTransaction;

/// Type-state marker: at least one recipient accepted.
#[derive(Debug)]
pub struct RecipientAdded;

/// Type-state marker: `DATA` accepted, message body expected.
#[derive(Debug)]
pub struct Data;

/// SMTP client with type-state pattern.
#[derive(Debug)]
pub struct Client<State> {
    stream: SmtpStream,
    server_info: ServerInfo,
    _state: PhantomData<State>,
}

impl Client<Connected> {
    /// Creates a client from a stream and reads the server greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the greeting fails or the server refuses
    /// the session.
    pub fn from_stream(mut stream: SmtpStream) -> Result<Self> {
        let greeting = read_reply(&mut stream)?;
        if greeting.code != ReplyCode::SERVICE_READY {
            return Err(Error::rejected(&greeting));
        }

        let hostname = greeting
            .message
            .first()
            .and_then(|msg| msg.split_whitespace().next())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            stream,
            server_info: ServerInfo {
                hostname,
                extensions: HashSet::new(),
            },
            _state: PhantomData,
        })
    }

    /// Sends EHLO and records the advertised extensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects EHLO.
    pub fn ehlo(mut self, client_hostname: &str) -> Result<Self> {
        self.refresh_extensions(client_hostname)?;
        Ok(self)
    }

    /// Upgrades the connection to TLS using STARTTLS and repeats EHLO.
    ///
    /// # Errors
    ///
    /// Returns an error if STARTTLS is not advertised or the upgrade fails.
    pub fn starttls(mut self, hostname: &str) -> Result<Self> {
        if !self.server_info.supports(&Extension::StartTls) {
            return Err(Error::NotSupported("STARTTLS".into()));
        }

        self.expect_success(&Command::StartTls)?;
        self.stream = self.stream.upgrade_to_tls(hostname)?;
        debug!(host = hostname, "smtp upgraded to TLS");

        // Capabilities learned in plaintext are discarded (RFC 3207 §4.2).
        self.refresh_extensions(hostname)?;
        Ok(self)
    }

    /// Authenticates with the best mechanism the server offers.
    ///
    /// PLAIN is preferred; LOGIN is used only when it is the sole option.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn authenticate(self, username: &str, password: &str) -> Result<Client<Authenticated>> {
        let offered = self.server_info.auth_mechanisms();
        if offered.contains(&AuthMechanism::Login) && !offered.contains(&AuthMechanism::Plain) {
            self.auth_login(username, password)
        } else {
            self.auth_plain(username, password)
        }
    }

    /// Authenticates using the PLAIN mechanism.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails.
    pub fn auth_plain(mut self, username: &str, password: &str) -> Result<Client<Authenticated>> {
        let credentials = format!("\0{username}\0{password}");
        self.expect_success(&Command::Auth {
            mechanism: AuthMechanism::Plain,
            initial_response: Some(STANDARD.encode(credentials.as_bytes())),
        })?;
        Ok(self.into_state())
    }

    /// Authenticates using the LOGIN mechanism.
    ///
    /// # Errors
    ///
    /// Returns an error if the server does not prompt as expected or rejects
    /// the credentials.
    pub fn auth_login(mut self, username: &str, password: &str) -> Result<Client<Authenticated>> {
        self.expect_code(
            &Command::Auth {
                mechanism: AuthMechanism::Login,
                initial_response: None,
            },
            ReplyCode::AUTH_CONTINUE,
        )?;
        self.expect_code(
            &Command::AuthResponse(STANDARD.encode(username)),
            ReplyCode::AUTH_CONTINUE,
        )?;
        self.expect_success(&Command::AuthResponse(STANDARD.encode(password)))?;
        Ok(self.into_state())
    }

    fn refresh_extensions(&mut self, client_hostname: &str) -> Result<()> {
        let reply = self.expect_success(&Command::Ehlo {
            hostname: client_hostname.to_string(),
        })?;

        // First line is the server's greeting, the rest are capabilities.
        self.server_info.extensions = reply
            .message
            .iter()
            .skip(1)
            .map(|line| Extension::parse(line))
            .collect();
        Ok(())
    }
}

impl Client<Authenticated> {
    /// Starts a mail transaction.
    ///
    /// Declares `BODY=8BITMIME` when the server advertises it.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the sender.
    pub fn mail_from(mut self, from: Address) -> Result<Client<MailTransaction>> {
        let eight_bit = self.server_info.supports(&Extension::EightBitMime);
        self.expect_success(&Command::MailFrom { from, eight_bit })?;
        Ok(self.into_state())
    }
}

impl Client<MailTransaction> {
    /// Adds the first recipient to the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the recipient.
    pub fn rcpt_to(mut self, to: Address) -> Result<Client<RecipientAdded>> {
        self.expect_success(&Command::RcptTo { to })?;
        Ok(self.into_state())
    }
}

impl Client<RecipientAdded> {
    /// Adds another recipient to the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the recipient.
    pub fn rcpt_to(mut self, to: Address) -> Result<Self> {
        self.expect_success(&Command::RcptTo { to })?;
        Ok(self)
    }

    /// Begins sending message data.
    ///
    /// # Errors
    ///
    /// Returns an error if the server does not answer 354.
    pub fn data(mut self) -> Result<Client<Data>> {
        self.expect_code(&Command::Data, ReplyCode::START_DATA)?;
        Ok(self.into_state())
    }

    /// Abandons the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects RSET.
    pub fn reset(mut self) -> Result<Client<Authenticated>> {
        self.expect_success(&Command::Rset)?;
        Ok(self.into_state())
    }
}

impl Client<Data> {
    /// Sends the message content and completes the transaction.
    ///
    /// Line endings are normalized to CRLF, lines starting with `.` are
    /// dot-stuffed and the terminating `.` line is appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the message exceeds the advertised SIZE or the
    /// server rejects it.
    pub fn send_message(mut self, message: &[u8]) -> Result<Client<Authenticated>> {
        if let Some(limit) = self.server_info.max_message_size()
            && limit > 0
            && message.len() > limit
        {
            return Err(Error::Protocol(format!(
                "Message of {} bytes exceeds server limit of {limit}",
                message.len()
            )));
        }

        let mut wire = Vec::with_capacity(message.len() + 64);
        let message = message.strip_suffix(b"\n").unwrap_or(message);
        for line in message.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if line.first() == Some(&b'.') {
                wire.push(b'.');
            }
            wire.extend_from_slice(line);
            wire.extend_from_slice(b"\r\n");
        }
        wire.extend_from_slice(b".\r\n");

        self.stream.write_all(&wire)?;
        let reply = read_reply(&mut self.stream)?;
        if !reply.is_success() {
            return Err(Error::rejected(&reply));
        }
        debug!(bytes = wire.len(), "smtp message accepted");

        Ok(self.into_state())
    }
}

// Common implementation for all states
impl<S> Client<S> {
    /// Returns what the server advertised.
    #[must_use]
    pub const fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Sends QUIT and closes the connection (available in any state).
    ///
    /// # Errors
    ///
    /// Returns an error if the server answers QUIT with an error.
    pub fn quit(mut self) -> Result<()> {
        let reply = self.send_command(&Command::Quit)?;
        if !reply.is_success() {
            return Err(Error::rejected(&reply));
        }
        Ok(())
    }

    fn into_state<T>(self) -> Client<T> {
        Client {
            stream: self.stream,
            server_info: self.server_info,
            _state: PhantomData,
        }
    }

    fn send_command(&mut self, cmd: &Command) -> Result<Reply> {
        debug!(command = %cmd.redacted(), "smtp >");
        self.stream.write_all(&cmd.serialize())?;
        let reply = read_reply(&mut self.stream)?;
        debug!(code = %reply.code, "smtp <");
        Ok(reply)
    }

    fn expect_success(&mut self, cmd: &Command) -> Result<Reply> {
        let reply = self.send_command(cmd)?;
        if reply.is_success() {
            Ok(reply)
        } else {
            Err(Error::rejected(&reply))
        }
    }

    fn expect_code(&mut self, cmd: &Command, expected: ReplyCode) -> Result<Reply> {
        let reply = self.send_command(cmd)?;
        if reply.code == expected {
            Ok(reply)
        } else {
            Err(Error::rejected(&reply))
        }
    }
}

fn read_reply(stream: &mut SmtpStream) -> Result<Reply> {
    let mut lines = Vec::new();
    loop {
        let line = stream.read_line()?;
        if line.is_empty() {
            continue;
        }

        let is_last = is_last_reply_line(&line);
        lines.push(line);

        if is_last {
            break;
        }
    }

    parse_reply(&lines)
}
