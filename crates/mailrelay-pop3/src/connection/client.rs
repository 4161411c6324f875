//! Type-state POP3 client.

use super::Pop3Stream;
use crate::command::Command;
use crate::error::Result;
use crate::response::{MailboxStat, Status, unstuff};
use std::marker::PhantomData;
use tracing::debug;

/// Type-state marker: greeting read, credentials not yet accepted.
#[derive(Debug)]
pub struct Authorization;

/// Type-state marker: logged in, maildrop locked.
#[derive(Debug)]
pub struct Transaction;

/// POP3 client with type-state pattern.
#[derive(Debug)]
pub struct Client<State> {
    stream: Pop3Stream,
    _state: PhantomData<State>,
}

impl Client<Authorization> {
    /// Creates a client from a stream and reads the server greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if the greeting is missing or `-ERR`.
    pub fn from_stream(mut stream: Pop3Stream) -> Result<Self> {
        let greeting = Status::parse(&stream.read_line()?)?.into_result()?;
        debug!(greeting = %greeting, "pop3 <");
        Ok(Self {
            stream,
            _state: PhantomData,
        })
    }

    /// Logs in with `USER` and `PASS`.
    ///
    /// # Errors
    ///
    /// Returns an error if either command is rejected.
    pub fn login(mut self, username: &str, password: &str) -> Result<Client<Transaction>> {
        self.command(&Command::User(username.to_string()))?;
        self.command(&Command::Pass(password.to_string()))?;
        Ok(Client {
            stream: self.stream,
            _state: PhantomData,
        })
    }
}

impl Client<Transaction> {
    /// Returns the message count and maildrop size.
    ///
    /// # Errors
    ///
    /// Returns an error if STAT is rejected or malformed.
    pub fn stat(&mut self) -> Result<MailboxStat> {
        let text = self.command(&Command::Stat)?;
        MailboxStat::parse(&text)
    }

    /// Retrieves message `index` (1-based) as raw bytes with CRLF line endings
    /// reduced to LF.
    ///
    /// # Errors
    ///
    /// Returns an error if RETR is rejected or the connection drops mid-message.
    pub fn retr(&mut self, index: usize) -> Result<Vec<u8>> {
        self.command(&Command::Retr(index))?;

        let mut message = Vec::new();
        loop {
            let line = self.stream.read_line_bytes()?;
            let Some(content) = unstuff(&line) else {
                break;
            };
            message.extend_from_slice(content);
            message.push(b'\n');
        }
        debug!(index, bytes = message.len(), "pop3 retrieved");
        Ok(message)
    }
}

// Common implementation for all states
impl<S> Client<S> {
    /// Sends QUIT, committing the session, and closes the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if QUIT is rejected.
    pub fn quit(mut self) -> Result<()> {
        self.command(&Command::Quit)?;
        Ok(())
    }

    fn command(&mut self, cmd: &Command) -> Result<String> {
        debug!(command = %cmd.redacted(), "pop3 >");
        self.stream.write_all(&cmd.serialize())?;
        Status::parse(&self.stream.read_line()?)?.into_result()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::{self, Cursor, Read, Write};
    use std::sync::{Arc, Mutex};

    struct MockSocket {
        replies: Cursor<Vec<u8>>,
        sent: Arc<Mutex<Vec<u8>>>,
    }

    impl Read for MockSocket {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.replies.read(buf)
        }
    }

    impl Write for MockSocket {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.sent.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn mock(script: &str) -> (Pop3Stream, Arc<Mutex<Vec<u8>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let socket = MockSocket {
            replies: Cursor::new(script.as_bytes().to_vec()),
            sent: Arc::clone(&sent),
        };
        (Pop3Stream::from_socket(socket), sent)
    }

    #[test]
    fn test_session_retrieves_in_order() {
        let (stream, sent) = mock(concat!(
            "+OK POP3 server ready\r\n",
            "+OK\r\n",
            "+OK logged in\r\n",
            "+OK 2 96\r\n",
            "+OK message follows\r\n",
            "From: a@example.com\r\n",
            "Subject: one\r\n",
            "\r\n",
            "..dotted\r\n",
            ".\r\n",
            "+OK message follows\r\n",
            "Subject: two\r\n",
            "\r\n",
            "body\r\n",
            ".\r\n",
            "+OK bye\r\n",
        ));

        let mut client = Client::from_stream(stream)
            .unwrap()
            .login("me@example.com", "pw")
            .unwrap();

        let stat = client.stat().unwrap();
        assert_eq!(stat.count, 2);

        let first = client.retr(1).unwrap();
        assert_eq!(
            first,
            b"From: a@example.com\nSubject: one\n\n.dotted\n".to_vec()
        );
        let second = client.retr(2).unwrap();
        assert_eq!(second, b"Subject: two\n\nbody\n".to_vec());
        client.quit().unwrap();

        let sent = String::from_utf8(sent.lock().unwrap().clone()).unwrap();
        assert_eq!(
            sent,
            "USER me@example.com\r\nPASS pw\r\nSTAT\r\nRETR 1\r\nRETR 2\r\nQUIT\r\n"
        );
    }

    #[test]
    fn test_login_rejected() {
        let (stream, _) = mock("+OK ready\r\n+OK\r\n-ERR invalid credentials\r\n");
        let result = Client::from_stream(stream).unwrap().login("me", "bad");
        assert!(matches!(result, Err(Error::Server(msg)) if msg == "invalid credentials"));
    }

    #[test]
    fn test_truncated_message() {
        let (stream, _) = mock("+OK ready\r\n+OK\r\n+OK\r\n+OK follows\r\npartial\r\n");
        let mut client = Client::from_stream(stream)
            .unwrap()
            .login("me", "pw")
            .unwrap();
        assert!(matches!(client.retr(1), Err(Error::ConnectionClosed)));
    }

    #[test]
    fn test_bad_greeting() {
        let (stream, _) = mock("-ERR go away\r\n");
        assert!(matches!(
            Client::from_stream(stream),
            Err(Error::Server(_))
        ));
    }
}
