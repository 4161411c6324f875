//! Low-level blocking SMTP stream handling.

use super::Endpoint;
use crate::error::{Error, Result};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};
use std::fmt;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;

/// Anything the client can talk SMTP over.
pub trait Socket: Read + Write + Send {}

impl<T: Read + Write + Send> Socket for T {}

enum Transport {
    Plain(Box<dyn Socket>),
    Tls(Box<StreamOwned<ClientConnection, Box<dyn Socket>>>),
}

impl Read for Transport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(socket) => socket.read(buf),
            Self::Tls(tls) => tls.read(buf),
        }
    }
}

impl Write for Transport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(socket) => socket.write(buf),
            Self::Tls(tls) => tls.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(socket) => socket.flush(),
            Self::Tls(tls) => tls.flush(),
        }
    }
}

/// Buffered SMTP stream (plain or TLS).
pub struct SmtpStream {
    reader: BufReader<Transport>,
}

impl fmt::Debug for SmtpStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpStream")
            .field("tls", &self.is_tls())
            .finish()
    }
}

impl SmtpStream {
    /// Wraps an already-connected plaintext socket.
    pub fn from_socket(socket: impl Socket + 'static) -> Self {
        Self {
            reader: BufReader::new(Transport::Plain(Box::new(socket))),
        }
    }

    /// Returns true once the stream is encrypted.
    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(self.reader.get_ref(), Transport::Tls(_))
    }

    /// Reads one line, without its line ending.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the peer closed the connection.
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(Error::ConnectionClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Writes and flushes data.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let transport = self.reader.get_mut();
        transport.write_all(data)?;
        transport.flush()?;
        Ok(())
    }

    /// Upgrades a plaintext stream to TLS (after a successful STARTTLS).
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is already encrypted, if the server sent
    /// data ahead of the handshake, or if the hostname is invalid.
    pub fn upgrade_to_tls(self, hostname: &str) -> Result<Self> {
        if !self.reader.buffer().is_empty() {
            return Err(Error::Protocol(
                "Unexpected data buffered before TLS handshake".into(),
            ));
        }
        match self.reader.into_inner() {
            Transport::Plain(socket) => Ok(Self {
                reader: BufReader::new(wrap_tls(socket, hostname)?),
            }),
            Transport::Tls(_) => Err(Error::Protocol("Already using TLS".into())),
        }
    }
}

/// Connects to an SMTP server over plain TCP (ports 25 and 587).
///
/// # Errors
///
/// Returns an error if name resolution or the connection fails.
pub fn connect(endpoint: &Endpoint) -> Result<SmtpStream> {
    Ok(SmtpStream::from_socket(open_tcp(endpoint)?))
}

/// Connects to an SMTP server with implicit TLS (port 465).
///
/// # Errors
///
/// Returns an error if the connection or TLS setup fails.
pub fn connect_tls(endpoint: &Endpoint) -> Result<SmtpStream> {
    let socket: Box<dyn Socket> = Box::new(open_tcp(endpoint)?);
    Ok(SmtpStream {
        reader: BufReader::new(wrap_tls(socket, &endpoint.host)?),
    })
}

fn open_tcp(endpoint: &Endpoint) -> Result<TcpStream> {
    let mut last_error = None;
    for addr in (endpoint.host.as_str(), endpoint.port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, endpoint.connect_timeout) {
            Ok(stream) => {
                stream.set_read_timeout(Some(endpoint.io_timeout))?;
                stream.set_write_timeout(Some(endpoint.io_timeout))?;
                tracing::debug!(%addr, "smtp connected");
                return Ok(stream);
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(last_error
        .unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("No address found for {}", endpoint.host),
            )
        })
        .into())
}

fn wrap_tls(socket: Box<dyn Socket>, hostname: &str) -> Result<Transport> {
    let server_name = ServerName::try_from(hostname.to_string())
        .map_err(|_| Error::Protocol(format!("Invalid hostname: {hostname}")))?;
    let connection = ClientConnection::new(tls_config(), server_name)?;
    Ok(Transport::Tls(Box::new(StreamOwned::new(connection, socket))))
}

/// Client config trusting the bundled web PKI roots.
fn tls_config() -> Arc<ClientConfig> {
    let root_store = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };

    Arc::new(
        ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth(),
    )
}
