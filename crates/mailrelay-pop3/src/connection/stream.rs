//! Low-level blocking POP3 stream handling.

use super::Endpoint;
use crate::error::{Error, Result};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, ClientConnection, RootCertStore, StreamOwned};
use std::fmt;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Arc;

/// Anything the client can talk POP3 over.
pub trait Socket: Read + Write + Send {}

impl<T: Read + Write + Send> Socket for T {}

/// Buffered POP3 stream over any socket.
pub struct Pop3Stream {
    reader: BufReader<Box<dyn Socket>>,
}

impl fmt::Debug for Pop3Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pop3Stream").finish_non_exhaustive()
    }
}

impl Pop3Stream {
    /// Wraps an already-connected socket.
    pub fn from_socket(socket: impl Socket + 'static) -> Self {
        Self {
            reader: BufReader::new(Box::new(socket)),
        }
    }

    /// Reads one raw line, without its CRLF.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the peer closed the connection.
    pub fn read_line_bytes(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            return Err(Error::ConnectionClosed);
        }
        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        Ok(line)
    }

    /// Reads one status line as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn read_line(&mut self) -> Result<String> {
        let line = self.read_line_bytes()?;
        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    /// Writes and flushes data.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let socket = self.reader.get_mut();
        socket.write_all(data)?;
        socket.flush()?;
        Ok(())
    }
}

/// Connects over plain TCP (port 110). Credentials travel unencrypted.
///
/// # Errors
///
/// Returns an error if name resolution or the connection fails.
pub fn connect(endpoint: &Endpoint) -> Result<Pop3Stream> {
    Ok(Pop3Stream::from_socket(open_tcp(endpoint)?))
}

/// Connects with implicit TLS (port 995).
///
/// # Errors
///
/// Returns an error if the connection or TLS setup fails.
pub fn connect_tls(endpoint: &Endpoint) -> Result<Pop3Stream> {
    let tcp = open_tcp(endpoint)?;
    let server_name = ServerName::try_from(endpoint.host.clone())
        .map_err(|_| Error::Protocol(format!("Invalid hostname: {}", endpoint.host)))?;
    let connection = ClientConnection::new(tls_config(), server_name)?;
    Ok(Pop3Stream::from_socket(StreamOwned::new(connection, tcp)))
}

fn open_tcp(endpoint: &Endpoint) -> Result<TcpStream> {
    let mut last_error = None;
    for addr in (endpoint.host.as_str(), endpoint.port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, endpoint.connect_timeout) {
            Ok(stream) => {
                stream.set_read_timeout(Some(endpoint.io_timeout))?;
                stream.set_write_timeout(Some(endpoint.io_timeout))?;
                tracing::debug!(%addr, "pop3 connected");
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
