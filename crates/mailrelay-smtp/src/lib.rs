//! # mailrelay-smtp
//!
//! A small, blocking SMTP client used to hand queued messages to a relay.
//!
//! ## Features
//!
//! - **Type-state sessions**: invalid command orderings do not compile
//! - **TLS**: implicit TLS (port 465) and STARTTLS (port 587) via `rustls`
//! - **Authentication**: PLAIN and LOGIN
//! - **Blocking I/O**: every call blocks the calling thread; there is no runtime
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailrelay_smtp::{Address, Client};
//! use mailrelay_smtp::connection::{Endpoint, connect};
//!
//! let stream = connect(&Endpoint::new("smtp.example.com", 587))?;
//! let client = Client::from_stream(stream)?
//!     .ehlo("localhost")?
//!     .starttls("smtp.example.com")?
//!     .auth_plain("me@example.com", "secret")?;
//!
//! let client = client
//!     .mail_from(Address::new("me@example.com")?)?
//!     .rcpt_to(Address::new("you@example.com")?)?
//!     .data()?
//!     .send_message(b"Subject: Hi\r\n\r\nHello\r\n")?;
//! client.quit()?;
//! ```
//!
//! ## Session States
//!
//! ```text
//! Connected ── auth_*() ──→ Authenticated ── mail_from() ──→ MailTransaction
//!                                                               │
//!                          Data ←── data() ── RecipientAdded ←──┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod parser;
pub mod types;

pub use connection::{
    Authenticated, Client, Connected, Data, Endpoint, MailTransaction, RecipientAdded, ServerInfo,
    SmtpStream,
};
pub use error::{Error, Result};
pub use types::{Address, AuthMechanism, Extension, Reply, ReplyCode};
