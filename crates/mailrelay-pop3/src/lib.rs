//! # mailrelay-pop3
//!
//! A blocking POP3 client covering what a mail relay needs to drain a
//! mailbox: login, `STAT`, `RETR` and `QUIT`.
//!
//! ```ignore
//! use mailrelay_pop3::Client;
//! use mailrelay_pop3::connection::{Endpoint, connect_tls};
//!
//! let stream = connect_tls(&Endpoint::new("pop.example.com", 995))?;
//! let mut client = Client::from_stream(stream)?.login("me@example.com", "secret")?;
//! let stat = client.stat()?;
//! for index in 1..=stat.count {
//!     let raw = client.retr(index)?;
//!     println!("{} bytes", raw.len());
//! }
//! client.quit()?;
//! ```
//!
//! Sessions move from [`Authorization`] to [`Transaction`] on a successful
//! login; mailbox commands only exist on the latter.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod response;

pub use connection::{Authorization, Client, Endpoint, Pop3Stream, Transaction};
pub use error::{Error, Result};
pub use response::{MailboxStat, Status};
