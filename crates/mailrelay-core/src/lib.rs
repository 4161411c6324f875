//! # mailrelay-core
//!
//! Message lifecycle and filesystem-backed queue for `mailrelay`.
//!
//! This crate provides:
//! - **Mail entities** - recipient classification, address-book resolution
//!   and the outbox text convention
//! - **Filesystem queue** - outbox enumeration, archiving and inbox caching
//! - **Delivery** - drains the outbox through an [`OutboundTransport`]
//! - **Retrieval** - polls an [`InboundTransport`] into the inbox
//! - **Configuration** - the account and address book, loaded once
//!
//! Both batch services stop at their first fault and report how many
//! messages they completed in a [`BatchError`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod config;
pub mod contacts;
mod error;
pub mod mail;
pub mod queue;
pub mod service;

pub use account::{Account, Pop3Config, Security, SmtpConfig};
pub use config::{Config, resolve_home};
pub use contacts::{Address, AddressBook};
pub use error::{BatchError, Error, Result};
pub use mail::{MailEntity, Recipient, is_literal_address};
pub use queue::{FilesystemQueue, QueueLayout};
pub use service::{
    Direction, InboundSession, InboundTransport, OutboundTransport, Pop3Session, Pop3Transport,
    RawMessage, SmtpTransport, classify_direction, deliver_outbox, retrieve_inbox,
};
