//! # mailrelay-mime
//!
//! Just enough RFC 5322 for a plain-text relay.
//!
//! ## Parsing
//!
//! ```
//! use mailrelay_mime::Message;
//!
//! let message = Message::parse("From: a@example.com\nSubject: Hi\n\nHello");
//! assert_eq!(message.subject(), Some("Hi"));
//! assert_eq!(message.body(), "Hello");
//! ```
//!
//! ## Composing
//!
//! ```
//! use mailrelay_mime::MessageBuilder;
//!
//! let wire = MessageBuilder::new()
//!     .from("me@example.com")
//!     .to("you@example.com")
//!     .subject("Hi")
//!     .body("Hello")
//!     .build()
//!     .unwrap();
//! assert!(wire.contains("Subject: Hi\r\n"));
//! ```
//!
//! Multipart bodies are not decoded; the payload is returned as received.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod header;
mod message;

pub use error::{Error, Result};
pub use header::Headers;
pub use message::{Message, MessageBuilder};
