//! Services that move messages between the queue and the mail servers.
//!
//! The wire protocols sit behind [`OutboundTransport`] and
//! [`InboundTransport`] so the batch logic can run against in-memory fakes.

mod delivery;
mod pop3;
mod retrieval;
mod smtp;
mod transport;

pub use delivery::{Direction, classify_direction, deliver_outbox};
pub use pop3::{Pop3Session, Pop3Transport};
pub use retrieval::retrieve_inbox;
pub use smtp::SmtpTransport;
pub use transport::{InboundSession, InboundTransport, OutboundTransport, RawMessage, RawMessages};
