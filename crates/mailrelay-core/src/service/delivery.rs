//! Outbox delivery.

use tracing::info;

use super::OutboundTransport;
use crate::config::Config;
use crate::error::{BatchError, Error, Result};
use crate::mail::MailEntity;
use crate::queue::FilesystemQueue;

/// Which archive a processed message belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Sent by the local account.
    Outgoing,
    /// Addressed to the local account.
    Incoming,
}

/// Decides whether a message was sent or received by `identity`.
///
/// A message whose sender and recipient are both `identity` is ambiguous and
/// is rejected along with messages that involve neither.
///
/// # Errors
///
/// Returns [`Error::UnclassifiableDirection`] unless exactly one side is the
/// local account.
pub fn classify_direction(entity: &MailEntity, identity: &str) -> Result<Direction> {
    let outgoing = entity.sender == identity;
    let incoming = entity.recipient.as_str() == identity;
    match (outgoing, incoming) {
        (true, false) => Ok(Direction::Outgoing),
        (false, true) => Ok(Direction::Incoming),
        _ => Err(Error::UnclassifiableDirection {
            sender: entity.sender.clone(),
            recipient: entity.recipient.to_string(),
        }),
    }
}

/// Sends every outbox message, in directory order, and archives each one.
///
/// The archive branch is decided before sending, so a message that could
/// not be archived is never relayed.
///
/// Stops at the first fault. Messages from the faulting one onwards stay in
/// the outbox for the next run.
///
/// # Errors
///
/// Returns a [`BatchError`] carrying the number of messages sent and archived
/// before the fault.
pub fn deliver_outbox<T: OutboundTransport>(
    config: &Config,
    queue: &FilesystemQueue,
    transport: &mut T,
) -> std::result::Result<usize, BatchError> {
    let identity = config.account.identity();
    let entities = queue
        .load_outbox_entities(identity)
        .map_err(|e| BatchError::new(0, e))?;

    let mut sent = 0;
    for entity in entities {
        deliver_one(config, queue, transport, entity).map_err(|e| BatchError::new(sent, e))?;
        sent += 1;
    }

    info!(sent, "outbox drained");
    Ok(sent)
}

fn deliver_one<T: OutboundTransport>(
    config: &Config,
    queue: &FilesystemQueue,
    transport: &mut T,
    entity: Result<MailEntity>,
) -> Result<()> {
    let mut entity = entity?;
    entity.resolve_recipient(&config.address_book)?;
    // Unarchivable messages are rejected before anything is relayed.
    let direction = classify_direction(&entity, config.account.identity())?;
    transport.send(
        &config.account,
        entity.recipient.as_str(),
        &entity.subject,
        &entity.body,
    )?;

    match direction {
        Direction::Outgoing => queue.archive_sent_message(&entity)?,
        Direction::Incoming => queue.archive_inbox_message(&entity)?,
    };
    Ok(())
}
