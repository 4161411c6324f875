//! Inbox retrieval.

use tracing::{info, warn};

use super::{InboundSession, InboundTransport};
use crate::config::Config;
use crate::error::{BatchError, Result};
use crate::queue::FilesystemQueue;

/// Retrieves every message in the mailbox, in index order, and caches each
/// one in the inbox.
///
/// The session is closed whether or not the batch completes. If closing also
/// fails after an earlier fault, the earlier fault is reported.
///
/// # Errors
///
/// Returns a [`BatchError`] carrying the number of messages cached before
/// the fault.
pub fn retrieve_inbox<T: InboundTransport>(
    config: &Config,
    queue: &FilesystemQueue,
    transport: &mut T,
) -> std::result::Result<usize, BatchError> {
    let mut session = transport
        .open_session(&config.account)
        .map_err(|e| BatchError::new(0, e))?;

    let mut received = 0;
    let outcome = cache_all(&mut session, queue, &mut received);
    let closed = session.close();

    match (outcome, closed) {
        (Ok(()), Ok(())) => {
            info!(received, "inbox polled");
            Ok(received)
        }
        (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(BatchError::new(received, e)),
        (Err(e), Err(close_err)) => {
            warn!(error = %close_err, "failed to close inbound session");
            Err(BatchError::new(received, e))
        }
    }
}

fn cache_all<S: InboundSession>(
    session: &mut S,
    queue: &FilesystemQueue,
    received: &mut usize,
) -> Result<()> {
    for raw in session.list_raw() {
        queue.cache_inbound_message(&raw?.into_entity())?;
        *received += 1;
    }
    Ok(())
}
