//! Directory layout.

use std::path::{Path, PathBuf};

/// Root directory name under the home root.
const ROOT_DIR: &str = "pymail";

/// The four queue directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueLayout {
    inbox: PathBuf,
    inbox_archive: PathBuf,
    outbox: PathBuf,
    sent: PathBuf,
}

impl QueueLayout {
    /// Returns the layout rooted at `home`.
    #[must_use]
    pub fn under(home: &Path) -> Self {
        let inbox = home.join(ROOT_DIR);
        let outbox = inbox.join("outbox");
        Self {
            inbox_archive: inbox.join("archive"),
            sent: outbox.join("sent"),
            inbox,
            outbox,
        }
    }

    /// Cached received messages.
    #[must_use]
    pub fn inbox(&self) -> &Path {
        &self.inbox
    }

    /// Processed received messages.
    #[must_use]
    pub fn inbox_archive(&self) -> &Path {
        &self.inbox_archive
    }

    /// Messages waiting to be sent.
    #[must_use]
    pub fn outbox(&self) -> &Path {
        &self.outbox
    }

    /// Messages already sent.
    #[must_use]
    pub fn sent(&self) -> &Path {
        &self.sent
    }

    /// All directories, parents before children.
    #[must_use]
    pub fn directories(&self) -> [&Path; 4] {
        [&self.inbox, &self.inbox_archive, &self.outbox, &self.sent]
    }
}
