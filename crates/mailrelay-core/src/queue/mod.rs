//! Filesystem-backed outbox and inbox.
//!
//! All message state lives in four directories under the home root:
//!
//! | role          | path                 |
//! |---------------|----------------------|
//! | inbox         | `pymail/`            |
//! | inbox archive | `pymail/archive/`    |
//! | outbox        | `pymail/outbox/`     |
//! | sent archive  | `pymail/outbox/sent/`|

mod layout;
mod repository;

pub use layout::QueueLayout;
pub use repository::FilesystemQueue;
