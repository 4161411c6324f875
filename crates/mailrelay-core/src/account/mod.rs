//! Account identity and server settings.

mod model;

pub use model::{Account, Pop3Config, Security, SmtpConfig};
