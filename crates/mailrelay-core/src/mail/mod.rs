//! In-memory message model.

mod entity;
mod recipient;

pub(crate) use entity::TIMESTAMP_FORMAT;
pub use entity::{MESSAGE_SUFFIX, MailEntity};
pub use recipient::{Recipient, is_literal_address};
