//! Address book used to resolve recipient names.

mod model;

pub use model::{Address, AddressBook};
