//! Address book model.

use std::fmt;

/// One address-book entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Lookup key, matched case-insensitively.
    pub name: String,
    /// Literal mail address.
    pub address: String,
}

impl Address {
    /// Creates a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Checks if the entry's name matches (case-insensitive).
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {}", self.name, self.address)
    }
}

/// Ordered list of entries. Names need not be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    entries: Vec<Address>,
}

impl AddressBook {
    /// Creates a book from entries in configuration order.
    #[must_use]
    pub const fn new(entries: Vec<Address>) -> Self {
        Self { entries }
    }

    /// Finds the first entry whose name matches.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Address> {
        self.entries.iter().find(|entry| entry.matches(name))
    }

    /// Iterates entries in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the book has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Address> for AddressBook {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
