//! Configuration loading and home directory resolution.
//!
//! The configuration lives in a JSON file at `<home>/.pymail`:
//!
//! ```json
//! {
//!   "sender": { "auth": { "user": "me@gmail.com", "pass": "app-password" } },
//!   "addressBook": [ { "name": "alice", "email": "alice@example.com" } ],
//!   "smtp": { "host": "smtp.gmail.com", "port": 587, "security": "starttls" },
//!   "pop3": { "host": "pop.gmail.com", "port": 995, "security": "tls" }
//! }
//! ```
//!
//! `smtp` and `pop3` are optional. The file is read once at startup and the
//! resulting [`Config`] is passed by reference to every service.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::account::{Account, Pop3Config, SmtpConfig};
use crate::contacts::{Address, AddressBook};
use crate::error::{Error, Result};

/// Environment variable that overrides the home root.
pub const HOME_ENV: &str = "MAILRELAY_HOME";

/// Configuration file name inside the home root.
pub const CONFIG_FILE_NAME: &str = ".pymail";

/// Everything loaded from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Local account identity, credential and servers.
    pub account: Account,
    /// Recipient names, in file order.
    pub address_book: AddressBook,
}

#[derive(Deserialize)]
struct RawConfig {
    sender: RawSender,
    #[serde(rename = "addressBook", default)]
    address_book: Vec<RawAddress>,
    #[serde(default)]
    smtp: SmtpConfig,
    #[serde(default)]
    pop3: Pop3Config,
}

#[derive(Deserialize)]
struct RawSender {
    auth: RawAuth,
}

#[derive(Deserialize)]
struct RawAuth {
    user: String,
    pass: String,
}

#[derive(Deserialize)]
struct RawAddress {
    name: String,
    email: String,
}

impl Config {
    /// Returns the configuration file path for a home root.
    #[must_use]
    pub fn path_in(home: &Path) -> PathBuf {
        home.join(CONFIG_FILE_NAME)
    }

    /// Loads and validates the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigLoad`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = Self::parse(&contents).map_err(|reason| Error::ConfigLoad {
            path: path.to_path_buf(),
            reason,
        })?;

        tracing::debug!(
            path = %path.display(),
            identity = config.account.identity(),
            addresses = config.address_book.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    fn parse(contents: &str) -> std::result::Result<Self, String> {
        let raw: RawConfig = serde_json::from_str(contents).map_err(|e| e.to_string())?;

        if raw.sender.auth.user.trim().is_empty() {
            return Err("sender.auth.user must not be empty".to_string());
        }

        Ok(Self {
            account: Account {
                username: raw.sender.auth.user,
                password: raw.sender.auth.pass,
                smtp: raw.smtp,
                pop3: raw.pop3,
            },
            address_book: raw
                .address_book
                .into_iter()
                .map(|entry| Address::new(entry.name, entry.email))
                .collect(),
        })
    }
}

/// Resolves the home root.
///
/// Precedence: explicit override (CLI flag), then `MAILRELAY_HOME` when set
/// and non-empty, then the platform home directory.
///
/// # Errors
///
/// Returns [`Error::ConfigLoad`] if no home directory can be determined.
pub fn resolve_home(explicit: Option<PathBuf>) -> Result<PathBuf> {
    resolve_home_from(explicit, std::env::var_os(HOME_ENV), dirs::home_dir())
}

fn resolve_home_from(
    explicit: Option<PathBuf>,
    env: Option<OsString>,
    platform: Option<PathBuf>,
) -> Result<PathBuf> {
    explicit
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .or(platform)
        .ok_or_else(|| Error::ConfigLoad {
            path: PathBuf::from(CONFIG_FILE_NAME),
            reason: format!("cannot determine home directory; set {HOME_ENV}"),
        })
}
