//! `mailrelay` - personal mail relay
//!
//! Drains `~/pymail/outbox` through the configured SMTP relay, then caches
//! every message in the POP3 mailbox into `~/pymail`.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the summary lines.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailrelay=info,mailrelay_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Cli::parse().execute()
}
