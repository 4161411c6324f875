//! Command-line surface.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mailrelay_core::{
    BatchError, Config, FilesystemQueue, InboundTransport, OutboundTransport, Pop3Transport,
    SmtpTransport, deliver_outbox, resolve_home, retrieve_inbox,
};
use tracing::{info, warn};

/// The only named command; anything else runs both batches.
const ADDRESSBOOK: &str = "addressbook";

/// mailrelay - send the outbox, then fetch the inbox
#[derive(Parser, Debug)]
#[command(
    name = "mailrelay",
    version,
    about = "Send pending mail from the outbox, then fetch new mail into the inbox",
    long_about = "Sends every *.email file in <home>/pymail/outbox through SMTP, archives it \
                  under outbox/sent, then caches each POP3 message in <home>/pymail. \
                  Pass `addressbook` to list address-book entries instead."
)]
pub struct Cli {
    /// `addressbook` to print the address book
    command: Option<String>,

    /// Home root holding `.pymail` and `pymail/` [env: MAILRELAY_HOME]
    #[arg(long, value_name = "DIR")]
    home: Option<PathBuf>,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let home = resolve_home(self.home.clone())?;
        let config = Config::load(&Config::path_in(&home))?;
        let mut stdout = io::stdout().lock();

        if self.is_addressbook() {
            return print_address_book(&config, &mut stdout);
        }

        let queue = FilesystemQueue::for_home(&home);
        queue.ensure_layout()?;
        info!(home = %home.display(), identity = config.account.identity(), "starting run");

        run_batches(
            &config,
            &queue,
            &mut SmtpTransport::default(),
            &mut Pop3Transport::new(),
            &mut stdout,
        )
    }

    fn is_addressbook(&self) -> bool {
        self.command
            .as_deref()
            .is_some_and(|command| command.eq_ignore_ascii_case(ADDRESSBOOK))
    }
}

fn print_address_book(config: &Config, out: &mut impl Write) -> Result<()> {
    for entry in config.address_book.iter() {
        writeln!(out, "{entry}").context("failed to write address book")?;
    }
    Ok(())
}

/// Runs the send batch then the receive batch. A fault in one batch is
/// printed and does not stop the other.
fn run_batches(
    config: &Config,
    queue: &FilesystemQueue,
    outbound: &mut impl OutboundTransport,
    inbound: &mut impl InboundTransport,
    out: &mut impl Write,
) -> Result<()> {
    let sent = report(out, "send", deliver_outbox(config, queue, outbound))?;
    writeln!(out, "sent {sent} email(s)")?;

    let received = report(out, "receive", retrieve_inbox(config, queue, inbound))?;
    writeln!(out, "received {received} email(s)")?;

    Ok(())
}

/// Prints a batch fault, if any, and returns the batch's count.
fn report(
    out: &mut impl Write,
    batch: &str,
    outcome: std::result::Result<usize, BatchError>,
) -> Result<usize> {
    match outcome {
        Ok(count) => Ok(count),
        Err(err) => {
            warn!(batch, completed = err.completed, error = %err, "batch stopped");
            writeln!(out, "{err}").context("failed to write batch error")?;
            Ok(err.completed)
        }
    }
}
