//! Shared fixtures for the service tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use mailrelay_core::{
    Account, Address, AddressBook, Config, Error, FilesystemQueue, InboundSession,
    InboundTransport, OutboundTransport, RawMessage, Result,
};
use tempfile::TempDir;

pub const ME: &str = "me@example.com";

/// A temp home with the queue layout and a config for [`ME`].
pub struct Home {
    pub dir: TempDir,
    pub queue: FilesystemQueue,
    pub config: Config,
}

impl Home {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let queue = FilesystemQueue::for_home(dir.path());
        queue.ensure_layout().unwrap();
        let config = Config {
            account: Account::new(ME, "secret"),
            address_book: AddressBook::new(vec![
                Address::new("alice", "alice@example.com"),
                Address::new("Bob", "bob@example.com"),
            ]),
        };
        Self { dir, queue, config }
    }

    pub fn write_outbox(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.queue.layout().outbox().join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

/// One call to [`OutboundTransport::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Records sends and optionally rejects one recipient.
#[derive(Debug, Default)]
pub struct RecordingOutbound {
    pub sent: Vec<Sent>,
    pub reject: Option<String>,
}

impl OutboundTransport for RecordingOutbound {
    fn send(
        &mut self,
        _account: &Account,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<()> {
        if self.reject.as_deref() == Some(recipient) {
            return Err(Error::Transport("SMTP: 550 mailbox unavailable".into()));
        }
        self.sent.push(Sent {
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
        });
        Ok(())
    }
}

/// What happened inside a scripted inbound session.
#[derive(Debug, Default)]
pub struct SessionLog {
    pub retrieved: Vec<usize>,
    pub closed: bool,
}

type Hook = Box<dyn FnMut(usize)>;

/// Serves a fixed mailbox.
pub struct ScriptedInbound {
    pub messages: Vec<String>,
    pub log: Rc<RefCell<SessionLog>>,
    pub before_retrieve: Option<Rc<RefCell<Hook>>>,
    pub fail_open: bool,
    pub fail_close: bool,
}

impl ScriptedInbound {
    pub fn new(messages: &[&str]) -> Self {
        Self {
            messages: messages.iter().map(ToString::to_string).collect(),
            log: Rc::default(),
            before_retrieve: None,
            fail_open: false,
            fail_close: false,
        }
    }

    pub fn before_retrieve(mut self, hook: impl FnMut(usize) + 'static) -> Self {
        self.before_retrieve = Some(Rc::new(RefCell::new(Box::new(hook))));
        self
    }
}

pub struct ScriptedSession {
    messages: Vec<String>,
    log: Rc<RefCell<SessionLog>>,
    before_retrieve: Option<Rc<RefCell<Hook>>>,
    fail_close: bool,
}

impl InboundTransport for ScriptedInbound {
    type Session = ScriptedSession;

    fn open_session(&mut self, _account: &Account) -> Result<ScriptedSession> {
        if self.fail_open {
            return Err(Error::Transport("POP3: connection refused".into()));
        }
        Ok(ScriptedSession {
            messages: self.messages.clone(),
            log: Rc::clone(&self.log),
            before_retrieve: self.before_retrieve.clone(),
            fail_close: self.fail_close,
        })
    }
}

impl InboundSession for ScriptedSession {
    fn message_count(&self) -> usize {
        self.messages.len()
    }

    fn retrieve(&mut self, index: usize) -> Result<RawMessage> {
        if let Some(hook) = &self.before_retrieve {
            let mut hook = hook.borrow_mut();
            (*hook)(index);
        }
        self.log.borrow_mut().retrieved.push(index);
        Ok(RawMessage::parse(&self.messages[index - 1]))
    }

    fn close(self) -> Result<()> {
        self.log.borrow_mut().closed = true;
        if self.fail_close {
            return Err(Error::Transport("POP3: QUIT rejected".into()));
        }
        Ok(())
    }
}
