//! Queue operations over the directory layout.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, warn};

use super::QueueLayout;
use crate::error::{Error, Result};
use crate::mail::{MESSAGE_SUFFIX, MailEntity, TIMESTAMP_FORMAT};

/// Filesystem queue for one home root.
///
/// Only [`FilesystemQueue::ensure_layout`] creates directories; every other
/// operation expects them to exist.
#[derive(Debug, Clone)]
pub struct FilesystemQueue {
    layout: QueueLayout,
}

impl FilesystemQueue {
    /// Creates a queue over an explicit layout.
    #[must_use]
    pub const fn new(layout: QueueLayout) -> Self {
        Self { layout }
    }

    /// Creates a queue rooted at `home`.
    #[must_use]
    pub fn for_home(home: &Path) -> Self {
        Self::new(QueueLayout::under(home))
    }

    /// Returns the directory layout.
    #[must_use]
    pub const fn layout(&self) -> &QueueLayout {
        &self.layout
    }

    /// Creates any missing queue directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a directory cannot be created.
    pub fn ensure_layout(&self) -> Result<()> {
        for dir in self.layout.directories() {
            fs::create_dir_all(dir).map_err(|source| Error::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        debug!(root = %self.layout.inbox().display(), "queue layout ready");
        Ok(())
    }

    /// Lazily lists `*.email` regular files in the outbox, in directory order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the outbox cannot be opened. Entries that
    /// cannot be read surface as per-item errors.
    pub fn list_outbox_files(&self) -> Result<impl Iterator<Item = Result<PathBuf>> + use<>> {
        let outbox = self.layout.outbox().to_path_buf();
        let entries = fs::read_dir(&outbox).map_err(|source| Error::Io {
            path: outbox.clone(),
            source,
        })?;

        Ok(entries.filter_map(move |entry| match entry {
            Ok(entry) => {
                let path = entry.path();
                let is_message = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(MESSAGE_SUFFIX));
                (is_message && path.is_file()).then_some(Ok(path))
            }
            Err(source) => Some(Err(Error::Io {
                path: outbox.clone(),
                source,
            })),
        }))
    }

    /// Lazily reads and parses outbox files, attaching each source path.
    ///
    /// `identity` becomes the sender of every entity. A file that cannot be
    /// read or parsed yields an error for that item only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the outbox cannot be opened.
    pub fn load_outbox_entities<'a>(
        &self,
        identity: &'a str,
    ) -> Result<impl Iterator<Item = Result<MailEntity>> + use<'a>> {
        Ok(self.list_outbox_files()?.map(move |path| {
            let path = path?;
            let contents = fs::read_to_string(&path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;
            let entity = MailEntity::parse(identity, &contents).map_err(|e| match e {
                Error::MalformedMessage(reason) => {
                    Error::MalformedMessage(format!("{}: {reason}", path.display()))
                }
                other => other,
            })?;
            Ok(entity.with_source_file(path))
        }))
    }

    /// Moves a received message's file into the inbox archive, keeping its
    /// basename. Returns the new path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSourceFile`] if the entity has no backing file,
    /// or [`Error::Archive`] if the target already exists or the move fails.
    pub fn archive_inbox_message(&self, entity: &MailEntity) -> Result<PathBuf> {
        let source = entity.source_file().ok_or(Error::MissingSourceFile)?;
        let target = self.layout.inbox_archive().join(basename(source)?);
        if target.exists() {
            return Err(Error::Archive {
                from: source.to_path_buf(),
                to: target,
                source: io::ErrorKind::AlreadyExists.into(),
            });
        }
        move_file(source, &target)?;
        info!(from = %source.display(), to = %target.display(), "archived received message");
        Ok(target)
    }

    /// Moves a sent message's file into the sent archive under a
    /// timestamp-prefixed basename. Returns the new path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSourceFile`] if the entity has no backing file,
    /// or [`Error::Archive`] if the move fails.
    pub fn archive_sent_message(&self, entity: &MailEntity) -> Result<PathBuf> {
        let source = entity.source_file().ok_or(Error::MissingSourceFile)?;
        let name = format!(
            "{}_{}",
            Local::now().format(TIMESTAMP_FORMAT),
            basename(source)?
        );
        let target = disambiguate(self.layout.sent(), &name)
            .find(|candidate| !candidate.exists())
            .ok_or_else(|| Error::Archive {
                from: source.to_path_buf(),
                to: self.layout.sent().join(&name),
                source: io::ErrorKind::AlreadyExists.into(),
            })?;
        move_file(source, &target)?;
        info!(from = %source.display(), to = %target.display(), "archived sent message");
        Ok(target)
    }

    /// Writes a received message into the inbox under a fresh cache filename.
    /// Returns the new path. Existing files are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] on any I/O failure.
    pub fn cache_inbound_message(&self, entity: &MailEntity) -> Result<PathBuf> {
        let name = entity.generate_cache_filename();
        let contents = entity.serialize();

        for path in disambiguate(self.layout.inbox(), &name) {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_or_discard(&path, file, contents.as_bytes())?;
                    info!(path = %path.display(), sender = %entity.sender, "cached received message");
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(source) => return Err(Error::Write { path, source }),
            }
        }

        Err(Error::Write {
            path: self.layout.inbox().join(name),
            source: io::ErrorKind::AlreadyExists.into(),
        })
    }
}

/// Writes `contents` to a freshly created file, removing the file again if
/// the write fails so no partial message is left behind.
fn write_or_discard(path: &Path, mut file: impl Write, contents: &[u8]) -> Result<()> {
    let written = file.write_all(contents).and_then(|()| file.flush());
    drop(file);

    written.map_err(|source| {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "failed to remove partial message");
        }
        Error::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn basename(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::MalformedMessage(format!("no file name in {}", path.display())))
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|source| Error::Archive {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Candidate paths for `name` in `dir`: the name itself, then `stem-N.ext`.
fn disambiguate<'a>(dir: &'a Path, name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
    let (stem, ext) = name
        .strip_suffix(MESSAGE_SUFFIX)
        .map_or((name, ""), |stem| (stem, MESSAGE_SUFFIX));
    std::iter::once(dir.join(name))
        .chain((1..=u16::MAX).map(move |n| dir.join(format!("{stem}-{n}{ext}"))))
}
