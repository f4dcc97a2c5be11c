//! Scoped line/byte cursor access to archive members and standalone files.
//!
//! Format parsers interleave text-line header reads with fixed-width numeric
//! block reads against the same stream, so the cursor must expose both
//! sequential iteration and exact-position resumption. A member's bytes are
//! read in full while the zip entry handle is held, which guarantees the
//! handle is released on every exit path, including mid-parse failures,
//! before any decoding starts.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::{Error, Result};

/// Line-oriented cursor over one member's (or file's) decoded text.
///
/// Lines are addressed 1-based, matching the fixed-line conventions of the
/// record formats. Successive reads (header fields, numeric header
/// blocks, payload blocks) all pull from the same cursor, each
/// resuming exactly where the previous read stopped.
#[derive(Debug, Clone)]
pub struct LineCursor {
    lines: Vec<String>,
    next: usize,
}

impl LineCursor {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            next: 0,
        }
    }

    /// Consume and return the next line
    pub fn next_line(&mut self) -> Option<&str> {
        let line = self.lines.get(self.next)?;
        self.next += 1;
        Some(line)
    }

    /// The next line without consuming it
    pub fn peek(&self) -> Option<&str> {
        self.lines.get(self.next).map(String::as_str)
    }

    /// A line by absolute 1-based number, independent of the cursor
    pub fn line(&self, number: usize) -> Option<&str> {
        number.checked_sub(1).and_then(|i| self.lines.get(i)).map(String::as_str)
    }

    /// Consume through absolute 1-based line `number` and return that line.
    /// Returns `None` when the target lies before the cursor or past the end.
    pub fn advance_to(&mut self, number: usize) -> Option<&str> {
        if number <= self.next || number > self.lines.len() {
            return None;
        }
        self.next = number;
        Some(&self.lines[number - 1])
    }

    /// 1-based number of the next line to be read
    pub fn position(&self) -> usize {
        self.next + 1
    }

    /// Lines remaining ahead of the cursor
    pub fn remaining(&self) -> usize {
        self.lines.len() - self.next
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Read-only access to the members of a zip archive.
///
/// The archive handle is a single-owner resource: members are read
/// sequentially through `&mut self`, never concurrently.
pub struct ArchiveReader {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
}

impl std::fmt::Debug for ArchiveReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveReader")
            .field("path", &self.path)
            .field("members", &self.archive.len())
            .finish()
    }
}

impl ArchiveReader {
    /// Open an archive read-only
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .map_err(|e| Error::io(format!("failed to open archive {}", path.display()), e))?;
        let archive = ZipArchive::new(BufReader::new(file))
            .map_err(|e| Error::archive(path.display().to_string(), "failed to read archive", e))?;
        Ok(Self { path, archive })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Member names in archive order
    pub fn member_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// Acquire a cursor over one member's text.
    ///
    /// The member handle lives only for the duration of this call; the
    /// returned cursor owns the decoded text outright. Non-UTF-8 bytes are
    /// replaced rather than rejected; real archives occasionally carry
    /// stray high bytes in operator comments.
    pub fn member_cursor(&mut self, name: &str) -> Result<LineCursor> {
        let mut member = self
            .archive
            .by_name(name)
            .map_err(|e| Error::archive(name, "member not found", e))?;
        let mut bytes = Vec::new();
        member
            .read_to_end(&mut bytes)
            .map_err(|e| Error::io(format!("failed to read archive member {}", name), e))?;
        debug!(member = name, bytes = bytes.len(), "read archive member");
        Ok(LineCursor::new(&String::from_utf8_lossy(&bytes)))
    }
}

/// Acquire a cursor over a standalone file
pub fn file_cursor(path: impl AsRef<Path>) -> Result<LineCursor> {
    let path = path.as_ref();
    let mut bytes = Vec::new();
    File::open(path)
        .map_err(|e| Error::io(format!("failed to open {}", path.display()), e))?
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(format!("failed to read {}", path.display()), e))?;
    Ok(LineCursor::new(&String::from_utf8_lossy(&bytes)))
}
