//! Format detection and parser dispatch.
//!
//! A path is matched against the fixed, priority-ordered format tag list:
//! archives and directories are scanned by member extension (first matching
//! format wins), single files dispatch on their own extension. An
//! unrecognized path yields the [`Dispatch::Unknown`] sentinel with a logged
//! warning; callers treat that as skip, never as a fatal error.

use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

use crate::app::services::archive_reader::ArchiveReader;
use crate::app::services::{csmip, smc};
use crate::config::ParseOptions;
use crate::constants::ARCHIVE_EXTENSION;
use crate::{Record, Result, TimeSeries};

/// A supported record format, in dispatch priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// CSMIP Volume 2 (also covers reduced `.v1` members)
    V2,
    /// CSMIP Volume 2, corrected variant (shares the V2 layout)
    V2c,
    /// NSMP SMC
    Smc,
}

impl Format {
    /// Fixed priority order: first member-extension match wins
    pub const PRIORITY: [Format; 3] = [Format::V2, Format::V2c, Format::Smc];

    /// The format's extension tag
    pub fn tag(self) -> &'static str {
        match self {
            Format::V2 => "v2",
            Format::V2c => "v2c",
            Format::Smc => "smc",
        }
    }

    /// Whether a member with this extension belongs to the format. Reduced
    /// `.v1` members travel inside V2 archives and are claimed by V2.
    fn claims_extension(self, extension: &str) -> bool {
        match self {
            Format::V2 => extension.eq_ignore_ascii_case("v2") || extension.eq_ignore_ascii_case("v1"),
            Format::V2c => extension.eq_ignore_ascii_case("v2c"),
            Format::Smc => extension.eq_ignore_ascii_case("smc"),
        }
    }

    /// Parse a zip archive of this format into a [`Record`]
    pub fn read_archive(self, path: impl AsRef<Path>, options: &ParseOptions) -> Result<Record> {
        match self {
            Format::V2 | Format::V2c => csmip::read_archive(path, options),
            Format::Smc => smc::read_archive(path, options),
        }
    }

    /// Parse a directory of series files of this format into a [`Record`]
    pub fn read_directory(self, path: impl AsRef<Path>, options: &ParseOptions) -> Result<Record> {
        match self {
            Format::V2 | Format::V2c => csmip::read_directory(path, options),
            Format::Smc => smc::read_directory(path, options),
        }
    }

    /// Parse a standalone series file of this format into a [`TimeSeries`]
    pub fn read_file(self, path: impl AsRef<Path>, options: &ParseOptions) -> Result<TimeSeries> {
        match self {
            Format::V2 | Format::V2c => csmip::read_file(path, options),
            Format::Smc => smc::read_file(path, options),
        }
    }
}

/// Dispatch outcome for a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A zip archive parsed member-by-member into a [`Record`]
    Archive(Format),
    /// A directory of series files parsed into a [`Record`]
    Directory(Format),
    /// A single series file parsed into a [`TimeSeries`]
    File(Format),
    /// No parser matches; skip, never fatal
    Unknown,
}

/// Detect the format and parse mode for a path.
///
/// Deterministic given the fixed [`Format::PRIORITY`] list. Archive
/// detection opens the archive read-only to scan member names; I/O and
/// archive-corruption errors propagate, but an unrecognized format never
/// does.
pub fn detect(path: impl AsRef<Path>) -> Result<Dispatch> {
    let path = path.as_ref();

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    if extension.as_deref() == Some(ARCHIVE_EXTENSION) {
        let reader = ArchiveReader::open(path)?;
        let names = reader.member_names();
        for format in Format::PRIORITY {
            if names.iter().any(|name| member_matches(name, format)) {
                return Ok(Dispatch::Archive(format));
            }
        }
        warn!(path = %path.display(), "no valid parser found for archive");
        return Ok(Dispatch::Unknown);
    }

    if path.is_dir() {
        let names: Vec<String> = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path().to_string_lossy().to_string())
            .collect();
        for format in Format::PRIORITY {
            if names.iter().any(|name| member_matches(name, format)) {
                return Ok(Dispatch::Directory(format));
            }
        }
        warn!(path = %path.display(), "no valid parser found for directory");
        return Ok(Dispatch::Unknown);
    }

    if let Some(extension) = extension {
        for format in Format::PRIORITY {
            if format.claims_extension(&extension) {
                return Ok(Dispatch::File(format));
            }
        }
    }

    warn!(path = %path.display(), "no valid parser found");
    Ok(Dispatch::Unknown)
}

fn member_matches(name: &str, format: Format) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format.claims_extension(ext))
        .unwrap_or(false)
}
