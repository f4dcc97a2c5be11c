//! CSMIP strong-motion record reader
//!
//! A Rust library for reading legacy fixed-format strong-motion instrument
//! records, CSMIP V1/V2 (and the corrected V2c variant) plus the related
//! NSMP SMC format, into a structured, queryable time-series model.
//!
//! This library provides tools for:
//! - Dispatching a path (zip archive, directory, or single file) to the
//!   matching format parser
//! - Parsing fixed-column text headers through a declarative field table
//! - Decoding fixed-width integer/real header blocks and payload blocks
//!   with exact length checking
//! - Assembling `TimeSeries` objects into station-level `Record`s, with
//!   per-member failures isolated from the batch
//! - Grouping co-located channels into `Vector`s with rotation and
//!   resultant operations

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod archive_reader;
        pub mod csmip;
        pub mod dispatch;
        pub mod field_table;
        pub mod numeric_header;
        pub mod series_assembler;
        pub mod smc;
    }
}

// Re-export commonly used types
pub use app::models::{
    Direction, MetaData, MetaValue, Quantity, Record, TimeSeries, Vector, group_by_location,
};
pub use app::services::dispatch::{Dispatch, Format};
pub use config::ParseOptions;

use std::path::Path;

/// Result type alias for record parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for strong-motion record parsing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Zip archive error
    #[error("archive error in '{file}': {message}")]
    Archive {
        file: String,
        message: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// No parser matches the path (non-fatal at dispatch level)
    #[error("no parser found for '{path}'")]
    UnknownFormat { path: String },

    /// Field-table schema could not be matched against the text header
    #[error("header parse error in '{file}': {message}")]
    HeaderParse { file: String, message: String },

    /// Numeric header block length does not equal the format-mandated count
    #[error("numeric header length mismatch in '{file}': expected {expected} values, found {found}")]
    NumericHeaderLength {
        file: String,
        expected: usize,
        found: usize,
    },

    /// Payload block inconsistent with its declared sample count
    #[error("payload shape error in '{file}': {message}")]
    PayloadShape { file: String, message: String },

    /// Operation invoked on a model object lacking a required component
    #[error("cannot {operation}: missing '{missing}' component")]
    Capability { operation: String, missing: String },

    /// Model construction or field-coercion error
    #[error("data validation error: {message}")]
    DataValidation { message: String },

    /// Date/time parsing error
    #[error("date/time parsing error: {message}")]
    DateTimeParse {
        message: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a zip archive error with context
    pub fn archive(
        file: impl Into<String>,
        message: impl Into<String>,
        source: zip::result::ZipError,
    ) -> Self {
        Self::Archive {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an unknown-format error
    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::UnknownFormat { path: path.into() }
    }

    /// Create a header parse error
    pub fn header_parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HeaderParse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a numeric header length error
    pub fn numeric_header_length(file: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::NumericHeaderLength {
            file: file.into(),
            expected,
            found,
        }
    }

    /// Create a payload shape error
    pub fn payload_shape(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PayloadShape {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a capability error for a missing component
    pub fn capability(operation: impl Into<String>, missing: impl Into<String>) -> Self {
        Self::Capability {
            operation: operation.into(),
            missing: missing.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parse(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParse {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Archive {
            file: "unknown".to_string(),
            message: "archive operation failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParse {
            message: "date/time parsing failed".to_string(),
            source: error,
        }
    }
}

/// Outcome of a top-level parse: archives and directories yield a [`Record`],
/// single series files yield one [`TimeSeries`].
#[derive(Debug)]
pub enum Parsed {
    Record(Record),
    Series(Box<TimeSeries>),
}

/// Parse a path into the time-series model.
///
/// Dispatches on the path (zip archive, directory of series files, or a
/// single series file) and runs the matching format parser. Returns
/// `Ok(None)` when no parser matches; callers should treat that as
/// skip-not-fatal; a warning is logged.
pub fn read(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Option<Parsed>> {
    let path = path.as_ref();
    match app::services::dispatch::detect(path)? {
        Dispatch::Archive(format) => Ok(Some(Parsed::Record(format.read_archive(path, options)?))),
        Dispatch::Directory(format) => {
            Ok(Some(Parsed::Record(format.read_directory(path, options)?)))
        }
        Dispatch::File(format) => Ok(Some(Parsed::Series(Box::new(
            format.read_file(path, options)?,
        )))),
        Dispatch::Unknown => Ok(None),
    }
}
