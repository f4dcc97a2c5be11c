//! CSMIP V1/V2 format parser
//!
//! Reads CSMIP strong-motion members: a fixed-column text header parsed
//! through the [`fields`] tables, an integer and a real numeric header
//! block, and up to three count-prefixed payload blocks (acceleration,
//! velocity, displacement; the reduced V1 format carries acceleration
//! only). The corrected `.v2c` variant shares the V2 layout.
//!
//! Member parsing degrades and isolates: a text-header failure leaves the
//! member with partial metadata; numeric-header and payload failures fail
//! the member; at archive level failed members are logged and skipped so
//! siblings still parse.

pub mod fields;

#[cfg(test)]
pub mod tests;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::app::models::{MetaData, Quantity, Record, TimeSeries};
use crate::app::services::archive_reader::{ArchiveReader, LineCursor, file_cursor};
use crate::app::services::field_table::{self, ParsedHeader, Schema};
use crate::app::services::numeric_header::{BlockLayout, decode_int_block, decode_real_block};
use crate::app::services::series_assembler::{PayloadLayout, decode_block};
use crate::config::ParseOptions;
use crate::constants::{
    V1_EXCLUDE, V1_PAYLOAD_WIDTH, V1_TEXT_HEADER_LINES, V2_PAYLOAD_WIDTH, V2_TEXT_HEADER_LINES,
    numeric_header,
};
use crate::{Error, Result};

static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]+").expect("digits regex"));

/// Per-member CSMIP layout variant, chosen by member extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsmipKind {
    /// Full format: three payload blocks, 100-value numeric headers
    V2,
    /// Reduced format: acceleration only, 50-value numeric headers
    V1,
}

impl CsmipKind {
    /// Classify a member or file name by extension. `.v2c` members use the
    /// V2 layout (corrected variant).
    pub fn from_member_name(name: &str) -> Option<CsmipKind> {
        match Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_lowercase()
            .as_str()
        {
            "v2" | "v2c" => Some(CsmipKind::V2),
            "v1" => Some(CsmipKind::V1),
            _ => None,
        }
    }

    fn text_header_lines(self) -> usize {
        match self {
            CsmipKind::V2 => V2_TEXT_HEADER_LINES,
            CsmipKind::V1 => V1_TEXT_HEADER_LINES,
        }
    }

    fn int_layout(self) -> BlockLayout {
        match self {
            CsmipKind::V2 => BlockLayout::new(
                numeric_header::V2_COUNT,
                numeric_header::INT_WIDTH,
                numeric_header::INT_PER_LINE,
            ),
            CsmipKind::V1 => BlockLayout::new(
                numeric_header::V1_COUNT,
                numeric_header::INT_WIDTH,
                numeric_header::INT_PER_LINE,
            ),
        }
    }

    fn real_layout(self) -> BlockLayout {
        match self {
            CsmipKind::V2 => BlockLayout::new(
                numeric_header::V2_COUNT,
                numeric_header::REAL_WIDTH,
                numeric_header::REAL_PER_LINE,
            ),
            CsmipKind::V1 => BlockLayout::new(
                numeric_header::V1_COUNT,
                numeric_header::REAL_WIDTH,
                numeric_header::REAL_PER_LINE,
            ),
        }
    }

    fn payload_layout(self) -> PayloadLayout {
        match self {
            CsmipKind::V2 => PayloadLayout::new(V2_PAYLOAD_WIDTH),
            CsmipKind::V1 => PayloadLayout::new(V1_PAYLOAD_WIDTH),
        }
    }

    fn schema(self) -> &'static Schema {
        match self {
            CsmipKind::V2 => &fields::V2_SCHEMA,
            CsmipKind::V1 => &fields::V1_SCHEMA,
        }
    }
}

/// Parse one CSMIP member into a [`TimeSeries`].
pub fn read_record(
    mut cursor: LineCursor,
    member_name: &str,
    kind: CsmipKind,
    options: &ParseOptions,
) -> Result<TimeSeries> {
    let file_name = base_name(member_name);

    // 1. Readable text header. A schema mismatch degrades the member to
    // partial metadata; it does not abort the parse.
    let mut exclusions: Vec<String> = options.exclusions.clone();
    if kind == CsmipKind::V1 {
        exclusions.extend(V1_EXCLUDE.iter().map(|pattern| pattern.to_string()));
    }
    let schema = kind.schema().without(&exclusions)?;

    let mut header_cursor = cursor.clone();
    let header = match field_table::parse_fields(&mut header_cursor, &schema) {
        Ok(parsed_fields) => field_table::route(parsed_fields),
        Err(e) => {
            warn!(
                member = file_name.as_str(),
                error = %e,
                "failed to parse header fields; continuing with empty metadata"
            );
            ParsedHeader::default()
        }
    };

    // 2. Numeric headers, resuming at the fixed line where the text header
    // ends. Length mismatches are hard failures for this member.
    if cursor.advance_to(kind.text_header_lines()).is_none() {
        return Err(Error::numeric_header_length(
            file_name.as_str(),
            kind.int_layout().count,
            0,
        ));
    }
    let int_header = decode_int_block(&mut cursor, &kind.int_layout(), &file_name)?;
    let real_header = decode_real_block(&mut cursor, &kind.real_layout(), &file_name)?;

    let meta = build_meta(&header, &file_name, member_name);

    // 3. Sensor data, resuming where the numeric header left off.
    if options.summarize {
        debug!(member = file_name.as_str(), "summarize: payload decoding skipped");
        let mut series = TimeSeries::summary(meta);
        series.set_headers(int_header, real_header);
        return Ok(series);
    }

    let layout = kind.payload_layout();
    let accel = decode_block(&mut cursor, &layout, &file_name)?;
    let (veloc, displ) = match kind {
        CsmipKind::V2 => {
            let veloc = decode_block(&mut cursor, &layout, &file_name)?;
            let displ = decode_block(&mut cursor, &layout, &file_name)?;
            (Some(veloc.values), Some(displ.values))
        }
        // explicitly absent, not zero-length
        CsmipKind::V1 => (None, None),
    };

    let mut series = TimeSeries::new(Some(accel.values), veloc, displ, meta)?;
    series.set_headers(int_header, real_header);
    Ok(series)
}

/// Parse every CSMIP member of a zip archive into one [`Record`].
///
/// Member failures are logged and skipped; metadata shared across the event
/// (date, station identity, coordinates) comes from the first successfully
/// parsed member.
pub fn read_archive(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Record> {
    let path = path.as_ref();
    let mut reader = ArchiveReader::open(path)?;
    let mut members = Vec::new();

    for name in reader.member_names() {
        let Some(kind) = CsmipKind::from_member_name(&name) else {
            continue;
        };
        let cursor = match reader.member_cursor(&name) {
            Ok(cursor) => cursor,
            Err(e) => {
                warn!(member = name.as_str(), error = %e, "failed to read member; skipping");
                continue;
            }
        };
        match read_record(cursor, &name, kind, options) {
            Ok(series) => members.push(series),
            Err(e) => {
                warn!(member = name.as_str(), error = %e, "failed to parse member; skipping");
            }
        }
    }

    debug!(archive = %path.display(), members = members.len(), "archive parsed");
    Ok(Record::from_members(members, path))
}

/// Parse a directory of CSMIP series files (an unzipped archive) into one
/// [`Record`], discovering members recursively in name order.
pub fn read_directory(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Record> {
    let path = path.as_ref();
    let mut files: Vec<_> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(entry.into_path()),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .collect();
    files.sort();

    let mut members = Vec::new();
    for file in files {
        let name = file.to_string_lossy().to_string();
        let Some(kind) = CsmipKind::from_member_name(&name) else {
            continue;
        };
        let cursor = match file_cursor(&file) {
            Ok(cursor) => cursor,
            Err(e) => {
                warn!(member = name.as_str(), error = %e, "failed to read file; skipping");
                continue;
            }
        };
        match read_record(cursor, &name, kind, options) {
            Ok(series) => members.push(series),
            Err(e) => {
                warn!(member = name.as_str(), error = %e, "failed to parse file; skipping");
            }
        }
    }

    Ok(Record::from_members(members, path))
}

/// Parse a standalone CSMIP series file into a [`TimeSeries`].
pub fn read_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<TimeSeries> {
    let path = path.as_ref();
    let name = path.to_string_lossy().to_string();
    let kind = CsmipKind::from_member_name(&name)
        .ok_or_else(|| Error::unknown_format(name.clone()))?;
    let cursor = file_cursor(path)?;
    read_record(cursor, &name, kind, options)
}

/// Assemble the series-level metadata bag from routed header fields.
fn build_meta(header: &ParsedHeader, file_name: &str, member_name: &str) -> MetaData {
    let mut meta = header.record.clone();
    meta.insert("file_name", file_name);

    // derive the station channel from the file name when the header lacks it
    let missing_channel = meta
        .get_str("station_channel")
        .map(|channel| channel.is_empty())
        .unwrap_or(true);
    if missing_channel {
        if let Some(channel) = channel_from_name(member_name) {
            meta.insert("station_channel", channel);
        }
    }

    for quantity in Quantity::ALL {
        let bag = header.quantity(quantity);
        if let Some(peak) = bag.get_f64("peak_value") {
            meta.insert(format!("peak_{}", quantity.key()), peak);
        }
        if let Some(peak_time) = bag.get_f64("peak_time") {
            meta.insert(format!("peak_{}_time", quantity.key()), peak_time);
        }
        if let Some(units) = bag.get_str("units") {
            meta.insert(format!("units_{}", quantity.key()), units);
        }
    }

    // a shared sampling interval is promoted to the record level
    let time_steps: Vec<f64> = Quantity::ALL
        .iter()
        .filter_map(|quantity| header.quantity(*quantity).get_f64("time_step"))
        .collect();
    if let Some(first) = time_steps.first() {
        if time_steps.iter().all(|dt| dt == first) {
            meta.insert("time_step", *first);
        }
    }

    meta
}

/// First run of digits in the file stem, with leading zeros stripped
fn channel_from_name(member_name: &str) -> Option<String> {
    let stem = Path::new(member_name).file_stem()?.to_string_lossy();
    let digits = RE_DIGITS.find(&stem)?.as_str();
    digits.parse::<u64>().ok().map(|number| number.to_string())
}

/// Final path component as the member's file name
fn base_name(member_name: &str) -> String {
    Path::new(member_name)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| member_name.to_string())
}
