//! SMC format parser
//!
//! Reads NSMP SMC strong-motion members: an 11-line text header parsed
//! through the [`fields`] table, a 48-value integer header block (10-char
//! columns), a 50-value real header block (15-char columns) and a single
//! count-prefixed acceleration payload. Velocity and displacement are never
//! populated for this format.
//!
//! Failure handling matches the CSMIP parser: text-header failures degrade
//! the member to partial metadata, numeric failures fail the member, and
//! archive-level parsing isolates member failures from siblings.

pub mod fields;

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::app::models::{MetaData, Record, TimeSeries};
use crate::app::services::archive_reader::{ArchiveReader, LineCursor, file_cursor};
use crate::app::services::field_table::{self, ParsedHeader};
use crate::app::services::numeric_header::{BlockLayout, decode_int_block, decode_real_block};
use crate::app::services::series_assembler::{PayloadLayout, decode_block};
use crate::config::ParseOptions;
use crate::constants::{SMC_PAYLOAD_WIDTH, SMC_TEXT_HEADER_LINES, numeric_header};
use crate::{Error, Result};

const INT_LAYOUT: BlockLayout = BlockLayout::new(
    numeric_header::SMC_INT_COUNT,
    numeric_header::SMC_INT_WIDTH,
    numeric_header::SMC_INT_PER_LINE,
);
const REAL_LAYOUT: BlockLayout = BlockLayout::new(
    numeric_header::SMC_REAL_COUNT,
    numeric_header::SMC_REAL_WIDTH,
    numeric_header::SMC_REAL_PER_LINE,
);
const PAYLOAD_LAYOUT: PayloadLayout = PayloadLayout::new(SMC_PAYLOAD_WIDTH);

/// True when the name carries the `.smc` extension
pub fn is_member_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("smc"))
        .unwrap_or(false)
}

/// Parse one SMC member into a [`TimeSeries`].
pub fn read_record(
    mut cursor: LineCursor,
    member_name: &str,
    options: &ParseOptions,
) -> Result<TimeSeries> {
    let file_name = base_name(member_name);

    let schema = fields::SMC_SCHEMA.without(&options.exclusions)?;
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

    if cursor.advance_to(SMC_TEXT_HEADER_LINES).is_none() {
        return Err(Error::numeric_header_length(
            file_name.as_str(),
            INT_LAYOUT.count,
            0,
        ));
    }
    let int_header = decode_int_block(&mut cursor, &INT_LAYOUT, &file_name)?;
    let real_header = decode_real_block(&mut cursor, &REAL_LAYOUT, &file_name)?;

    let meta = build_meta(&header, &file_name);

    if options.summarize {
        debug!(member = file_name.as_str(), "summarize: payload decoding skipped");
        let mut series = TimeSeries::summary(meta);
        series.set_headers(int_header, real_header);
        return Ok(series);
    }

    let accel = decode_block(&mut cursor, &PAYLOAD_LAYOUT, &file_name)?;
    // acceleration only; velocity and displacement stay explicitly absent
    let mut series = TimeSeries::new(Some(accel.values), None, None, meta)?;
    series.set_headers(int_header, real_header);
    Ok(series)
}

/// Parse every SMC member of a zip archive into one [`Record`].
pub fn read_archive(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Record> {
    let path = path.as_ref();
    let mut reader = ArchiveReader::open(path)?;
    let mut members = Vec::new();

    for name in reader.member_names() {
        if !is_member_name(&name) {
            continue;
        }
        let cursor = match reader.member_cursor(&name) {
            Ok(cursor) => cursor,
            Err(e) => {
                warn!(member = name.as_str(), error = %e, "failed to read member; skipping");
                continue;
            }
        };
        match read_record(cursor, &name, options) {
            Ok(series) => members.push(series),
            Err(e) => {
                warn!(member = name.as_str(), error = %e, "failed to parse member; skipping");
            }
        }
    }

    debug!(archive = %path.display(), members = members.len(), "archive parsed");
    Ok(Record::from_members(members, path))
}

/// Parse a directory of SMC series files into one [`Record`].
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
        if !is_member_name(&name) {
            continue;
        }
        let cursor = match file_cursor(&file) {
            Ok(cursor) => cursor,
            Err(e) => {
                warn!(member = name.as_str(), error = %e, "failed to read file; skipping");
                continue;
            }
        };
        match read_record(cursor, &name, options) {
            Ok(series) => members.push(series),
            Err(e) => {
                warn!(member = name.as_str(), error = %e, "failed to parse file; skipping");
            }
        }
    }

    Ok(Record::from_members(members, path))
}

/// Parse a standalone SMC series file into a [`TimeSeries`].
pub fn read_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<TimeSeries> {
    let path = path.as_ref();
    let name = path.to_string_lossy().to_string();
    if !is_member_name(&name) {
        return Err(Error::unknown_format(name));
    }
    let cursor = file_cursor(path)?;
    read_record(cursor, &name, options)
}

fn build_meta(header: &ParsedHeader, file_name: &str) -> MetaData {
    let mut meta = header.record.clone();
    meta.insert("file_name", file_name);
    // the channel number doubles as the station channel for this format
    if !meta.contains_key("station_channel") {
        if let Some(channel) = meta.get_str("channel").map(str::to_string) {
            meta.insert("station_channel", channel);
        }
    }
    if let Some(peak) = header.accel.get_f64("peak_value") {
        meta.insert("peak_accel", peak);
    }
    if let Some(peak_time) = header.accel.get_f64("peak_time") {
        meta.insert("peak_accel_time", peak_time);
    }
    if let Some(units) = header.accel.get_str("units") {
        meta.insert("units_accel", units);
    }
    if let Some(time_step) = header.accel.get_f64("time_step") {
        meta.insert("time_step", time_step);
    }
    meta
}

/// Final path component as the member's file name
fn base_name(member_name: &str) -> String {
    Path::new(member_name)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| member_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    pub const ACCEL: [f64; 10] = [
        -0.000210, 0.000340, -0.000760, 0.001420, -0.002230, 0.003100, -0.001870, 0.000955,
        -0.000421, 0.000199,
    ];

    fn chunked(values: impl Iterator<Item = String>, per_line: usize) -> String {
        values
            .collect::<Vec<_>>()
            .chunks(per_line)
            .map(|chunk| chunk.concat())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A complete SMC member: 11 text lines, 48-int/50-real headers, one
    /// acceleration block
    pub fn smc_member(channel: u32) -> String {
        let mut lines = vec![String::new(); 11];
        lines[0] = "1103.HN2.NP corrected accelerogram".to_string(); // 1
        lines[1] = "Berkeley - Byerly Vault".to_string(); // 2
        lines[2] = "Earthquake of 04 Jan 2018 02:39 UTC".to_string(); // 3
        lines[3] = "Station No. 1103   37.8771N, 122.2460W".to_string(); // 4
        lines[4] = format!("Chan  {}: HN2  Location: Free-field vault", channel); // 5
        lines[5] = "Peak acceleration = 3.120 cm/sec2 at 1.250 sec".to_string(); // 6
        lines[6] = format!(
            "{:>8} points of accel data equally spaced at  .010 sec",
            ACCEL.len()
        ); // 7

        lines.push(chunked((1..=48).map(|value| format!("{:>10}", value)), 8));
        lines.push(chunked(
            (1..=50).map(|value| format!("{:>15.3}", value as f64 * 0.25)),
            5,
        ));
        lines.push(format!(
            "{:>8} points of accel data equally spaced at  .010 sec",
            ACCEL.len()
        ));
        lines.push(chunked(
            ACCEL.iter().map(|value| format!("{:>10.6}", value)),
            8,
        ));
        lines.join("\n")
    }

    #[test]
    fn test_is_member_name() {
        assert!(is_member_name("1103.HN2.NP.4E_a.smc"));
        assert!(is_member_name("UPPER.SMC"));
        assert!(!is_member_name("chan001.v2"));
    }

    #[test]
    fn test_smc_member_parses() {
        let cursor = LineCursor::new(&smc_member(2));
        let series = read_record(cursor, "1103.HN2.NP.4E_a.smc", &ParseOptions::new()).unwrap();

        assert_eq!(series.accel().unwrap(), &ACCEL);
        assert!(series.veloc().is_none());
        assert!(series.displ().is_none());
        assert_eq!(series.npts(), Some(10));
        assert_eq!(series.int_header().len(), 48);
        assert_eq!(series.real_header().len(), 50);

        let meta = series.meta();
        assert_eq!(meta.get_str("station_name"), Some("Berkeley - Byerly Vault"));
        assert_eq!(meta.get_str("event_date"), Some("2018-01-04T02:39:00"));
        assert_eq!(meta.get_str("station_number"), Some("1103"));
        assert_eq!(meta.get_str("component"), Some("HN2"));
        assert_eq!(meta.get_str("location"), Some("Free-field vault"));
        assert_eq!(meta.get_str("station_channel"), Some("2"));
        assert_eq!(meta.get_f64("peak_accel"), Some(3.120));
        assert_eq!(series.time_step(), Some(0.010));
    }

    #[test]
    fn test_smc_summarize() {
        let cursor = LineCursor::new(&smc_member(2));
        let series =
            read_record(cursor, "1103.HN2.NP.4E_a.smc", &ParseOptions::summary()).unwrap();
        assert!(series.accel().is_none());
        assert_eq!(meta_peak(&series), Some(3.120));
    }

    fn meta_peak(series: &TimeSeries) -> Option<f64> {
        series.meta().get_f64("peak_accel")
    }

    #[test]
    fn test_smc_short_int_header_fails() {
        // drop one 10-char integer field: the block decodes to 47 of 48
        let member = smc_member(2).replacen("         1", "", 1);
        let cursor = LineCursor::new(&member);
        let result = read_record(cursor, "1103.HN2.NP.4E_a.smc", &ParseOptions::new());
        assert!(matches!(
            result,
            Err(crate::Error::NumericHeaderLength { .. })
        ));
    }
}
