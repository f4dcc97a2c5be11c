//! Format layout constants for CSMIP and SMC record files
//!
//! Column widths, header line counts, tag tables and regex fragments shared
//! across the parsing services. The fixed-column layouts reproduced here are
//! compatibility contracts; changing them breaks real archives.

// =============================================================================
// Format Tags and Dispatch
// =============================================================================

/// Known format tags in dispatch priority order (first match wins)
pub const FORMAT_PRIORITY: &[&str] = &["v2", "v2c", "smc"];

/// Archive file extension
pub const ARCHIVE_EXTENSION: &str = "zip";

// =============================================================================
// Payload Layout
// =============================================================================

/// Payload data values per line, all formats
pub const NUM_COLUMNS: usize = 8;

/// Default payload field width for full-format (V2) data blocks
pub const V2_PAYLOAD_WIDTH: usize = 10;

/// Default payload field width for reduced-format (V1) data blocks
pub const V1_PAYLOAD_WIDTH: usize = 9;

/// Default payload field width for SMC data blocks
pub const SMC_PAYLOAD_WIDTH: usize = 10;

// =============================================================================
// Text Header Layout
// =============================================================================

/// Text header line count for full V2 members (numeric headers follow)
pub const V2_TEXT_HEADER_LINES: usize = 25;

/// Text header line count for reduced V1 members
pub const V1_TEXT_HEADER_LINES: usize = 13;

/// Text header line count for SMC members
pub const SMC_TEXT_HEADER_LINES: usize = 11;

// =============================================================================
// Numeric Header Layout
// =============================================================================

/// Integer/real header value counts per format
pub mod numeric_header {
    /// Full-format integer and real header value count
    pub const V2_COUNT: usize = 100;

    /// Reduced-format integer and real header value count
    pub const V1_COUNT: usize = 50;

    /// SMC integer header value count
    pub const SMC_INT_COUNT: usize = 48;

    /// SMC real header value count
    pub const SMC_REAL_COUNT: usize = 50;

    /// CSMIP integer header field width
    pub const INT_WIDTH: usize = 5;

    /// CSMIP real header field width
    pub const REAL_WIDTH: usize = 10;

    /// SMC integer header field width
    pub const SMC_INT_WIDTH: usize = 10;

    /// SMC real header field width
    pub const SMC_REAL_WIDTH: usize = 15;

    /// CSMIP integer header values per 80-column line
    pub const INT_PER_LINE: usize = 16;

    /// CSMIP real header values per 80-column line
    pub const REAL_PER_LINE: usize = 8;

    /// SMC integer header values per line
    pub const SMC_INT_PER_LINE: usize = 8;

    /// SMC real header values per line
    pub const SMC_REAL_PER_LINE: usize = 5;
}

// =============================================================================
// Date Formats
// =============================================================================

/// Event date format in CSMIP text headers, e.g. "04/26/21, 10:09"
pub const CSMIP_DATE_FORMAT: &str = "%m/%d/%y, %H:%M";

/// Event date format in SMC text headers, e.g. "04 Jan 2018 02:39"
pub const SMC_DATE_FORMAT: &str = "%d %b %Y %H:%M";

// =============================================================================
// Regex Fragments
// =============================================================================

/// Regular expression fragment matching a decimal value
pub const RE_DECIMAL: &str = r"[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?";

/// Regular expression fragment matching a unit token, e.g. "cm/sec2" or "sec"
pub const RE_UNITS: &str = r"[A-Za-z][A-Za-z0-9/*^.]*";

// =============================================================================
// Schema Exclusions
// =============================================================================

/// Field groups not provided by the reduced V1 format, as glob patterns over
/// dotted destination keys
pub const V1_EXCLUDE: &[&str] = &["filter*", "*peak*", "*init*", "*disp*", "*velo*"];

// =============================================================================
// Model Constants
// =============================================================================

/// Bucket label for series without a location in [`group_by_location`]
///
/// [`group_by_location`]: crate::app::models::group_by_location
pub const UNLABELED_LOCATION: &str = "unlabeled";

/// Vertical-axis index value that flips the rotation sign (handedness
/// convention carried over from legacy processing tools)
pub const VERTICAL_AXIS_SENTINEL: i32 = 3;

/// Metadata keys copied from the first parsed member onto the archive-level
/// record
pub const RECORD_LEVEL_KEYS: &[&str] = &[
    "event_date",
    "station_name",
    "station_number",
    "coordinates",
];
