//! Payload block decoder.
//!
//! Each quantity's data block is prefixed by a line declaring its sample
//! count, optionally carrying a parenthesized Fortran-style format token
//! (e.g. `(8f10.3)`) that overrides the default field width. Values follow
//! at a fixed number of columns per line with a possibly short final row.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::app::services::archive_reader::LineCursor;
use crate::app::services::numeric_header::fixed_width_fields;
use crate::constants::NUM_COLUMNS;
use crate::{Error, Result};

static RE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *([0-9]+)").expect("count regex"));
static RE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(8f([0-9]+)(?:\.[0-9]+)?\)").expect("format regex"));

/// Layout defaults for one format's payload blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadLayout {
    /// Field width when the count line declares no format token
    pub default_width: usize,
    /// Values per full line
    pub values_per_line: usize,
}

impl PayloadLayout {
    pub const fn new(default_width: usize) -> Self {
        Self {
            default_width,
            values_per_line: NUM_COLUMNS,
        }
    }
}

/// One decoded payload block
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadBlock {
    pub values: Vec<f64>,
    pub npts: usize,
    /// Field width actually used (default or format-token override)
    pub field_width: usize,
}

/// Decode one count-prefixed payload block at the cursor.
pub fn decode_block(
    cursor: &mut LineCursor,
    layout: &PayloadLayout,
    file: &str,
) -> Result<PayloadBlock> {
    let Some(count_line) = cursor.next_line() else {
        return Err(Error::payload_shape(file, "missing sample count line"));
    };

    let npts = RE_COUNT
        .captures(count_line)
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| {
            Error::payload_shape(file, format!("no sample count in line '{}'", count_line.trim()))
        })?
        .as_str()
        .parse::<usize>()
        .map_err(|e| Error::payload_shape(file, format!("invalid sample count: {}", e)))?;

    let field_width = match RE_FORMAT
        .captures(count_line)
        .and_then(|captures| captures.get(1))
        .and_then(|width| width.as_str().parse::<usize>().ok())
    {
        Some(width) => {
            debug!(file, width, "field width overridden by format token");
            width
        }
        None => layout.default_width,
    };

    let mut values = Vec::with_capacity(npts);
    let lines = npts.div_ceil(layout.values_per_line);
    for _ in 0..lines {
        let Some(line) = cursor.next_line() else {
            return Err(Error::payload_shape(
                file,
                format!("declared {} values, stream ended after {}", npts, values.len()),
            ));
        };
        for field in fixed_width_fields(line, field_width) {
            let value = field.parse::<f64>().map_err(|e| {
                Error::payload_shape(file, format!("invalid data value '{}': {}", field, e))
            })?;
            values.push(value);
        }
    }

    if values.len() != npts {
        return Err(Error::payload_shape(
            file,
            format!("declared {} values, decoded {}", npts, values.len()),
        ));
    }

    Ok(PayloadBlock {
        values,
        npts,
        field_width,
    })
}
