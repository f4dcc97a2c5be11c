//! Fixed-width numeric header block decoder.
//!
//! Record formats carry a block of integers followed by a block of reals
//! immediately after the text header, laid out in fixed-width columns across
//! a fixed number of lines. The decoded value count must equal the
//! format-mandated count exactly; a mismatch is a hard failure for the
//! member since it means the cursor is no longer aligned with the payload.

use std::str::FromStr;

use crate::app::services::archive_reader::LineCursor;
use crate::{Error, Result};

/// Layout of one numeric block: total value count, column width in
/// characters, and values per full line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub count: usize,
    pub width: usize,
    pub per_line: usize,
}

impl BlockLayout {
    pub const fn new(count: usize, width: usize, per_line: usize) -> Self {
        Self {
            count,
            width,
            per_line,
        }
    }

    /// Number of lines the block occupies (final line may be short)
    pub fn lines(&self) -> usize {
        self.count.div_ceil(self.per_line)
    }
}

/// Split a line into fixed-width column fields, trimmed.
///
/// The final field may be short; fully blank fields are dropped so that
/// right-padded short rows decode cleanly.
pub(crate) fn fixed_width_fields(line: &str, width: usize) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let cut = rest
            .char_indices()
            .nth(width)
            .map(|(index, _)| index)
            .unwrap_or(rest.len());
        let (field, tail) = rest.split_at(cut);
        let field = field.trim();
        if !field.is_empty() {
            fields.push(field);
        }
        rest = tail;
    }
    fields
}

fn decode_block<T: FromStr>(
    cursor: &mut LineCursor,
    layout: &BlockLayout,
    file: &str,
    kind: &str,
) -> Result<Vec<T>>
where
    T::Err: std::fmt::Display,
{
    let mut values = Vec::with_capacity(layout.count);
    for _ in 0..layout.lines() {
        let Some(line) = cursor.next_line() else {
            return Err(Error::numeric_header_length(file, layout.count, values.len()));
        };
        for field in fixed_width_fields(line, layout.width) {
            let value = field.parse::<T>().map_err(|e| {
                Error::header_parse(
                    file,
                    format!("invalid {} header field '{}': {}", kind, field, e),
                )
            })?;
            values.push(value);
        }
    }

    if values.len() != layout.count {
        return Err(Error::numeric_header_length(file, layout.count, values.len()));
    }
    Ok(values)
}

/// Decode the fixed-count integer header block at the cursor
pub fn decode_int_block(
    cursor: &mut LineCursor,
    layout: &BlockLayout,
    file: &str,
) -> Result<Vec<i64>> {
    decode_block(cursor, layout, file, "integer")
}

/// Decode the fixed-count real header block at the cursor
pub fn decode_real_block(
    cursor: &mut LineCursor,
    layout: &BlockLayout,
    file: &str,
) -> Result<Vec<f64>> {
    decode_block(cursor, layout, file, "real")
}
