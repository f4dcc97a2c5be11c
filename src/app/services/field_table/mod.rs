//! Field-table-driven text header parser
//!
//! Applies an ordered, declarative schema of matching rules to a line
//! cursor, extracting typed header fields by fixed position or forward
//! pattern search. The schema is data (see [`schema`]); format variants are
//! derived by exclusion filtering instead of separate parsers.
//!
//! ## Architecture
//!
//! - [`schema`] - rule, matcher and coercion descriptors
//! - [`coerce`] - token-to-value coercion functions
//! - [`parse_fields`] / [`route`] - the ordered-schema interpreter and
//!   entity routing of extracted fields

pub mod coerce;
pub mod schema;

#[cfg(test)]
pub mod tests;

pub use schema::{Coerce, DISCARD_KEY, FieldRule, Matcher, Schema};

use std::collections::BTreeMap;

use tracing::debug;

use crate::app::models::{MetaData, MetaValue, Quantity};
use crate::app::services::archive_reader::LineCursor;
use crate::{Error, Result};

/// Header fields routed by entity prefix
#[derive(Debug, Clone, Default)]
pub struct ParsedHeader {
    /// `record.*` fields
    pub record: MetaData,
    /// `accel.*` fields
    pub accel: MetaData,
    /// `veloc.*` fields
    pub veloc: MetaData,
    /// `displ.*` fields
    pub displ: MetaData,
}

impl ParsedHeader {
    /// The per-quantity metadata bag
    pub fn quantity(&self, quantity: Quantity) -> &MetaData {
        match quantity {
            Quantity::Accel => &self.accel,
            Quantity::Veloc => &self.veloc,
            Quantity::Displ => &self.displ,
        }
    }
}

/// Apply a schema to the cursor, strictly in table order.
///
/// Each rule extracts one capture or slice per destination key and coerces
/// it with the declared function. A rule that cannot be matched before the
/// stream ends fails the whole header parse; callers degrade that to an
/// empty metadata set at the member boundary.
pub fn parse_fields(
    cursor: &mut LineCursor,
    table: &Schema,
) -> Result<BTreeMap<String, MetaValue>> {
    let mut fields = BTreeMap::new();

    for rule in table.rules() {
        match &rule.matcher {
            Matcher::Line { number, slices } => {
                let line = cursor.advance_to(*number).ok_or_else(|| {
                    Error::header_parse(
                        "<header>",
                        format!("stream ended before fixed line {}", number),
                    )
                })?;
                let line = line.to_string();
                for ((key, coerce), (start, end)) in
                    rule.keys.iter().zip(&rule.coerce).zip(slices)
                {
                    let raw = slice_columns(&line, *start, *end);
                    if *key != DISCARD_KEY {
                        fields.insert((*key).to_string(), coerce.apply(raw)?);
                    }
                }
            }
            Matcher::Pattern(pattern) => {
                let mut matched = false;
                while !matched {
                    let Some(line) = cursor.next_line() else {
                        return Err(Error::header_parse(
                            "<header>",
                            format!("no line matching /{}/", pattern.as_str()),
                        ));
                    };
                    if let Some(captures) = pattern.captures(line) {
                        for (index, (key, coerce)) in
                            rule.keys.iter().zip(&rule.coerce).enumerate()
                        {
                            // optional groups that did not participate are skipped
                            let Some(capture) = captures.get(index + 1) else {
                                continue;
                            };
                            if *key != DISCARD_KEY {
                                fields.insert((*key).to_string(), coerce.apply(capture.as_str())?);
                            }
                        }
                        matched = true;
                    }
                }
            }
        }
    }

    Ok(fields)
}

/// Group extracted fields by their entity prefix.
///
/// The leading component of each dotted key selects the destination bag;
/// keys with an unknown prefix are dropped with a debug log.
pub fn route(fields: BTreeMap<String, MetaValue>) -> ParsedHeader {
    let mut header = ParsedHeader::default();
    for (key, value) in fields {
        match key.split_once('.') {
            Some(("record", field)) => {
                header.record.insert(field, value);
            }
            Some(("accel", field)) => {
                header.accel.insert(field, value);
            }
            Some(("veloc", field)) => {
                header.veloc.insert(field, value);
            }
            Some(("displ", field)) => {
                header.displ.insert(field, value);
            }
            _ => {
                debug!(key = key.as_str(), "dropping field with unknown entity prefix");
            }
        }
    }
    header
}

/// Slice a line by character columns, clamped to the line length
fn slice_columns(line: &str, start: usize, end: Option<usize>) -> &str {
    let char_index = |n: usize| {
        line.char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    };
    let from = char_index(start);
    let to = end.map(char_index).unwrap_or(line.len());
    &line[from..to.max(from)]
}
