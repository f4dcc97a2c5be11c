//! Field-table schema types.
//!
//! A schema is an ordered list of [`FieldRule`]s, each mapping a tuple of
//! dotted destination keys to coercion functions and a matching rule. Keeping
//! the schema as data means reduced-format variants are schema diffs
//! (glob-based exclusions), not code forks.

use glob::Pattern;
use regex::Regex;

use crate::{Error, Result};

/// Destination key that captures and consumes a token without persisting it
pub const DISCARD_KEY: &str = "_";

/// How a rule locates its source text
#[derive(Debug, Clone)]
pub enum Matcher {
    /// An absolute 1-based line number plus one column slice per key.
    /// Slice ends are clamped to the line length; `None` runs to the end.
    Line {
        number: usize,
        slices: Vec<(usize, Option<usize>)>,
    },
    /// A regular expression searched against the stream starting from the
    /// current line, advancing as it searches. Capture group `i + 1` feeds
    /// key `i`; an unmatched optional group simply skips its key.
    Pattern(Regex),
}

/// How a captured token is turned into a metadata value
#[derive(Debug, Clone, Copy)]
pub enum Coerce {
    /// Trimmed text
    Text,
    /// Whitespace-collapsed trimmed text
    Words,
    /// Lowercased trimmed unit token
    Units,
    /// Floating-point value
    Float,
    /// Integer value
    Int,
    /// Date/time in the given `chrono` format, stored as ISO-8601 text
    Date(&'static str),
}

/// One schema entry: destination keys, their coercions, and a matcher.
///
/// Keys are dotted `entity.field` names with entity in
/// `{record, accel, veloc, displ}`; [`DISCARD_KEY`] consumes a capture
/// without persisting it.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub keys: Vec<&'static str>,
    pub coerce: Vec<Coerce>,
    pub matcher: Matcher,
}

impl FieldRule {
    pub fn new(keys: Vec<&'static str>, coerce: Vec<Coerce>, matcher: Matcher) -> Self {
        debug_assert_eq!(keys.len(), coerce.len());
        Self {
            keys,
            coerce,
            matcher,
        }
    }
}

/// Ordered collection of field rules applied strictly in table order
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Derive a reduced schema by removing every rule with a destination key
    /// matching any of the exclusion glob patterns.
    pub fn without(&self, exclusions: &[impl AsRef<str>]) -> Result<Schema> {
        let patterns = exclusions
            .iter()
            .map(|pattern| {
                Pattern::new(pattern.as_ref()).map_err(|e| {
                    Error::data_validation(format!(
                        "invalid exclusion pattern '{}': {}",
                        pattern.as_ref(),
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let rules = self
            .rules
            .iter()
            .filter(|rule| {
                !rule.keys.iter().any(|key| {
                    *key != DISCARD_KEY && patterns.iter().any(|pattern| pattern.matches(key))
                })
            })
            .cloned()
            .collect();
        Ok(Schema { rules })
    }
}
