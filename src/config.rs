//! Parse configuration.
//!
//! Options threaded through every format parser. Parsing is a pure function
//! of the input bytes plus these options, so external batch drivers can fan
//! out over independent archives freely.

use serde::{Deserialize, Serialize};

/// Options controlling a parse run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Skip payload decoding entirely; header and metadata parsing proceed
    /// normally and all three sequences stay unset
    pub summarize: bool,

    /// Glob patterns matched against dotted destination keys; matching
    /// field-table entries are removed from the schema before parsing
    pub exclusions: Vec<String>,
}

impl ParseOptions {
    /// Full parse with no schema exclusions
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata-only parse (payload decoding skipped)
    pub fn summary() -> Self {
        Self {
            summarize: true,
            ..Self::default()
        }
    }

    /// Add exclusion patterns to the schema filter
    pub fn with_exclusions<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions.extend(patterns.into_iter().map(Into::into));
        self
    }
}
