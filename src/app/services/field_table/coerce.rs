//! Value coercion for captured header tokens.

use chrono::NaiveDateTime;

use super::schema::Coerce;
use crate::app::models::MetaValue;
use crate::{Error, Result};

impl Coerce {
    /// Coerce a raw capture into a metadata value
    pub fn apply(self, raw: &str) -> Result<MetaValue> {
        match self {
            Coerce::Text => Ok(MetaValue::Text(raw.trim().to_string())),
            Coerce::Words => Ok(MetaValue::Text(collapse_whitespace(raw))),
            Coerce::Units => Ok(MetaValue::Text(raw.trim().to_lowercase())),
            Coerce::Float => raw
                .trim()
                .parse::<f64>()
                .map(MetaValue::Float)
                .map_err(|e| Error::data_validation(format!("invalid float '{}': {}", raw.trim(), e))),
            Coerce::Int => raw
                .trim()
                .parse::<i64>()
                .map(MetaValue::Int)
                .map_err(|e| Error::data_validation(format!("invalid integer '{}': {}", raw.trim(), e))),
            Coerce::Date(format) => {
                let cleaned = collapse_whitespace(raw);
                NaiveDateTime::parse_from_str(&cleaned, format)
                    .map(|dt| MetaValue::Text(dt.format("%Y-%m-%dT%H:%M:%S").to_string()))
                    .map_err(|e| {
                        Error::datetime_parse(format!("invalid date '{}' for format '{}'", cleaned, format), e)
                    })
            }
        }
    }
}

/// Collapse runs of whitespace to single spaces and trim
fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
