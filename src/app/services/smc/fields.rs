//! Parse table for the SMC text header.
//!
//! SMC members carry a shorter, 11-line text header with the station name
//! near the top and a spelled-out event date. Only acceleration fields
//! exist; there are no velocity/displacement groups to exclude.

use std::sync::LazyLock;

use regex::Regex;

use crate::app::services::field_table::{Coerce, FieldRule, Matcher, Schema};
use crate::constants::{RE_DECIMAL, RE_UNITS, SMC_DATE_FORMAT};

fn pattern(source: &str) -> Matcher {
    Matcher::Pattern(Regex::new(source).expect("parse table regex"))
}

/// SMC parse table
pub static SMC_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(vec![
        // line 1
        FieldRule::new(
            vec!["record.record_identifier"],
            vec![Coerce::Words],
            Matcher::Line {
                number: 1,
                slices: vec![(0, None)],
            },
        ),
        // line 2
        FieldRule::new(
            vec!["record.station_name"],
            vec![Coerce::Words],
            Matcher::Line {
                number: 2,
                slices: vec![(0, Some(40))],
            },
        ),
        FieldRule::new(
            vec!["record.event_date"],
            vec![Coerce::Date(SMC_DATE_FORMAT)],
            pattern(r"(?i)earthquake of *([0-9]{1,2} [A-Za-z]{3} [0-9]{4} [0-9]{2}:[0-9]{2})"),
        ),
        FieldRule::new(
            vec!["record.station_number", "record.coordinates"],
            vec![Coerce::Text, Coerce::Words],
            pattern(&format!(
                r"(?i)Station No\. *([0-9]+) *({d}[NSEW]*, *{d}[NSEW]*)",
                d = RE_DECIMAL
            )),
        ),
        FieldRule::new(
            vec!["record.channel", "record.component", "record.location"],
            vec![Coerce::Text, Coerce::Text, Coerce::Words],
            pattern(r"(?i)Chan *([0-9]+): *([A-Za-z0-9]+) *Location: *(.*)"),
        ),
        FieldRule::new(
            vec!["accel.peak_value", "accel.units", "accel.peak_time"],
            vec![Coerce::Float, Coerce::Units, Coerce::Float],
            pattern(&format!(
                r"(?i)Peak *acceleration *= *({d}) *({u}) *at *({d})",
                d = RE_DECIMAL,
                u = RE_UNITS
            )),
        ),
        FieldRule::new(
            vec!["accel.npts", "accel.time_step"],
            vec![Coerce::Int, Coerce::Float],
            pattern(&format!(
                r"(?i)([0-9]+) *points of accel data equally spaced at *({d})",
                d = RE_DECIMAL
            )),
        ),
    ])
});
