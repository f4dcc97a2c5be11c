//! Parse tables for the CSMIP text header.
//!
//! The tables define every field that can be extracted from a CSMIP file and
//! map each to coercion functions and a matching rule. The leading component
//! of a key (before the first `.`) routes the field to the record or to one
//! of the accel/veloc/displ series bags. Order matters: rules are applied
//! against the stream strictly top to bottom.

use std::sync::LazyLock;

use regex::Regex;

use crate::app::services::field_table::{Coerce, FieldRule, Matcher, Schema};
use crate::constants::{CSMIP_DATE_FORMAT, RE_DECIMAL, RE_UNITS};

fn pattern(source: &str) -> Matcher {
    Matcher::Pattern(Regex::new(source).expect("parse table regex"))
}

fn build_v2_schema() -> Schema {
    Schema::new(vec![
        // line 1
        FieldRule::new(
            vec!["_", "record.record_identifier"],
            vec![Coerce::Text, Coerce::Text],
            pattern(r"(?i)^([a-z ]+) +([a-z0-9.\-]+)"),
        ),
        // line 5
        FieldRule::new(
            vec!["_", "record.event_date"],
            vec![Coerce::Text, Coerce::Date(CSMIP_DATE_FORMAT)],
            pattern(r"(.*): *([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}, *[0-9]{2}:[0-9]{2})"),
        ),
        // line 6
        FieldRule::new(
            vec!["record.station_number", "record.coordinates"],
            vec![Coerce::Text, Coerce::Words],
            pattern(&format!(
                r"(?i)Station No\. *([0-9]+) *({d}[NSEW]*, *{d}[NSEW]*)",
                d = RE_DECIMAL
            )),
        ),
        // line 7
        FieldRule::new(
            vec!["record.station_name"],
            vec![Coerce::Words],
            Matcher::Line {
                number: 7,
                slices: vec![(0, Some(40))],
            },
        ),
        // line 8
        FieldRule::new(
            vec![
                "record.channel",
                "record.component",
                "_",
                "record.station_channel",
                "record.location",
            ],
            vec![
                Coerce::Text,
                Coerce::Text,
                Coerce::Text,
                Coerce::Words,
                Coerce::Words,
            ],
            pattern(
                r"(?i)Chan *([0-9]+): *([A-Za-z0-9]+) *(DegR*)? *(?:Sta Chn: *([0-9]+))? *Location: *(.*)",
            ),
        ),
        // line 11
        FieldRule::new(
            vec!["record.instr_period", "_"],
            vec![Coerce::Float, Coerce::Units],
            pattern(&format!(
                r"(?i)Instr Period *= *({d}) *({u}),",
                d = RE_DECIMAL,
                u = RE_UNITS
            )),
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
            vec!["veloc.peak_value", "veloc.units", "veloc.peak_time"],
            vec![Coerce::Float, Coerce::Units, Coerce::Float],
            pattern(&format!(
                r"(?i)Peak *velocity *= *({d}) *({u}) *at *({d})",
                d = RE_DECIMAL,
                u = RE_UNITS
            )),
        ),
        FieldRule::new(
            vec!["displ.peak_value", "displ.units", "displ.peak_time"],
            vec![Coerce::Float, Coerce::Units, Coerce::Float],
            pattern(&format!(
                r"(?i)Peak *displacement *= *({d}) *({u}) *at *({d})",
                d = RE_DECIMAL,
                u = RE_UNITS
            )),
        ),
        FieldRule::new(
            vec!["record.init_veloc", "_", "record.init_displ", "_"],
            vec![Coerce::Float, Coerce::Units, Coerce::Float, Coerce::Units],
            pattern(&format!(
                r"(?i)Initial velocity *= *({d}) *({u}); *Initial displacement *= *({d}) *({u})",
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
        FieldRule::new(
            vec!["veloc.npts", "veloc.time_step"],
            vec![Coerce::Int, Coerce::Float],
            pattern(&format!(
                r"(?i)([0-9]+) *points of veloc data equally spaced at *({d})",
                d = RE_DECIMAL
            )),
        ),
        FieldRule::new(
            vec!["displ.npts", "displ.time_step"],
            vec![Coerce::Int, Coerce::Float],
            pattern(&format!(
                r"(?i)([0-9]+) *points of displ data equally spaced at *({d})",
                d = RE_DECIMAL
            )),
        ),
    ])
}

/// Full V2 parse table
pub static V2_SCHEMA: LazyLock<Schema> = LazyLock::new(build_v2_schema);

/// Reduced V1 parse table: identical to V2 except the station name sits on
/// line 6. The V1 field-group exclusions are applied separately at parse
/// time (see [`crate::constants::V1_EXCLUDE`]).
pub static V1_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    let mut rules: Vec<FieldRule> = build_v2_schema().rules().to_vec();
    for rule in &mut rules {
        if rule.keys == ["record.station_name"] {
            rule.matcher = Matcher::Line {
                number: 6,
                slices: vec![(0, Some(40))],
            };
        }
    }
    Schema::new(rules)
});
