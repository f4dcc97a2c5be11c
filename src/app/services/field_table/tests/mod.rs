//! Test fixtures for the field-table parser.

use regex::Regex;

use super::schema::{Coerce, FieldRule, Matcher, Schema};


/// A small header in the spirit of the real record formats
pub fn sample_header() -> &'static str {
    "\
Corrected accelerogram 58658-CE58658-N.V2
Earthquake of: 04/26/21, 10:09 PDT
Station No. 58658   37.8085N, 122.2672W
Berkeley - Unnamed Building              CSMIP
Peak acceleration = 17.433 cm/sec2 at 5.210 sec
2000 points of accel data equally spaced at .005 sec"
}

/// A schema exercising both matcher kinds, discard keys and all entities
pub fn sample_schema() -> Schema {
    Schema::new(vec![
        FieldRule::new(
            vec!["_", "record.record_identifier"],
            vec![Coerce::Text, Coerce::Text],
            Matcher::Pattern(Regex::new(r"(?i)^([a-z ]+) +([a-z0-9.\-]+)").unwrap()),
        ),
        FieldRule::new(
            vec!["_", "record.event_date"],
            vec![Coerce::Text, Coerce::Date("%m/%d/%y, %H:%M")],
            Matcher::Pattern(
                Regex::new(r"(.*): *([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}, *[0-9]{2}:[0-9]{2})")
                    .unwrap(),
            ),
        ),
        FieldRule::new(
            vec!["record.station_name"],
            vec![Coerce::Words],
            Matcher::Line {
                number: 4,
                slices: vec![(0, Some(40))],
            },
        ),
        FieldRule::new(
            vec!["accel.peak_value", "accel.units", "accel.peak_time"],
            vec![Coerce::Float, Coerce::Units, Coerce::Float],
            Matcher::Pattern(
                Regex::new(
                    r"(?i)peak *acceleration *= *([-+0-9.eE]+) *([A-Za-z][A-Za-z0-9/*^.]*) *at *([-+0-9.eE]+)",
                )
                .unwrap(),
            ),
        ),
        FieldRule::new(
            vec!["accel.npts", "accel.time_step"],
            vec![Coerce::Int, Coerce::Float],
            Matcher::Pattern(
                Regex::new(r"(?i)([0-9]+) *points of accel data equally spaced at *([0-9.eE+-]+)")
                    .unwrap(),
            ),
        ),
    ])
}
