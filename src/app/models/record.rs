//! Station-level event record.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use super::metadata::{MetaData, MetaValue};
use super::series::TimeSeries;
use crate::constants::{RECORD_LEVEL_KEYS, UNLABELED_LOCATION};

/// One station's event (or ambient) capture: a channel-keyed collection of
/// [`TimeSeries`] plus metadata shared across the whole capture (event date,
/// station identity, coordinates, source file name).
///
/// Records are assembled by the archive-level parsers and are immutable to
/// external callers once returned; consolidation guarantees at most one
/// series per channel identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    series: BTreeMap<String, TimeSeries>,
    meta: MetaData,
}

impl Record {
    pub fn new(meta: MetaData) -> Self {
        Self {
            series: BTreeMap::new(),
            meta,
        }
    }

    /// Assemble a record from parsed member series.
    ///
    /// Used by the archive-level parsers: metadata shared across the whole
    /// capture (event date, station identity, coordinates) is copied from
    /// the first successfully parsed member, and every series is attached
    /// under its channel slot. An empty member list yields an empty record
    /// with a warning, not an error.
    pub(crate) fn from_members(members: Vec<TimeSeries>, origin: &Path) -> Record {
        let mut meta = MetaData::with_file_name(origin.display().to_string());
        match members.first() {
            Some(first) => {
                for key in RECORD_LEVEL_KEYS {
                    if let Some(value) = first.meta().get(key) {
                        meta.insert(*key, value.clone());
                    }
                }
            }
            None => warn!(
                origin = %origin.display(),
                "no members parsed; record is empty"
            ),
        }

        let mut record = Record::new(meta);
        for series in members {
            record.attach(series);
        }
        record
    }

    /// Attach a series under its channel slot.
    ///
    /// The slot key is the series' station channel identifier, falling back
    /// to its file name. When the slot is already occupied the incoming
    /// series is merged in: only the quantities present on it overwrite, and
    /// overwrites of populated quantities are logged rather than failed.
    pub(crate) fn attach(&mut self, series: TimeSeries) {
        let key = series
            .station_channel()
            .map(str::to_string)
            .or_else(|| series.file_name().map(str::to_string))
            .unwrap_or_else(|| format!("series-{}", self.series.len() + 1));

        match self.series.get_mut(&key) {
            Some(existing) => {
                debug!(channel = key.as_str(), "consolidating into existing channel slot");
                existing.merge_from(series);
            }
            None => {
                self.series.insert(key, series);
            }
        }
    }

    /// The channel-keyed series collection
    pub fn series(&self) -> &BTreeMap<String, TimeSeries> {
        &self.series
    }

    /// Look up a series by channel identifier
    pub fn get(&self, channel: &str) -> Option<&TimeSeries> {
        self.series.get(channel)
    }

    /// First series whose metadata satisfies every `(key, value)` filter
    pub fn find_series(&self, filters: &[(&str, MetaValue)]) -> Option<&TimeSeries> {
        self.series.values().find(|series| {
            filters
                .iter()
                .all(|(key, value)| series.meta().get(key) == Some(value))
        })
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn meta(&self) -> &MetaData {
        &self.meta
    }

    pub(crate) fn meta_mut(&mut self) -> &mut MetaData {
        &mut self.meta
    }

    /// Event date (ISO-8601), when recorded
    pub fn event_date(&self) -> Option<&str> {
        self.meta.get_str("event_date")
    }

    /// Station name, when recorded
    pub fn station_name(&self) -> Option<&str> {
        self.meta.get_str("station_name")
    }

    /// Station number, when recorded
    pub fn station_number(&self) -> Option<&str> {
        self.meta.get_str("station_number")
    }

    /// Station coordinates, when recorded
    pub fn coordinates(&self) -> Option<&str> {
        self.meta.get_str("coordinates")
    }

    /// Source archive or directory name
    pub fn file_name(&self) -> Option<&str> {
        self.meta.get_str("file_name")
    }
}

/// Partition a flat series collection by location label.
///
/// Series without a `location` metadata entry land in the explicit
/// [`UNLABELED_LOCATION`] bucket rather than being dropped, so the union of
/// the output buckets always has the same size as the input.
pub fn group_by_location(
    serieses: impl IntoIterator<Item = TimeSeries>,
) -> BTreeMap<String, Vec<TimeSeries>> {
    let mut groups: BTreeMap<String, Vec<TimeSeries>> = BTreeMap::new();
    for series in serieses {
        let location = match series.location() {
            Some(location) if !location.trim().is_empty() => location.to_string(),
            _ => {
                debug!(
                    file = series.file_name().unwrap_or("<unknown>"),
                    "no location label; series grouped as unlabeled"
                );
                UNLABELED_LOCATION.to_string()
            }
        };
        groups.entry(location).or_default().push(series);
    }
    groups
}
