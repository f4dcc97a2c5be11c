//! Hierarchical record model
//!
//! The entities populated by the format parsers and read by downstream
//! consumers: [`Record`] (one station's event capture), [`Vector`]
//! (co-located channels keyed by direction), [`TimeSeries`] (one channel's
//! accel/veloc/displ sequences) and [`MetaData`] (scalar attribute bag).
//!
//! Ownership flows strictly downward: a `Record` owns its series, a `Vector`
//! owns its components. Navigation back up goes through metadata keys
//! (channel id, location label) resolved against the owning container, never
//! through mutual references.

pub mod metadata;
pub mod record;
pub mod series;
pub mod vector;

pub use metadata::{MetaData, MetaValue};
pub use record::{Record, group_by_location};
pub use series::TimeSeries;
pub use vector::Vector;

use serde::{Deserialize, Serialize};

/// Physical quantity carried by a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    Accel,
    Veloc,
    Displ,
}

impl Quantity {
    /// All quantities in payload order
    pub const ALL: [Quantity; 3] = [Quantity::Accel, Quantity::Veloc, Quantity::Displ];

    /// Short key used in metadata and field-table entity prefixes
    pub fn key(self) -> &'static str {
        match self {
            Quantity::Accel => "accel",
            Quantity::Veloc => "veloc",
            Quantity::Displ => "displ",
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Direction label for a component within a [`Vector`]
///
/// The vocabulary is fixed: two horizontals and a vertical. Using this as the
/// component map key enforces the at-most-one-series-per-direction invariant
/// structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Horizontal-1 (longitudinal)
    Long,
    /// Horizontal-2 (transverse)
    Tran,
    /// Vertical
    Vert,
}

impl Direction {
    /// All directions in canonical order
    pub const ALL: [Direction; 3] = [Direction::Long, Direction::Tran, Direction::Vert];

    /// Canonical lowercase label
    pub fn label(self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Tran => "tran",
            Direction::Vert => "vert",
        }
    }

    /// Parse a direction from common labels
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "long" | "longitudinal" | "h1" | "horizontal-1" => Some(Direction::Long),
            "tran" | "transverse" | "h2" | "horizontal-2" => Some(Direction::Tran),
            "vert" | "vertical" | "up" | "z" => Some(Direction::Vert),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
