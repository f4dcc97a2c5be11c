//! Co-located channel group keyed by direction.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::metadata::MetaData;
use super::series::TimeSeries;
use super::{Direction, Quantity};
use crate::constants::VERTICAL_AXIS_SENTINEL;
use crate::{Error, Result};

/// A set of [`TimeSeries`] recorded at one physical location, keyed by
/// [`Direction`]. The map key enforces at most one series per direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vector {
    components: BTreeMap<Direction, TimeSeries>,
    meta: MetaData,
}

impl Vector {
    pub fn new(meta: MetaData) -> Self {
        Self {
            components: BTreeMap::new(),
            meta,
        }
    }

    /// Insert a component, returning any series previously occupying the
    /// direction slot (the replacement is logged).
    pub fn insert(&mut self, direction: Direction, series: TimeSeries) -> Option<TimeSeries> {
        let previous = self.components.insert(direction, series);
        if previous.is_some() {
            warn!(direction = direction.label(), "replacing existing component");
        }
        previous
    }

    /// Builder-style insert
    pub fn with_component(mut self, direction: Direction, series: TimeSeries) -> Self {
        self.insert(direction, series);
        self
    }

    pub fn component(&self, direction: Direction) -> Option<&TimeSeries> {
        self.components.get(&direction)
    }

    /// The direction-keyed component map
    pub fn components(&self) -> &BTreeMap<Direction, TimeSeries> {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn meta(&self) -> &MetaData {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut MetaData {
        &mut self.meta
    }

    /// Stack one quantity across components into a 2-D array, one row per
    /// component in direction order. Computed on demand, never cached;
    /// components lacking the quantity are skipped. `None` when no component
    /// carries the quantity.
    pub fn stacked(&self, quantity: Quantity) -> Option<Vec<Vec<f64>>> {
        let rows: Vec<Vec<f64>> = self
            .components
            .values()
            .filter_map(|series| series.quantity(quantity).map(<[f64]>::to_vec))
            .collect();
        if rows.is_empty() { None } else { Some(rows) }
    }

    /// Stacked acceleration rows
    pub fn accel(&self) -> Option<Vec<Vec<f64>>> {
        self.stacked(Quantity::Accel)
    }

    /// Stacked velocity rows
    pub fn veloc(&self) -> Option<Vec<Vec<f64>>> {
        self.stacked(Quantity::Veloc)
    }

    /// Stacked displacement rows
    pub fn displ(&self) -> Option<Vec<Vec<f64>>> {
        self.stacked(Quantity::Displ)
    }

    /// Rotate the two horizontal components in place by `angle` radians.
    ///
    /// Applies the 2×2 rotation to every quantity present on both
    /// horizontals. The sign of the angle flips when `vert_axis` equals the
    /// legacy sentinel value 3, mirroring the handedness convention of the
    /// source processing tools. This mutates the owned component sequences;
    /// use [`Vector::rotated`] for a pure variant.
    ///
    /// Errors with a capability error naming the missing direction when
    /// either horizontal component is absent, and with a payload shape error
    /// when the two horizontals disagree on a quantity's length.
    pub fn rotate(&mut self, angle: f64, vert_axis: Option<i32>) -> Result<()> {
        let angle = if vert_axis == Some(VERTICAL_AXIS_SENTINEL) {
            -angle
        } else {
            angle
        };

        if !self.components.contains_key(&Direction::Long) {
            return Err(Error::capability("rotate", Direction::Long.label()));
        }
        if !self.components.contains_key(&Direction::Tran) {
            return Err(Error::capability("rotate", Direction::Tran.label()));
        }

        let (cos, sin) = (angle.cos(), angle.sin());
        let mut rotated: Vec<(Quantity, Vec<f64>, Vec<f64>)> = Vec::new();

        for quantity in Quantity::ALL {
            let long = self.components[&Direction::Long].quantity(quantity);
            let tran = self.components[&Direction::Tran].quantity(quantity);
            let (Some(x), Some(y)) = (long, tran) else {
                debug!(quantity = quantity.key(), "quantity absent from a horizontal; skipped");
                continue;
            };
            if x.len() != y.len() {
                return Err(Error::payload_shape(
                    self.meta.get_str("location").unwrap_or("<vector>"),
                    format!(
                        "horizontal components disagree on {} length: {} vs {}",
                        quantity.key(),
                        x.len(),
                        y.len()
                    ),
                ));
            }
            let new_x: Vec<f64> = x
                .iter()
                .zip(y)
                .map(|(x, y)| cos * x - sin * y)
                .collect();
            let new_y: Vec<f64> = x.iter().zip(y).map(|(x, y)| sin * x + cos * y).collect();
            rotated.push((quantity, new_x, new_y));
        }

        for (quantity, new_x, new_y) in rotated {
            if let Some(series) = self.components.get_mut(&Direction::Long) {
                series.set_quantity(quantity, new_x);
            }
            if let Some(series) = self.components.get_mut(&Direction::Tran) {
                series.set_quantity(quantity, new_y);
            }
        }
        Ok(())
    }

    /// Pure rotation: returns a rotated copy, leaving this vector untouched.
    pub fn rotated(&self, angle: f64, vert_axis: Option<i32>) -> Result<Vector> {
        let mut vector = self.clone();
        vector.rotate(angle, vert_axis)?;
        Ok(vector)
    }

    /// Per-quantity vector magnitude over whichever directional components
    /// are present: `sqrt(sum of squares)` sample by sample. Absent
    /// directions are excluded from the sum, not zero-filled. Components
    /// disagreeing on length contribute up to the shortest length (logged).
    pub fn resultant(&self) -> Result<TimeSeries> {
        let mut norms: [Option<Vec<f64>>; 3] = [None, None, None];

        for (slot, quantity) in Quantity::ALL.into_iter().enumerate() {
            let parts: Vec<&[f64]> = self
                .components
                .values()
                .filter_map(|series| series.quantity(quantity))
                .collect();
            if parts.is_empty() {
                continue;
            }

            let npts = parts.iter().map(|part| part.len()).min().unwrap_or(0);
            if parts.iter().any(|part| part.len() != npts) {
                warn!(
                    quantity = quantity.key(),
                    npts, "component lengths differ; resultant truncated to shortest"
                );
            }

            let norm = (0..npts)
                .map(|i| parts.iter().map(|part| part[i] * part[i]).sum::<f64>().sqrt())
                .collect();
            norms[slot] = Some(norm);
        }

        let [accel, veloc, displ] = norms;
        TimeSeries::new(accel, veloc, displ, self.meta.clone())
    }
}
