//! Single-channel time series.

use tracing::{debug, warn};

use super::metadata::MetaData;
use super::Quantity;
use crate::{Error, Result};

/// One physical channel's motion data: up to three numeric sequences
/// (acceleration, velocity, displacement) plus metadata.
///
/// Normal construction requires at least one sequence. The metadata-only
/// form produced by summarize-mode parsing is built with
/// [`TimeSeries::summary`] and carries no sequences and no sample count.
///
/// Present sequences of differing lengths are tolerated: the series is
/// flagged [`ragged`](TimeSeries::ragged) and `npts` reports the first
/// present sequence's length.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    accel: Option<Vec<f64>>,
    veloc: Option<Vec<f64>>,
    displ: Option<Vec<f64>>,
    npts: Option<usize>,
    time_step: Option<f64>,
    time_zero: Option<f64>,
    ragged: bool,
    int_header: Vec<i64>,
    real_header: Vec<f64>,
    meta: MetaData,
}

impl TimeSeries {
    /// Create a series from decoded sequences and metadata.
    ///
    /// Errors if all three sequences are absent. The time step is pulled
    /// from the `time_step` metadata entry when present.
    pub fn new(
        accel: Option<Vec<f64>>,
        veloc: Option<Vec<f64>>,
        displ: Option<Vec<f64>>,
        meta: MetaData,
    ) -> Result<Self> {
        if accel.is_none() && veloc.is_none() && displ.is_none() {
            return Err(Error::data_validation(
                "a time series requires at least one of accel, veloc or displ",
            ));
        }

        let time_step = meta.get_f64("time_step");
        let mut series = Self {
            accel,
            veloc,
            displ,
            npts: None,
            time_step,
            time_zero: None,
            ragged: false,
            int_header: Vec::new(),
            real_header: Vec::new(),
            meta,
        };
        series.refresh_npts();
        Ok(series)
    }

    /// Create a metadata-only series (summarize mode); all sequences unset.
    pub fn summary(meta: MetaData) -> Self {
        let time_step = meta.get_f64("time_step");
        Self {
            accel: None,
            veloc: None,
            displ: None,
            npts: None,
            time_step,
            time_zero: None,
            ragged: false,
            int_header: Vec::new(),
            real_header: Vec::new(),
            meta,
        }
    }

    /// Recompute sample count and the ragged flag from present sequences.
    fn refresh_npts(&mut self) {
        self.npts = None;
        self.ragged = false;
        for data in [&self.accel, &self.veloc, &self.displ].into_iter().flatten() {
            match self.npts {
                None => self.npts = Some(data.len()),
                Some(npts) if npts != data.len() => {
                    self.ragged = true;
                    warn!(
                        file = self.meta.get_str("file_name").unwrap_or("<unknown>"),
                        expected = npts,
                        found = data.len(),
                        "sequence lengths differ within one series"
                    );
                }
                Some(_) => {}
            }
        }
    }

    pub fn accel(&self) -> Option<&[f64]> {
        self.accel.as_deref()
    }

    pub fn veloc(&self) -> Option<&[f64]> {
        self.veloc.as_deref()
    }

    pub fn displ(&self) -> Option<&[f64]> {
        self.displ.as_deref()
    }

    /// The sequence for one quantity
    pub fn quantity(&self, quantity: Quantity) -> Option<&[f64]> {
        match quantity {
            Quantity::Accel => self.accel(),
            Quantity::Veloc => self.veloc(),
            Quantity::Displ => self.displ(),
        }
    }

    /// Replace the sequence for one quantity.
    pub(crate) fn set_quantity(&mut self, quantity: Quantity, data: Vec<f64>) {
        match quantity {
            Quantity::Accel => self.accel = Some(data),
            Quantity::Veloc => self.veloc = Some(data),
            Quantity::Displ => self.displ = Some(data),
        }
        self.refresh_npts();
    }

    /// Sample count; `None` for metadata-only series
    pub fn npts(&self) -> Option<usize> {
        self.npts
    }

    /// True when present sequences disagree on length
    pub fn ragged(&self) -> bool {
        self.ragged
    }

    pub fn time_step(&self) -> Option<f64> {
        self.time_step
    }

    pub fn set_time_step(&mut self, time_step: f64) {
        self.time_step = Some(time_step);
    }

    pub fn time_zero(&self) -> Option<f64> {
        self.time_zero
    }

    pub fn set_time_zero(&mut self, time_zero: f64) {
        self.time_zero = Some(time_zero);
    }

    /// Materialize the time axis.
    ///
    /// Missing start time defaults to 0.0 and a missing time step defaults
    /// to 1.0; both defaults are logged since they usually mean the source
    /// header lacked a sampling declaration.
    pub fn time(&self) -> Vec<f64> {
        let npts = self.npts.unwrap_or(0);
        let t0 = match self.time_zero {
            Some(t0) => t0,
            None => {
                debug!("no time_zero set; time axis starts at 0.0 s");
                0.0
            }
        };
        let dt = match self.time_step {
            Some(dt) => dt,
            None => {
                debug!("no time_step set; time axis uses 1.0 s sampling");
                1.0
            }
        };
        (0..npts).map(|i| t0 + dt * i as f64).collect()
    }

    /// Raw integer header block retained from the source file
    pub fn int_header(&self) -> &[i64] {
        &self.int_header
    }

    /// Raw real header block retained from the source file
    pub fn real_header(&self) -> &[f64] {
        &self.real_header
    }

    /// Attach the raw numeric header blocks decoded from the source file.
    /// Most positions are uninterpreted; they are kept verbatim for
    /// debugging and forward compatibility.
    pub(crate) fn set_headers(&mut self, int_header: Vec<i64>, real_header: Vec<f64>) {
        self.int_header = int_header;
        self.real_header = real_header;
    }

    pub fn meta(&self) -> &MetaData {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut MetaData {
        &mut self.meta
    }

    /// Source file name, when recorded
    pub fn file_name(&self) -> Option<&str> {
        self.meta.get_str("file_name")
    }

    /// Station channel identifier, when recorded
    pub fn station_channel(&self) -> Option<&str> {
        self.meta.get_str("station_channel")
    }

    /// Component orientation label, when recorded
    pub fn component(&self) -> Option<&str> {
        self.meta.get_str("component")
    }

    /// Location label, when recorded
    pub fn location(&self) -> Option<&str> {
        self.meta.get_str("location")
    }

    /// Merge another series into this one, overwriting only the quantities
    /// present on the incoming series. Overwriting an already-populated
    /// quantity is logged, not an error. Incoming metadata entries replace
    /// existing ones on key collision.
    pub(crate) fn merge_from(&mut self, other: TimeSeries) {
        let file = other
            .meta
            .get_str("file_name")
            .unwrap_or("<unknown>")
            .to_string();
        let TimeSeries {
            accel,
            veloc,
            displ,
            meta,
            time_step,
            time_zero,
            int_header,
            real_header,
            ..
        } = other;

        for (quantity, data) in [
            (Quantity::Accel, accel),
            (Quantity::Veloc, veloc),
            (Quantity::Displ, displ),
        ] {
            if let Some(data) = data {
                if self.quantity(quantity).is_some() {
                    warn!(
                        file = file.as_str(),
                        quantity = quantity.key(),
                        "overwriting populated quantity during consolidation"
                    );
                }
                self.set_quantity(quantity, data);
            }
        }

        if let Some(dt) = time_step {
            self.time_step = Some(dt);
        }
        if let Some(t0) = time_zero {
            self.time_zero = Some(t0);
        }
        if !int_header.is_empty() {
            self.int_header = int_header;
        }
        if !real_header.is_empty() {
            self.real_header = real_header;
        }
        self.meta.update(meta.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}
