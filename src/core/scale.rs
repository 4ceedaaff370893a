use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::types::DomainValue;
use crate::error::{ChartError, ChartResult};

/// Continuous mapping from a numeric domain onto a pixel range.
///
/// The range may be inverted (`range_start > range_end`), which is the usual
/// setup for y axes where larger values sit higher on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

/// Categorical scale splitting a pixel range into equal bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    categories: IndexSet<String>,
    range_start: f64,
    step: f64,
    band_width: f64,
}

impl BandScale {
    /// `padding` is the fraction of each step left empty, split evenly around the band.
    pub fn new<I, S>(categories: I, range: (f64, f64), padding: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: IndexSet<String> = categories.into_iter().map(Into::into).collect();
        if categories.is_empty() {
            return Err(ChartError::InvalidData(
                "band scale needs at least one category".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() || range.1 <= range.0 {
            return Err(ChartError::InvalidData(
                "band scale range must be finite and increasing".to_owned(),
            ));
        }
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidData(
                "band scale padding must be in [0, 1)".to_owned(),
            ));
        }

        let step = (range.1 - range.0) / categories.len() as f64;
        let band_width = step * (1.0 - padding);
        Ok(Self {
            categories,
            range_start: range.0 + (step - band_width) / 2.0,
            step,
            band_width,
        })
    }

    #[must_use]
    pub fn range_band(&self) -> f64 {
        self.band_width
    }

    /// Left edge of the band holding `category`.
    pub fn map(&self, category: &str) -> ChartResult<f64> {
        let index = self.categories.get_index_of(category).ok_or_else(|| {
            ChartError::InvalidData(format!("category `{category}` is not in the band domain"))
        })?;
        Ok(self.range_start + index as f64 * self.step)
    }
}

/// Horizontal scale accepted by the line renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XScale {
    Linear(LinearScale),
    Band(BandScale),
}

impl XScale {
    #[must_use]
    pub fn range_band(&self) -> f64 {
        match self {
            Self::Linear(_) => 0.0,
            Self::Band(band) => band.range_band(),
        }
    }

    pub fn map(&self, value: &DomainValue) -> ChartResult<f64> {
        match (self, value) {
            (Self::Linear(scale), DomainValue::Number(x)) => Ok(scale.map(x.into_inner())),
            (Self::Band(scale), DomainValue::Category(name)) => scale.map(name),
            (Self::Linear(_), DomainValue::Category(name)) => Err(ChartError::InvalidData(
                format!("linear x scale cannot map category `{name}`"),
            )),
            (Self::Band(_), DomainValue::Number(x)) => Err(ChartError::InvalidData(format!(
                "band x scale cannot map number {x}"
            ))),
        }
    }
}

/// Scale bundle produced by the cartesian collaborator.
///
/// Both scales are optional so a partially configured chart can be detected
/// up front instead of failing halfway through a draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cartesian {
    pub x_scale: Option<XScale>,
    pub y_scale: Option<LinearScale>,
}

/// Borrowed view of a fully configured [`Cartesian`].
#[derive(Debug, Clone, Copy)]
pub struct CartesianScales<'a> {
    pub x: &'a XScale,
    pub y: LinearScale,
}

impl Cartesian {
    #[must_use]
    pub fn new(x_scale: XScale, y_scale: LinearScale) -> Self {
        Self {
            x_scale: Some(x_scale),
            y_scale: Some(y_scale),
        }
    }

    pub fn require(&self) -> ChartResult<CartesianScales<'_>> {
        let x = self
            .x_scale
            .as_ref()
            .ok_or(ChartError::MissingCollaborator {
                capability: "cartesian x scale",
            })?;
        let y = self.y_scale.ok_or(ChartError::MissingCollaborator {
            capability: "cartesian y scale",
        })?;
        Ok(CartesianScales { x, y })
    }
}
