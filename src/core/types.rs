use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Logical x value of a point: numeric (linear/time axes) or categorical.
///
/// Hashable and totally ordered so it can serve as a reconciliation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainValue {
    Number(OrderedFloat<f64>),
    Category(String),
}

impl DomainValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value.into_inner()),
            Self::Category(_) => None,
        }
    }

    #[must_use]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Category(name) => Some(name),
        }
    }
}

impl From<f64> for DomainValue {
    fn from(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }
}

impl From<i32> for DomainValue {
    fn from(value: i32) -> Self {
        Self::Number(OrderedFloat(f64::from(value)))
    }
}

impl From<&str> for DomainValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_owned())
    }
}

impl From<String> for DomainValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

impl fmt::Display for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Category(name) => f.write_str(name),
        }
    }
}

/// One sample of a series.
///
/// `y == None` marks a gap. `y0` is the stacking baseline and is only ever
/// written by the stacking layout; callers leave it at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: DomainValue,
    pub y: Option<f64>,
    #[serde(default)]
    pub y0: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: impl Into<DomainValue>, y: f64) -> Self {
        Self {
            x: x.into(),
            y: Some(y),
            y0: 0.0,
        }
    }

    /// A point with no value at `x`.
    #[must_use]
    pub fn gap(x: impl Into<DomainValue>) -> Self {
        Self {
            x: x.into(),
            y: None,
            y0: 0.0,
        }
    }

    #[must_use]
    pub fn with_optional_y(x: impl Into<DomainValue>, y: Option<f64>) -> Self {
        Self {
            x: x.into(),
            y,
            y0: 0.0,
        }
    }

    /// Point on a time axis; x is stored as unix seconds with millisecond precision.
    #[must_use]
    pub fn at_time(time: DateTime<Utc>, y: f64) -> Self {
        Self::new(time.timestamp_millis() as f64 / 1000.0, y)
    }

    pub fn from_decimal(x: impl Into<DomainValue>, y: Decimal) -> ChartResult<Self> {
        let y = y.to_f64().ok_or_else(|| {
            ChartError::InvalidData(format!("point value {y} cannot be represented as f64"))
        })?;
        Ok(Self::new(x, y))
    }

    /// Stacked top of the point (`y + y0`), `None` for gaps.
    #[must_use]
    pub fn stacked_y(&self) -> Option<f64> {
        self.y.map(|y| y + self.y0)
    }

    fn validate(&self, series: &str) -> ChartResult<()> {
        if let DomainValue::Number(x) = &self.x {
            if !x.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "series `{series}` has a non-finite x value"
                )));
            }
        }
        if let Some(y) = self.y {
            if !y.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "series `{series}` has a non-finite y value at x={}",
                    self.x
                )));
            }
        }
        Ok(())
    }
}

/// A named line. `name` is the reconciliation key of the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<Point>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, data: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Convenience constructor for numeric x values `0..values.len()`.
    #[must_use]
    pub fn from_values(name: impl Into<String>, values: &[f64]) -> Self {
        let data = values
            .iter()
            .enumerate()
            .map(|(index, value)| Point::new(index as f64, *value))
            .collect();
        Self::new(name, data)
    }

    /// Rejects non-finite values and repeated x values.
    pub fn validate(&self) -> ChartResult<()> {
        let mut seen: IndexSet<&DomainValue> = IndexSet::with_capacity(self.data.len());
        for point in &self.data {
            point.validate(&self.name)?;
            if !seen.insert(&point.x) {
                return Err(ChartError::InvalidData(format!(
                    "series `{}` has more than one point at x={}",
                    self.name, point.x
                )));
            }
        }
        Ok(())
    }
}

/// Rejects series collections that would break the one-node-per-key contract.
pub fn validate_series_set(series: &[Series]) -> ChartResult<()> {
    let mut seen = IndexSet::with_capacity(series.len());
    for item in series {
        if !seen.insert(item.name.as_str()) {
            return Err(ChartError::InvalidData(format!(
                "duplicate series name `{}`",
                item.name
            )));
        }
        item.validate()?;
    }
    Ok(())
}
