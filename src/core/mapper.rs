use serde::{Deserialize, Serialize};

use crate::core::scale::CartesianScales;
use crate::core::types::{DomainValue, Point};
use crate::error::{ChartError, ChartResult};

/// Half a device pixel; aligns one-pixel strokes on the pixel grid.
const CRISP_OFFSET_PX: f64 = 0.5;

/// Pixel-space vertex of a path or marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Maps logical points into pixel space for the current scale configuration.
///
/// x is centered within its band; y includes the stacking baseline so stacked
/// and unstacked series share one mapping.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper<'a> {
    scales: CartesianScales<'a>,
    band_width: f64,
}

impl<'a> CoordinateMapper<'a> {
    #[must_use]
    pub fn new(scales: CartesianScales<'a>) -> Self {
        Self {
            band_width: scales.x.range_band(),
            scales,
        }
    }

    pub fn map_x_value(&self, x: &DomainValue) -> ChartResult<f64> {
        Ok(self.scales.x.map(x)? + self.band_width / 2.0 + CRISP_OFFSET_PX)
    }

    pub fn map_x(&self, point: &Point) -> ChartResult<f64> {
        self.map_x_value(&point.x)
    }

    pub fn map_y(&self, point: &Point) -> ChartResult<f64> {
        let y = point.stacked_y().ok_or_else(|| {
            ChartError::InvalidData(format!("cannot map gap point at x={}", point.x))
        })?;
        Ok(self.map_y_value(y))
    }

    /// Maps a raw domain value on the y axis, with no stacking baseline.
    #[must_use]
    pub fn map_y_value(&self, value: f64) -> f64 {
        self.scales.y.map(value) + CRISP_OFFSET_PX
    }

    pub fn map_point(&self, point: &Point) -> ChartResult<Vertex> {
        Ok(Vertex::new(self.map_x(point)?, self.map_y(point)?))
    }

    pub fn map_points(&self, points: &[Point]) -> ChartResult<Vec<Vertex>> {
        points.iter().map(|point| self.map_point(point)).collect()
    }
}
