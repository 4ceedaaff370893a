use crate::core::PathGeometry;
use crate::error::{ChartError, ChartResult};

/// Draw command for one stroked path in pixel space.
///
/// `class` is the space-separated class list of the path and its ancestors,
/// which backends map onto their own styling.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub geometry: PathGeometry,
    pub class: String,
    pub opacity: f64,
}

impl PathPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if self
            .geometry
            .vertices
            .iter()
            .any(|v| !v.x.is_finite() || !v.y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "path vertices must be finite".to_owned(),
            ));
        }
        validate_opacity(self.opacity)
    }
}

/// Draw command for one filled circle in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub class: String,
    pub opacity: f64,
}

impl CirclePrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(ChartError::InvalidData(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        validate_opacity(self.opacity)
    }
}

fn validate_opacity(opacity: f64) -> ChartResult<()> {
    if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
        return Err(ChartError::InvalidData(
            "opacity must be finite and in [0, 1]".to_owned(),
        ));
    }
    Ok(())
}
