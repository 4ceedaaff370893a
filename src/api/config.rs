use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Easing;
use crate::error::{ChartError, ChartResult};

/// How entering paths animate when animations are enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum AnimationDirection {
    /// Progressive point-by-point reveal.
    #[default]
    LeftToRight,
    /// Rise from the y-axis minimum.
    BottomToTop,
    /// Any other configured value; animates like `BottomToTop`.
    Other(String),
}

impl AnimationDirection {
    #[must_use]
    pub fn reveals(&self) -> bool {
        matches!(self, Self::LeftToRight)
    }
}

impl From<String> for AnimationDirection {
    fn from(value: String) -> Self {
        match value.as_str() {
            "left-to-right" => Self::LeftToRight,
            "bottom-to-top" => Self::BottomToTop,
            _ => Self::Other(value),
        }
    }
}

impl From<AnimationDirection> for String {
    fn from(value: AnimationDirection) -> Self {
        match value {
            AnimationDirection::LeftToRight => "left-to-right".to_owned(),
            AnimationDirection::BottomToTop => "bottom-to-top".to_owned(),
            AnimationDirection::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub enable: bool,
    /// Dot radius in pixels.
    pub size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    pub enable: bool,
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
}

impl AnimationConfig {
    #[must_use]
    pub fn duration(self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipConfig {
    pub enable: bool,
}

/// Line renderer options.
///
/// `Default` carries the library defaults; callers layer their own options
/// on top with [`LineChartConfig::merged`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartConfig {
    /// Stack series on top of each other in declaration order.
    pub stacked: bool,
    /// Draw cardinal splines instead of straight segments.
    pub smooth: bool,
    pub animation_direction: AnimationDirection,
    pub marker: MarkerConfig,
    pub animations: AnimationConfig,
    /// Tracker overlays are only built when the tooltip collaborator is on.
    pub tooltip: TooltipConfig,
    /// Baseline that bottom-to-top entering paths rise from; `0` when unset.
    pub y_axis_min: Option<f64>,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            stacked: false,
            smooth: false,
            animation_direction: AnimationDirection::LeftToRight,
            marker: MarkerConfig {
                enable: true,
                size: 3.0,
            },
            animations: AnimationConfig {
                enable: true,
                duration_ms: 400,
                easing: Easing::CubicInOut,
            },
            tooltip: TooltipConfig { enable: false },
            y_axis_min: None,
        }
    }
}

impl LineChartConfig {
    /// Returns a new config with every set field of `overrides` applied.
    #[must_use]
    pub fn merged(&self, overrides: &LineChartOverrides) -> Self {
        let mut merged = self.clone();
        if let Some(stacked) = overrides.stacked {
            merged.stacked = stacked;
        }
        if let Some(smooth) = overrides.smooth {
            merged.smooth = smooth;
        }
        if let Some(direction) = &overrides.animation_direction {
            merged.animation_direction = direction.clone();
        }
        if let Some(marker) = &overrides.marker {
            merged.marker.enable = marker.enable.unwrap_or(merged.marker.enable);
            merged.marker.size = marker.size.unwrap_or(merged.marker.size);
        }
        if let Some(animations) = &overrides.animations {
            merged.animations.enable = animations.enable.unwrap_or(merged.animations.enable);
            merged.animations.duration_ms =
                animations.duration.unwrap_or(merged.animations.duration_ms);
            merged.animations.easing = animations.easing.unwrap_or(merged.animations.easing);
        }
        if let Some(tooltip) = &overrides.tooltip {
            merged.tooltip.enable = tooltip.enable.unwrap_or(merged.tooltip.enable);
        }
        if overrides.y_axis_min.is_some() {
            merged.y_axis_min = overrides.y_axis_min;
        }
        merged
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.marker.size.is_finite() || self.marker.size < 0.0 {
            return Err(ChartError::InvalidConfig(
                "marker size must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(min) = self.y_axis_min {
            if !min.is_finite() {
                return Err(ChartError::InvalidConfig(
                    "y axis min must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn should_animate(&self) -> bool {
        self.animations.enable
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MarkerOverrides {
    pub enable: Option<bool>,
    pub size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AnimationOverrides {
    pub enable: Option<bool>,
    /// Milliseconds.
    pub duration: Option<u64>,
    pub easing: Option<Easing>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TooltipOverrides {
    pub enable: Option<bool>,
}

/// Caller-supplied partial options, merged over the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineChartOverrides {
    pub stacked: Option<bool>,
    pub smooth: Option<bool>,
    pub animation_direction: Option<AnimationDirection>,
    pub marker: Option<MarkerOverrides>,
    pub animations: Option<AnimationOverrides>,
    pub tooltip: Option<TooltipOverrides>,
    pub y_axis_min: Option<f64>,
}

impl LineChartOverrides {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse line chart options: {e}"))
        })
    }
}
