//! Line-chart rendering pipeline: configuration, keyed reconciliation,
//! animation and the path/marker/tracker passes.

mod animator;
pub mod class_names;
pub mod config;
pub mod line_chart;
pub mod overlays;
pub mod reconcile;

pub use class_names::{series_class_name, series_name_to_class};
pub use config::{
    AnimationConfig, AnimationDirection, AnimationOverrides, LineChartConfig, LineChartOverrides,
    MarkerConfig, MarkerOverrides, TooltipConfig, TooltipOverrides,
};
pub use line_chart::{LineChart, RenderReport};
pub use overlays::{OverlayKind, OverlayReport, TRACKER_RADIUS_PX, tracker_at};
pub use reconcile::{KeyedDiff, LayerDiffSummary, keyed_children, reconcile};
