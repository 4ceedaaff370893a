//! linechart-rs: keyed, animated line-chart rendering onto a persistent scene graph.
//!
//! A [`LineChart`] turns caller-owned series into path, marker and tooltip
//! tracker nodes inside a [`SceneGraph`] layer. Re-rendering into the same
//! layer diffs by series name and point x, so only the marks that changed are
//! created, updated or removed, optionally through timed transitions.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{LineChart, LineChartConfig, LineChartOverrides, RenderReport};
pub use error::{ChartError, ChartResult};
pub use scene::SceneGraph;
