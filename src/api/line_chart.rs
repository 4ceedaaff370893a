use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    Cartesian, CoordinateMapper, Curve, PathGeometry, SMOOTH_TENSION, Series, normalize_series,
    stack_series, validate_series_set,
};
use crate::error::{ChartError, ChartResult};
use crate::scene::{Datum, DatumKey, NodeId, NodeKind, SceneGraph};

use super::LineChartConfig;
use super::animator::Animator;
use super::class_names::series_class_name;
use super::config::LineChartOverrides;
use super::overlays::{OverlayKind, OverlayPass, OverlayReport, TRACKER_RADIUS_PX};
use super::reconcile::{LayerDiffSummary, keyed_children, reconcile};

const SERIES_TOKEN: &str = "series";
const LINE_TOKEN: &str = "line";

/// A normalized series with its pixel geometry, ready to be joined.
///
/// `geometry.vertices[i]` is the mapped position of `series.data[i]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PreparedSeries {
    pub series: Series,
    pub index: usize,
    pub geometry: PathGeometry,
}

impl PreparedSeries {
    pub(crate) fn datum(&self) -> Datum {
        Datum::Series {
            name: self.series.name.clone(),
            index: self.index,
        }
    }
}

/// Reconciliation counts of one render call, per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RenderReport {
    pub series: LayerDiffSummary,
    pub markers: OverlayReport,
    pub trackers: OverlayReport,
    pub animated: bool,
}

/// Line-chart renderer.
///
/// Holds only configuration; all visual state lives in the [`SceneGraph`],
/// so re-rendering into the same layer updates it in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineChart {
    config: LineChartConfig,
}

impl LineChart {
    #[must_use]
    pub fn new(config: LineChartConfig) -> Self {
        Self { config }
    }

    /// Library defaults with `overrides` layered on top.
    #[must_use]
    pub fn with_overrides(overrides: &LineChartOverrides) -> Self {
        Self::new(LineChartConfig::default().merged(overrides))
    }

    #[must_use]
    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LineChartConfig) {
        self.config = config;
    }

    /// Draws `data` into `layer`, reconciling against what earlier calls drew.
    ///
    /// Preconditions and data errors are reported before the scene is touched.
    /// Animated writes are scheduled on the scene; drive them with
    /// [`SceneGraph::advance`].
    pub fn render(
        &self,
        data: &[Series],
        scene: &mut SceneGraph,
        layer: NodeId,
        cartesian: &Cartesian,
    ) -> ChartResult<RenderReport> {
        let scales = cartesian.require()?;
        self.config.validate()?;
        if !scene.is_live(layer) {
            return Err(ChartError::StaleNode(layer));
        }
        validate_series_set(data)?;

        let mapper = CoordinateMapper::new(scales);
        let prepared = self.prepare(data, &mapper)?;
        let baseline_y = mapper.map_y_value(self.config.y_axis_min.unwrap_or(0.0));
        let animator = Animator::new(&self.config, baseline_y);

        let series = render_paths(scene, layer, &prepared, animator)?;

        let markers = OverlayPass {
            kind: OverlayKind::Markers,
            radius: self.config.marker.size,
            animator,
        }
        .run(
            scene,
            layer,
            if self.config.marker.enable {
                &prepared[..]
            } else {
                &[]
            },
        )?;

        let trackers = OverlayPass {
            kind: OverlayKind::Trackers,
            radius: TRACKER_RADIUS_PX,
            animator,
        }
        .run(
            scene,
            layer,
            if self.config.tooltip.enable {
                &prepared[..]
            } else {
                &[]
            },
        )?;

        Ok(RenderReport {
            series,
            markers,
            trackers,
            animated: self.config.should_animate(),
        })
    }

    fn prepare(
        &self,
        data: &[Series],
        mapper: &CoordinateMapper<'_>,
    ) -> ChartResult<Vec<PreparedSeries>> {
        let mut normalized = normalize_series(data, mapper)?;
        if self.config.stacked {
            normalized = stack_series(normalized)?;
        }
        let curve = if self.config.smooth {
            Curve::Cardinal {
                tension: SMOOTH_TENSION,
            }
        } else {
            Curve::Linear
        };

        normalized
            .into_iter()
            .enumerate()
            .map(|(index, series)| {
                let vertices = mapper.map_points(&series.data)?;
                Ok(PreparedSeries {
                    series,
                    index,
                    geometry: PathGeometry::new(vertices, curve),
                })
            })
            .collect()
    }

    /// Names of live, non-exiting series groups in `layer`, in scene order.
    #[must_use]
    pub fn series_keys(scene: &SceneGraph, layer: NodeId) -> Vec<String> {
        keyed_children(scene, layer, SERIES_TOKEN)
            .into_iter()
            .filter(|(_, id)| !scene.is_pending_removal(*id))
            .filter_map(|(key, _)| match key {
                DatumKey::Series(name) => Some(name),
                DatumKey::Point(_) => None,
            })
            .collect()
    }

    /// Group node drawn for `name` in the path layer.
    ///
    /// Unlike [`LineChart::series_keys`], a group still fading out is returned.
    #[must_use]
    pub fn series_group(scene: &SceneGraph, layer: NodeId, name: &str) -> Option<NodeId> {
        keyed_children(scene, layer, SERIES_TOKEN)
            .into_iter()
            .find(|(key, _)| matches!(key, DatumKey::Series(n) if n == name))
            .map(|(_, id)| id)
    }

    /// Path node of `name`.
    #[must_use]
    pub fn series_path(scene: &SceneGraph, layer: NodeId, name: &str) -> Option<NodeId> {
        let group = Self::series_group(scene, layer, name)?;
        scene.select_role(group, LINE_TOKEN).first().copied()
    }

    /// Overlay group of `name` for `kind`, including one still fading out.
    #[must_use]
    pub fn overlay_group(
        scene: &SceneGraph,
        layer: NodeId,
        kind: OverlayKind,
        name: &str,
    ) -> Option<NodeId> {
        keyed_children(scene, layer, kind.group_token())
            .into_iter()
            .find(|(key, _)| matches!(key, DatumKey::Series(n) if n == name))
            .map(|(_, id)| id)
    }

    /// Dot nodes of `name` for `kind`, excluding ones pending removal.
    #[must_use]
    pub fn overlay_dots(
        scene: &SceneGraph,
        layer: NodeId,
        kind: OverlayKind,
        name: &str,
    ) -> Vec<NodeId> {
        Self::overlay_group(scene, layer, kind, name)
            .map(|group| {
                scene
                    .select_role(group, kind.dot_token())
                    .into_iter()
                    .filter(|id| !scene.is_pending_removal(*id))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn render_paths(
    scene: &mut SceneGraph,
    layer: NodeId,
    prepared: &[PreparedSeries],
    animator: Animator<'_>,
) -> ChartResult<LayerDiffSummary> {
    let existing = keyed_children(scene, layer, SERIES_TOKEN);
    let diff = reconcile(&existing, prepared, |item| {
        DatumKey::Series(item.series.name.clone())
    })?;

    for (_, index, group) in &diff.updating {
        let item = &prepared[*index];
        scene.set_class(*group, series_class_name("series", item.index, &item.series.name))?;
        scene.set_datum(*group, item.datum())?;
        animator.keep_group(scene, *group)?;
        match scene.select_role(*group, LINE_TOKEN).first().copied() {
            Some(path) => animator.update_path(scene, path, item.geometry.clone())?,
            None => {
                let path = scene.append(*group, NodeKind::Path, LINE_TOKEN)?;
                animator.enter_path(scene, path, item.geometry.clone())?;
            }
        }
    }

    for (_, index) in &diff.entering {
        let item = &prepared[*index];
        let group = scene.append(
            layer,
            NodeKind::Group,
            series_class_name("series", item.index, &item.series.name),
        )?;
        scene.set_datum(group, item.datum())?;
        let path = scene.append(group, NodeKind::Path, LINE_TOKEN)?;
        animator.enter_path(scene, path, item.geometry.clone())?;
    }

    for (_, group) in &diff.exiting {
        animator.exit(scene, *group)?;
    }

    let summary = diff.summary();
    debug!(
        entering = summary.entering,
        updating = summary.updating,
        exiting = summary.exiting,
        "reconciled path layer"
    );
    Ok(summary)
}
