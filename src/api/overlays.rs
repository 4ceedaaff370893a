use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Point, Vertex};
use crate::error::ChartResult;
use crate::scene::{AnimationPhase, Attr, Datum, DatumKey, NodeId, NodeKind, SceneGraph};

use super::animator::Animator;
use super::class_names::series_class_name;
use super::line_chart::PreparedSeries;
use super::reconcile::{LayerDiffSummary, keyed_children, reconcile};

/// Hit radius of tooltip trackers. Not configurable.
pub const TRACKER_RADIUS_PX: f64 = 10.0;

/// Per-point overlay layers sharing the path layer's keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayKind {
    /// Visible dots on every point.
    Markers,
    /// Invisible, larger hit targets for the tooltip collaborator.
    Trackers,
}

impl OverlayKind {
    #[must_use]
    pub const fn group_token(self) -> &'static str {
        match self {
            Self::Markers => "line-chart-markers",
            Self::Trackers => "tooltip-trackers",
        }
    }

    #[must_use]
    pub const fn dot_token(self) -> &'static str {
        match self {
            Self::Markers => "dot",
            Self::Trackers => "tooltip-tracker",
        }
    }

    fn group_class(self, index: usize, name: &str) -> String {
        match self {
            Self::Markers => series_class_name("line-chart-markers markers", index, name),
            Self::Trackers => format!("tooltip-trackers s-{}", index + 1),
        }
    }
}

/// Reconciliation counts of one overlay: series groups and their dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OverlayReport {
    pub groups: LayerDiffSummary,
    pub dots: LayerDiffSummary,
}

pub(crate) struct OverlayPass<'a> {
    pub kind: OverlayKind,
    pub radius: f64,
    pub animator: Animator<'a>,
}

impl OverlayPass<'_> {
    /// Runs the group-by-name then dot-by-x join for one overlay layer.
    ///
    /// With `series` empty every group exits; dots of an exiting group go
    /// with it.
    pub(crate) fn run(
        &self,
        scene: &mut SceneGraph,
        layer: NodeId,
        series: &[PreparedSeries],
    ) -> ChartResult<OverlayReport> {
        let existing = keyed_children(scene, layer, self.kind.group_token());
        let groups = reconcile(&existing, series, |item| {
            DatumKey::Series(item.series.name.clone())
        })?;

        let mut targets = Vec::with_capacity(series.len());
        for (_, index, group) in &groups.updating {
            let item = &series[*index];
            scene.set_class(*group, self.kind.group_class(item.index, &item.series.name))?;
            scene.set_datum(*group, item.datum())?;
            self.animator.keep_group(scene, *group)?;
            targets.push((*group, item));
        }
        for (_, index) in &groups.entering {
            let item = &series[*index];
            let group = scene.append(
                layer,
                NodeKind::Group,
                self.kind.group_class(item.index, &item.series.name),
            )?;
            scene.set_datum(group, item.datum())?;
            targets.push((group, item));
        }
        for (_, group) in &groups.exiting {
            self.remove(scene, *group)?;
        }

        let mut dots = LayerDiffSummary::default();
        for (group, item) in targets {
            dots = dots.merge(self.run_dots(scene, group, item)?);
        }

        let report = OverlayReport {
            groups: groups.summary(),
            dots,
        };
        debug!(
            overlay = ?self.kind,
            group_entering = report.groups.entering,
            group_updating = report.groups.updating,
            group_exiting = report.groups.exiting,
            dot_entering = report.dots.entering,
            dot_updating = report.dots.updating,
            dot_exiting = report.dots.exiting,
            "reconciled overlay layer"
        );
        Ok(report)
    }

    fn run_dots(
        &self,
        scene: &mut SceneGraph,
        group: NodeId,
        item: &PreparedSeries,
    ) -> ChartResult<LayerDiffSummary> {
        let existing = keyed_children(scene, group, self.kind.dot_token());
        let diff = reconcile(&existing, &item.series.data, |point| {
            DatumKey::Point(point.x.clone())
        })?;

        for (_, index, dot) in &diff.updating {
            self.write_dot(scene, *dot, item, *index, false)?;
        }
        for (_, index) in &diff.entering {
            let dot = scene.append(group, NodeKind::Circle, self.kind.dot_token())?;
            scene.set_number(dot, Attr::Opacity, 0.0)?;
            self.write_dot(scene, dot, item, *index, true)?;
        }
        for (_, dot) in &diff.exiting {
            self.remove(scene, *dot)?;
        }
        Ok(diff.summary())
    }

    fn write_dot(
        &self,
        scene: &mut SceneGraph,
        dot: NodeId,
        item: &PreparedSeries,
        index: usize,
        entering: bool,
    ) -> ChartResult<()> {
        let at = item.geometry.vertices[index];
        scene.set_datum(
            dot,
            Datum::Point {
                series: item.series.name.clone(),
                point: item.series.data[index].clone(),
            },
        )?;
        scene.set_number(dot, Attr::Radius, self.radius)?;

        match self.kind {
            OverlayKind::Markers => self.animator.show_dot(scene, dot, at, entering),
            OverlayKind::Trackers => {
                scene.set_number(dot, Attr::CenterX, at.x)?;
                scene.set_number(dot, Attr::CenterY, at.y)?;
                scene.set_phase(
                    dot,
                    if entering {
                        AnimationPhase::Revealed
                    } else {
                        AnimationPhase::Stable
                    },
                )
            }
        }
    }

    /// Trackers are hit targets, so stale ones go at once; markers fade out.
    fn remove(&self, scene: &mut SceneGraph, node: NodeId) -> ChartResult<()> {
        match self.kind {
            OverlayKind::Markers => self.animator.exit(scene, node),
            OverlayKind::Trackers => {
                scene.remove(node);
                Ok(())
            }
        }
    }
}

/// Bound `(series, point)` of the tracker nearest to `at` whose circle contains it.
#[must_use]
pub fn tracker_at(scene: &SceneGraph, layer: NodeId, at: Vertex) -> Option<(String, Point)> {
    let kind = OverlayKind::Trackers;
    let mut best: Option<(f64, &Datum)> = None;
    for group in scene.select_role(layer, kind.group_token()) {
        for dot in scene.select_role(group, kind.dot_token()) {
            let Some(node) = scene.node(dot) else {
                continue;
            };
            let (Some(cx), Some(cy), Some(datum)) = (
                node.number(Attr::CenterX),
                node.number(Attr::CenterY),
                node.datum(),
            ) else {
                continue;
            };
            let distance = (cx - at.x).hypot(cy - at.y);
            let radius = node.number(Attr::Radius).unwrap_or(TRACKER_RADIUS_PX);
            if distance <= radius && best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, datum));
            }
        }
    }

    match best {
        Some((_, Datum::Point { series, point })) => Some((series.clone(), point.clone())),
        _ => None,
    }
}
