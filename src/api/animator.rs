use tracing::trace;

use crate::core::{PathGeometry, Vertex, reveal_vertices};
use crate::error::ChartResult;
use crate::scene::{
    AnimationPhase, Attr, AttrValue, NodeId, SceneGraph, Transition, TransitionEnd, TweenTarget,
};

use super::LineChartConfig;

/// Applies enter/update/exit writes for one render, immediately or as transitions.
///
/// Paths: `Idle -> Entering -> Revealed` for new lines and
/// `Idle -> Updating -> Stable` for existing ones. Without animation every
/// write is immediate and nodes land directly in the terminal phase.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Animator<'a> {
    config: &'a LineChartConfig,
    /// Pixel y of the y-axis minimum, the start line for non-reveal entries.
    baseline_y: f64,
}

impl<'a> Animator<'a> {
    pub(crate) fn new(config: &'a LineChartConfig, baseline_y: f64) -> Self {
        Self { config, baseline_y }
    }

    fn transition(&self, end: TransitionEnd) -> Transition {
        Transition::new(
            self.config.animations.duration(),
            self.config.animations.easing,
            end,
        )
    }

    pub(crate) fn enter_path(
        &self,
        scene: &mut SceneGraph,
        path: NodeId,
        target: PathGeometry,
    ) -> ChartResult<()> {
        if !self.config.should_animate() {
            scene.set_attr(path, Attr::Path, AttrValue::Path(target))?;
            return scene.set_phase(path, AnimationPhase::Revealed);
        }

        scene.set_phase(path, AnimationPhase::Entering)?;
        let start = if self.config.animation_direction.reveals() {
            PathGeometry::new(reveal_vertices(&target.vertices, 0.0), target.curve)
        } else {
            target.flattened(self.baseline_y)
        };
        scene.set_attr(path, Attr::Path, AttrValue::Path(start))?;

        let tween = if self.config.animation_direction.reveals() {
            TweenTarget::Reveal(target)
        } else {
            TweenTarget::Path(target)
        };
        scene.schedule(
            path,
            self.transition(TransitionEnd::Settle(AnimationPhase::Revealed))
                .tween(Attr::Path, tween),
        )
    }

    /// Existing lines always morph geometrically, never via the reveal tween.
    pub(crate) fn update_path(
        &self,
        scene: &mut SceneGraph,
        path: NodeId,
        target: PathGeometry,
    ) -> ChartResult<()> {
        if !self.config.should_animate() {
            scene.interrupt(path);
            scene.set_attr(path, Attr::Path, AttrValue::Path(target))?;
            return scene.set_phase(path, AnimationPhase::Stable);
        }

        scene.set_phase(path, AnimationPhase::Updating)?;
        scene.schedule(
            path,
            self.transition(TransitionEnd::Settle(AnimationPhase::Stable))
                .tween(Attr::Path, TweenTarget::Path(target)),
        )
    }

    /// Reclaims a group that may still be fading out from an earlier render.
    pub(crate) fn keep_group(&self, scene: &mut SceneGraph, group: NodeId) -> ChartResult<()> {
        let was_exiting = scene.node(group).is_some_and(|n| n.is_exiting());
        scene.interrupt(group);
        if was_exiting {
            trace!(node = group.raw(), "revived exiting group");
        }
        scene.set_number(group, Attr::Opacity, 1.0)?;
        scene.set_phase(group, AnimationPhase::Stable)
    }

    /// Fades `node` out then removes it; removes immediately when not animating.
    pub(crate) fn exit(&self, scene: &mut SceneGraph, node: NodeId) -> ChartResult<()> {
        if !self.config.should_animate() {
            scene.remove(node);
            return Ok(());
        }
        if scene.node(node).is_some_and(|n| n.is_exiting()) {
            return Ok(());
        }
        scene.set_phase(node, AnimationPhase::Exiting)?;
        scene.schedule(
            node,
            self.transition(TransitionEnd::Remove)
                .tween(Attr::Opacity, TweenTarget::Number(0.0)),
        )
    }

    /// Places a marker dot at `at` and fades it in once the line has been drawn.
    pub(crate) fn show_dot(
        &self,
        scene: &mut SceneGraph,
        dot: NodeId,
        at: Vertex,
        entering: bool,
    ) -> ChartResult<()> {
        let settled = if entering {
            AnimationPhase::Revealed
        } else {
            AnimationPhase::Stable
        };

        if !self.config.should_animate() {
            scene.interrupt(dot);
            scene.set_number(dot, Attr::CenterX, at.x)?;
            scene.set_number(dot, Attr::CenterY, at.y)?;
            scene.set_number(dot, Attr::Opacity, 1.0)?;
            return scene.set_phase(dot, settled);
        }

        if entering {
            scene.set_number(dot, Attr::CenterX, at.x)?;
            scene.set_number(dot, Attr::CenterY, at.y)?;
            scene.set_phase(dot, AnimationPhase::Entering)?;
        } else {
            scene.set_phase(dot, AnimationPhase::Updating)?;
        }
        scene.schedule(
            dot,
            self.transition(TransitionEnd::Settle(settled))
                .with_delay(self.config.animations.duration())
                .tween(Attr::CenterX, TweenTarget::Number(at.x))
                .tween(Attr::CenterY, TweenTarget::Number(at.y))
                .tween(Attr::Opacity, TweenTarget::Number(1.0)),
        )
    }
}
