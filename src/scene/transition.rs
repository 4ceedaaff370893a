use std::time::Duration;

use smallvec::SmallVec;

use crate::core::{Easing, PathGeometry, reveal_vertices};

use super::node::{AnimationPhase, Attr, AttrValue};

/// End value of one animated attribute.
///
/// Start values are captured from the node when the transition starts, after
/// its delay, so a delayed transition animates from whatever state the node
/// is in at that moment.
#[derive(Debug, Clone, PartialEq)]
pub enum TweenTarget {
    Number(f64),
    Path(PathGeometry),
    /// Progressive left-to-right draw of the target path.
    Reveal(PathGeometry),
}

/// What happens to the node once the transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEnd {
    Settle(AnimationPhase),
    Remove,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
    pub tweens: SmallVec<[(Attr, TweenTarget); 3]>,
    pub end: TransitionEnd,
}

impl Transition {
    #[must_use]
    pub fn new(duration: Duration, easing: Easing, end: TransitionEnd) -> Self {
        Self {
            delay: Duration::ZERO,
            duration,
            easing,
            tweens: SmallVec::new(),
            end,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn tween(mut self, attr: Attr, target: TweenTarget) -> Self {
        self.tweens.push((attr, target));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Tween {
    Number { from: f64, to: f64 },
    Path { from: PathGeometry, to: PathGeometry },
    Reveal { target: PathGeometry },
}

impl Tween {
    pub(crate) fn start(from: Option<&AttrValue>, target: &TweenTarget) -> Self {
        match target {
            TweenTarget::Number(to) => Self::Number {
                from: match from {
                    Some(AttrValue::Number(value)) => *value,
                    _ => *to,
                },
                to: *to,
            },
            TweenTarget::Path(to) => Self::Path {
                from: match from {
                    Some(AttrValue::Path(path)) => path.clone(),
                    _ => to.clone(),
                },
                to: to.clone(),
            },
            TweenTarget::Reveal(target) => Self::Reveal {
                target: target.clone(),
            },
        }
    }

    pub(crate) fn sample(&self, t: f64) -> AttrValue {
        match self {
            Self::Number { from, to } => AttrValue::Number(from + (to - from) * t),
            Self::Path { from, to } => AttrValue::Path(from.interpolate(to, t)),
            Self::Reveal { target } => AttrValue::Path(PathGeometry::new(
                reveal_vertices(&target.vertices, t),
                target.curve,
            )),
        }
    }
}

/// A transition bound to a node and placed on the scene clock.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScheduledTransition {
    pub transition: Transition,
    pub scheduled_at: Duration,
    pub running: Option<SmallVec<[(Attr, Tween); 3]>>,
}

impl ScheduledTransition {
    pub(crate) fn starts_at(&self) -> Duration {
        self.scheduled_at + self.transition.delay
    }

    /// Eased progress at `now`, `None` while still delayed.
    pub(crate) fn progress(&self, now: Duration) -> Option<f64> {
        let start = self.starts_at();
        if now < start {
            return None;
        }
        if self.transition.duration.is_zero() {
            return Some(1.0);
        }
        let raw = (now - start).as_secs_f64() / self.transition.duration.as_secs_f64();
        Some(raw.min(1.0))
    }
}
