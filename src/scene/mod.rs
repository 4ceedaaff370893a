//! Persistent, mutable scene graph with a time-driven transition scheduler.
//!
//! Nodes live in an arena keyed by [`NodeId`]. Removing a node removes its
//! whole subtree and drops every pending transition on it, so a deferred
//! tick can never write to a node that is no longer part of the scene.
//!
//! Each node carries at most one transition. Scheduling a new one replaces
//! the pending one, which gives last-render-wins semantics for repeated
//! renders while an animation is still in flight.

mod node;
mod transition;

use std::time::Duration;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::error::{ChartError, ChartResult};

pub use node::{AnimationPhase, Attr, AttrValue, Datum, DatumKey, Node, NodeId, NodeKind};
pub use transition::{Transition, TransitionEnd, TweenTarget};

use transition::{ScheduledTransition, Tween};

#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: IndexMap<NodeId, Node>,
    transitions: IndexMap<NodeId, ScheduledTransition>,
    root: NodeId,
    next_id: u64,
    clock: Duration,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = IndexMap::new();
        nodes.insert(root, Node::new(NodeKind::Group, None, String::new()));
        Self {
            nodes,
            transitions: IndexMap::new(),
            root,
            next_id: 1,
            clock: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current scene clock, advanced only by [`SceneGraph::advance`].
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock
    }

    #[must_use]
    pub fn is_live(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn node_mut(&mut self, id: NodeId) -> ChartResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or(ChartError::StaleNode(id))
    }

    pub fn append(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        class: impl Into<String>,
    ) -> ChartResult<NodeId> {
        let id = NodeId(self.next_id);
        self.node_mut(parent)?.children.push(id);
        self.next_id += 1;
        self.nodes
            .insert(id, Node::new(kind, Some(parent), class.into()));
        Ok(id)
    }

    /// Live children of `parent` carrying the class token `token`, in document order.
    #[must_use]
    pub fn select_children(&self, parent: NodeId, token: &str) -> Vec<NodeId> {
        self.nodes
            .get(&parent)
            .map(|node| {
                node.children
                    .iter()
                    .copied()
                    .filter(|child| self.nodes.get(child).is_some_and(|n| n.has_class(token)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Live children of `parent` whose role (first class token) is `role`.
    #[must_use]
    pub fn select_role(&self, parent: NodeId, role: &str) -> Vec<NodeId> {
        self.nodes
            .get(&parent)
            .map(|node| {
                node.children
                    .iter()
                    .copied()
                    .filter(|child| self.nodes.get(child).is_some_and(|n| n.role() == Some(role)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_attr(&mut self, id: NodeId, attr: Attr, value: AttrValue) -> ChartResult<()> {
        self.node_mut(id)?.attrs.insert(attr, value);
        Ok(())
    }

    pub fn set_number(&mut self, id: NodeId, attr: Attr, value: f64) -> ChartResult<()> {
        self.set_attr(id, attr, AttrValue::Number(value))
    }

    pub fn set_class(&mut self, id: NodeId, class: impl Into<String>) -> ChartResult<()> {
        self.node_mut(id)?.class = class.into();
        Ok(())
    }

    pub fn set_datum(&mut self, id: NodeId, datum: Datum) -> ChartResult<()> {
        self.node_mut(id)?.datum = Some(datum);
        Ok(())
    }

    pub fn set_phase(&mut self, id: NodeId, phase: AnimationPhase) -> ChartResult<()> {
        self.node_mut(id)?.phase = phase;
        Ok(())
    }

    /// Removes `id` and its subtree. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root {
            return false;
        }
        let Some(parent) = self.nodes.get(&id).map(|node| node.parent) else {
            return false;
        };
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|child| *child != id);
        }

        let mut pending: SmallVec<[NodeId; 16]> = SmallVec::new();
        pending.push(id);
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.shift_remove(&current) {
                pending.extend(node.children.iter().copied());
            }
            if self.transitions.shift_remove(&current).is_some() {
                trace!(node = current.raw(), "dropped transition of removed node");
            }
        }
        true
    }

    /// Places `transition` on `id`, superseding any pending one.
    pub fn schedule(&mut self, id: NodeId, transition: Transition) -> ChartResult<()> {
        let exiting = matches!(transition.end, TransitionEnd::Remove);
        let node = self.node_mut(id)?;
        node.exiting = exiting;
        let scheduled = ScheduledTransition {
            transition,
            scheduled_at: self.clock,
            running: None,
        };
        if self.transitions.insert(id, scheduled).is_some() {
            trace!(node = id.raw(), "superseded pending transition");
        }
        Ok(())
    }

    /// Cancels any pending transition on `id` and clears a pending exit.
    pub fn interrupt(&mut self, id: NodeId) -> bool {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.exiting = false;
        }
        let cancelled = self.transitions.shift_remove(&id).is_some();
        if cancelled {
            trace!(node = id.raw(), "interrupted transition");
        }
        cancelled
    }

    /// `true` if `id` or one of its ancestors is waiting on an exit transition.
    #[must_use]
    pub fn is_pending_removal(&self, id: NodeId) -> bool {
        let mut current = self.nodes.get(&id);
        while let Some(node) = current {
            if node.exiting {
                return true;
            }
            current = node.parent.and_then(|parent| self.nodes.get(&parent));
        }
        false
    }

    #[must_use]
    pub fn has_transition(&self, id: NodeId) -> bool {
        self.transitions.contains_key(&id)
    }

    #[must_use]
    pub fn pending_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Advances the scene clock and applies every due transition frame.
    pub fn advance(&mut self, elapsed: Duration) {
        self.clock += elapsed;
        let now = self.clock;

        let mut finished: Vec<(NodeId, TransitionEnd)> = Vec::new();
        for (id, scheduled) in &mut self.transitions {
            let Some(node) = self.nodes.get_mut(id) else {
                trace!(node = id.raw(), "skipping transition of removed node");
                continue;
            };
            let Some(raw) = scheduled.progress(now) else {
                continue;
            };

            let tweens = scheduled.running.get_or_insert_with(|| {
                scheduled
                    .transition
                    .tweens
                    .iter()
                    .map(|(attr, target)| {
                        (*attr, Tween::start(node.start_value(*attr).as_ref(), target))
                    })
                    .collect()
            });
            let eased = if raw >= 1.0 {
                1.0
            } else {
                scheduled.transition.easing.apply(raw)
            };
            for (attr, tween) in tweens.iter() {
                node.attrs.insert(*attr, tween.sample(eased));
            }
            if raw >= 1.0 {
                finished.push((*id, scheduled.transition.end));
            }
        }

        for (id, end) in finished {
            self.transitions.shift_remove(&id);
            match end {
                TransitionEnd::Settle(phase) => {
                    if let Some(node) = self.nodes.get_mut(&id) {
                        node.phase = phase;
                    }
                }
                TransitionEnd::Remove => {
                    self.remove(id);
                }
            }
        }
    }

    /// Advances in `step` increments until no transition is pending.
    ///
    /// `max_steps` bounds the loop; returns `false` if transitions remain.
    pub fn run_to_completion(&mut self, step: Duration, max_steps: usize) -> bool {
        for _ in 0..max_steps {
            if self.transitions.is_empty() {
                return true;
            }
            self.advance(step);
        }
        self.transitions.is_empty()
    }

    /// Depth-first ids of the subtree below `id`, excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .nodes
            .get(&id)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }
}
