use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{DomainValue, PathGeometry, Point};

/// Stable handle of a scene node. Ids are never reused within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Group,
    Path,
    Circle,
}

/// Attribute names understood by the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attr {
    Opacity,
    CenterX,
    CenterY,
    Radius,
    Path,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Number(f64),
    Path(PathGeometry),
}

/// Animation lifecycle of a node within the current render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnimationPhase {
    #[default]
    Idle,
    Entering,
    Revealed,
    Updating,
    Stable,
    Exiting,
}

impl AnimationPhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Revealed | Self::Stable)
    }
}

/// Data bound to a node by a keyed join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Datum {
    Series { name: String, index: usize },
    Point { series: String, point: Point },
}

/// Reconciliation key derived from a [`Datum`].
///
/// Point keys only carry x: they are unique within their parent group, which
/// is itself keyed by series name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatumKey {
    Series(String),
    Point(DomainValue),
}

impl Datum {
    #[must_use]
    pub fn key(&self) -> DatumKey {
        match self {
            Self::Series { name, .. } => DatumKey::Series(name.clone()),
            Self::Point { point, .. } => DatumKey::Point(point.x.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) class: String,
    pub(crate) attrs: IndexMap<Attr, AttrValue>,
    pub(crate) datum: Option<Datum>,
    pub(crate) phase: AnimationPhase,
    pub(crate) exiting: bool,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, parent: Option<NodeId>, class: String) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            class,
            attrs: IndexMap::new(),
            datum: None,
            phase: AnimationPhase::Idle,
            exiting: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Whitespace-separated class token match, like a `.token` selector.
    #[must_use]
    pub fn has_class(&self, token: &str) -> bool {
        self.class.split_whitespace().any(|t| t == token)
    }

    /// First class token; identifies what the node is within its parent.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.class.split_whitespace().next()
    }

    #[must_use]
    pub fn attr(&self, attr: Attr) -> Option<&AttrValue> {
        self.attrs.get(&attr)
    }

    #[must_use]
    pub fn number(&self, attr: Attr) -> Option<f64> {
        match self.attrs.get(&attr) {
            Some(AttrValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&PathGeometry> {
        match self.attrs.get(&Attr::Path) {
            Some(AttrValue::Path(path)) => Some(path),
            _ => None,
        }
    }

    /// Opacity attribute, defaulting to fully opaque when unset.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.number(Attr::Opacity).unwrap_or(1.0)
    }

    /// Value a tween on `attr` starts from; unset opacity counts as opaque.
    pub(crate) fn start_value(&self, attr: Attr) -> Option<AttrValue> {
        match self.attrs.get(&attr) {
            Some(value) => Some(value.clone()),
            None if attr == Attr::Opacity => Some(AttrValue::Number(1.0)),
            None => None,
        }
    }

    #[must_use]
    pub fn datum(&self) -> Option<&Datum> {
        self.datum.as_ref()
    }

    #[must_use]
    pub fn key(&self) -> Option<DatumKey> {
        self.datum.as_ref().map(Datum::key)
    }

    #[must_use]
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// `true` while an exit transition is pending removal.
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }
}
