use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ChartError, ChartResult};
use crate::scene::{DatumKey, NodeId, SceneGraph};

/// Outcome of diffing the keyed children of one layer against new data.
///
/// Every existing node lands in exactly one of `updating` or `exiting`, and
/// every new item in exactly one of `entering` or `updating`. Indices refer
/// to positions in the new data; `updating` follows the new data's order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedDiff<K> {
    pub entering: Vec<(K, usize)>,
    pub updating: Vec<(K, usize, NodeId)>,
    pub exiting: Vec<(K, NodeId)>,
}

/// Set sizes of one [`KeyedDiff`], reported per layer after a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LayerDiffSummary {
    pub entering: usize,
    pub updating: usize,
    pub exiting: usize,
}

impl LayerDiffSummary {
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            entering: self.entering + other.entering,
            updating: self.updating + other.updating,
            exiting: self.exiting + other.exiting,
        }
    }
}

impl<K> KeyedDiff<K> {
    #[must_use]
    pub fn summary(&self) -> LayerDiffSummary {
        LayerDiffSummary {
            entering: self.entering.len(),
            updating: self.updating.len(),
            exiting: self.exiting.len(),
        }
    }
}

/// Classifies `existing` nodes and `items` by key-set membership.
///
/// Duplicate keys in `items` are rejected. A duplicate key among `existing`
/// nodes keeps the first node and sends the rest to `exiting`, which restores
/// the one-node-per-key invariant.
pub fn reconcile<K, T, F>(
    existing: &[(K, NodeId)],
    items: &[T],
    key_fn: F,
) -> ChartResult<KeyedDiff<K>>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    F: Fn(&T) -> K,
{
    let mut incoming: IndexMap<K, usize> = IndexMap::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let key = key_fn(item);
        if incoming.contains_key(&key) {
            return Err(ChartError::InvalidData(format!(
                "duplicate reconciliation key {key:?}"
            )));
        }
        incoming.insert(key, index);
    }

    let mut current: IndexMap<K, NodeId> = IndexMap::with_capacity(existing.len());
    let mut exiting = Vec::new();
    for (key, node) in existing {
        if current.contains_key(key) {
            warn!(key = ?key, node = node.raw(), "duplicate scene key, removing extra node");
            exiting.push((key.clone(), *node));
        } else {
            current.insert(key.clone(), *node);
        }
    }

    let mut entering = Vec::new();
    let mut updating = Vec::new();
    for (key, index) in &incoming {
        match current.get(key) {
            Some(node) => updating.push((key.clone(), *index, *node)),
            None => entering.push((key.clone(), *index)),
        }
    }
    exiting.extend(
        current
            .into_iter()
            .filter(|(key, _)| !incoming.contains_key(key)),
    );

    Ok(KeyedDiff {
        entering,
        updating,
        exiting,
    })
}

/// Keyed children of `parent` with the given role. Unbound children are skipped.
#[must_use]
pub fn keyed_children(scene: &SceneGraph, parent: NodeId, role: &str) -> Vec<(DatumKey, NodeId)> {
    scene
        .select_role(parent, role)
        .into_iter()
        .filter_map(|id| scene.node(id).and_then(|n| n.key()).map(|key| (key, id)))
        .collect()
}
