use crate::error::ChartResult;
use crate::scene::{Attr, NodeId, NodeKind, SceneGraph};

use super::{CirclePrimitive, PathPrimitive};

/// Backend-agnostic snapshot of a scene subtree for one draw pass.
///
/// Opacity is folded down the tree, so a fading group fades its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderFrame {
    pub paths: Vec<PathPrimitive>,
    pub circles: Vec<CirclePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn from_scene(scene: &SceneGraph, root: NodeId) -> Self {
        let mut frame = Self::default();
        let Some(node) = scene.node(root) else {
            return frame;
        };
        let mut stack = vec![(root, node.opacity(), node.class().to_owned())];

        while let Some((id, opacity, class)) = stack.pop() {
            let Some(node) = scene.node(id) else {
                continue;
            };
            match node.kind() {
                NodeKind::Group => {}
                NodeKind::Path => {
                    if let Some(geometry) = node.path() {
                        frame.paths.push(PathPrimitive {
                            geometry: geometry.clone(),
                            class: class.clone(),
                            opacity,
                        });
                    }
                }
                NodeKind::Circle => {
                    if let (Some(cx), Some(cy)) =
                        (node.number(Attr::CenterX), node.number(Attr::CenterY))
                    {
                        frame.circles.push(CirclePrimitive {
                            cx,
                            cy,
                            radius: node.number(Attr::Radius).unwrap_or(0.0),
                            class: class.clone(),
                            opacity,
                        });
                    }
                }
            }

            for child in node.children().iter().rev() {
                if let Some(child_node) = scene.node(*child) {
                    let child_class = if class.is_empty() {
                        child_node.class().to_owned()
                    } else {
                        format!("{class} {}", child_node.class())
                    };
                    stack.push((*child, opacity * child_node.opacity(), child_class));
                }
            }
        }
        frame
    }

    pub fn validate(&self) -> ChartResult<()> {
        for path in &self.paths {
            path.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.circles.is_empty()
    }

    /// Circles with non-zero effective opacity.
    pub fn visible_circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.circles.iter().filter(|circle| circle.opacity > 0.0)
    }
}
