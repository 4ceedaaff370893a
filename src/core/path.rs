use serde::{Deserialize, Serialize};

use crate::core::mapper::Vertex;

/// Tension used when a smooth line is requested.
pub const SMOOTH_TENSION: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Curve {
    #[default]
    Linear,
    /// Cardinal spline through every vertex; tension 0 is Catmull-Rom, 1 is straight.
    Cardinal { tension: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Vertex),
    LineTo(Vertex),
    CubicTo {
        control1: Vertex,
        control2: Vertex,
        to: Vertex,
    },
}

/// Polyline in pixel space plus the curve used to draw it.
///
/// Transitions interpolate the vertices; drawing commands are derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PathGeometry {
    pub vertices: Vec<Vertex>,
    pub curve: Curve,
}

impl PathGeometry {
    #[must_use]
    pub fn new(vertices: Vec<Vertex>, curve: Curve) -> Self {
        Self { vertices, curve }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Same x positions with every vertex moved to `y`.
    #[must_use]
    pub fn flattened(&self, y: f64) -> Self {
        Self {
            vertices: self.vertices.iter().map(|v| Vertex::new(v.x, y)).collect(),
            curve: self.curve,
        }
    }

    #[must_use]
    pub fn commands(&self) -> Vec<PathCommand> {
        let vertices = &self.vertices;
        let Some(first) = vertices.first() else {
            return Vec::new();
        };

        let mut commands = Vec::with_capacity(vertices.len());
        commands.push(PathCommand::MoveTo(*first));
        match self.curve {
            Curve::Cardinal { tension } if vertices.len() > 2 => {
                let tangents = cardinal_tangents(vertices, tension);
                for (pair, slopes) in vertices.windows(2).zip(tangents.windows(2)) {
                    commands.push(PathCommand::CubicTo {
                        control1: Vertex::new(
                            pair[0].x + slopes[0].x / 3.0,
                            pair[0].y + slopes[0].y / 3.0,
                        ),
                        control2: Vertex::new(
                            pair[1].x - slopes[1].x / 3.0,
                            pair[1].y - slopes[1].y / 3.0,
                        ),
                        to: pair[1],
                    });
                }
            }
            _ => commands.extend(vertices[1..].iter().copied().map(PathCommand::LineTo)),
        }
        commands
    }

    /// SVG path data (`d` attribute) for this geometry.
    #[must_use]
    pub fn to_svg_path(&self) -> String {
        let mut out = String::new();
        for command in self.commands() {
            let fragment = match command {
                PathCommand::MoveTo(v) => format!("M{},{}", v.x, v.y),
                PathCommand::LineTo(v) => format!("L{},{}", v.x, v.y),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => format!(
                    "C{},{},{},{},{},{}",
                    control1.x, control1.y, control2.x, control2.y, to.x, to.y
                ),
            };
            out.push_str(&fragment);
        }
        out
    }

    /// Vertex-wise blend towards `target`; the shorter list is padded with its last vertex.
    #[must_use]
    pub fn interpolate(&self, target: &Self, t: f64) -> Self {
        if self.vertices.is_empty() || target.vertices.is_empty() || t >= 1.0 {
            return target.clone();
        }
        let len = self.vertices.len().max(target.vertices.len());
        let vertices = (0..len)
            .map(|index| {
                let from = vertex_or_last(&self.vertices, index);
                let to = vertex_or_last(&target.vertices, index);
                from.lerp(to, t)
            })
            .collect();
        Self {
            vertices,
            curve: target.curve,
        }
    }
}

fn vertex_or_last(vertices: &[Vertex], index: usize) -> Vertex {
    vertices[index.min(vertices.len() - 1)]
}

fn cardinal_tangents(vertices: &[Vertex], tension: f64) -> Vec<Vertex> {
    let scale = 1.0 - tension;
    let last = vertices.len() - 1;
    (0..=last)
        .map(|index| {
            let (before, after, span) = match index {
                0 => (vertices[0], vertices[1], 1.0),
                i if i == last => (vertices[last - 1], vertices[last], 1.0),
                i => (vertices[i - 1], vertices[i + 1], 0.5),
            };
            Vertex::new(
                scale * span * (after.x - before.x),
                scale * span * (after.y - before.y),
            )
        })
        .collect()
}
