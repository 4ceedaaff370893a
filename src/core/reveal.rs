use crate::core::mapper::Vertex;

/// Virtual reveal index for `len` vertices at elapsed fraction `t`.
///
/// Runs linearly from 1 at `t = 0` to `len + 1` at `t = 1`.
#[must_use]
pub fn reveal_index(len: usize, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 + len as f64 * t
}

/// Number of leading vertices drawn in full at fraction `t`.
#[must_use]
pub fn revealed_count(len: usize, t: f64) -> usize {
    (reveal_index(len, t).floor() as usize).min(len)
}

/// Partial path for the left-to-right reveal animation.
///
/// Keeps the first `floor(i)` vertices and, while the reveal is in progress,
/// appends one vertex blended between the last included vertex and the next
/// one by the fractional part of `i`. At `t = 1` the result is `vertices`.
#[must_use]
pub fn reveal_vertices(vertices: &[Vertex], t: f64) -> Vec<Vertex> {
    let len = vertices.len();
    let index = reveal_index(len, t);
    let floored = index.floor() as usize;

    let mut partial = Vec::with_capacity(floored.min(len) + 1);
    partial.extend_from_slice(&vertices[..floored.min(len)]);
    if floored > 0 && floored < len {
        let weight = index - floored as f64;
        partial.push(vertices[floored - 1].lerp(vertices[floored], weight));
    }
    partial
}
