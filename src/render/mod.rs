mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{CirclePrimitive, PathPrimitive};

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a flattened `RenderFrame` taken from the scene graph, so
/// drawing code never sees reconciliation or animation state.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
