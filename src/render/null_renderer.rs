use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer for tests and headless use.
///
/// Frames are still validated so malformed geometry surfaces without a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_path_count: usize,
    pub last_visible_circle_count: usize,
    pub frames_rendered: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_path_count = frame.paths.len();
        self.last_visible_circle_count = frame.visible_circles().count();
        self.frames_rendered += 1;
        Ok(())
    }
}
