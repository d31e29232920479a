//! The drawing surface an engine paints a frame onto.

use crate::color::Srgb;
use crate::vector::Vec2;

/// A 2D drawing surface in canvas-local coordinates.
///
/// Implementations decide how circles become pixels (a CPU raster, a browser
/// canvas, a GPU batch). Engines call [`Renderer::clear`] once per frame
/// before drawing.
pub trait Renderer {
    /// Clears the whole surface.
    fn clear(&mut self);

    /// Draws a filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Srgb);

    /// Draws the outline of a circle.
    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Srgb);
}

/// A single recorded draw call. See [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Fill {
        center: Vec2,
        radius: f64,
        color: Srgb,
    },
    Stroke {
        center: Vec2,
        radius: f64,
        color: Srgb,
    },
}

/// Renderer that records draw calls instead of drawing.
///
/// Used by tests and by hosts that forward draw lists elsewhere.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Draw calls since the last `clear`.
    pub fn last_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .map_or(0, |i| i + 1);
        &self.calls[start..]
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Srgb) {
        self.calls.push(DrawCall::Fill {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Srgb) {
        self.calls.push(DrawCall::Stroke {
            center,
            radius,
            color,
        });
    }
}
