//! Pure-computation RGBA8 raster implementing [`Renderer`].
//!
//! Coverage is decided per pixel center: a pixel at `(px, py)` is sampled at
//! `(px + 0.5, py + 0.5)`. No anti-aliasing; later draws overwrite earlier ones.

use particle_field_core::error::EngineError;
use particle_field_core::surface::Renderer;
use particle_field_core::{Srgb, Vec2};

/// Half-width of a stroked outline, in pixels.
const STROKE_HALF_WIDTH: f64 = 0.5;

/// An RGBA8 pixel buffer with a background color.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    background: Srgb,
    pixels: Vec<u8>,
}

impl Raster {
    /// Creates a raster filled with `background`.
    ///
    /// Returns `EngineError::InvalidDimensions` if width or height is zero or
    /// the buffer size overflows.
    pub fn new(width: usize, height: usize, background: Srgb) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        let mut raster = Self {
            width,
            height,
            background,
            pixels: vec![0; len],
        };
        raster.clear();
        Ok(raster)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA8 bytes, row-major, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The RGBA value at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(px)
    }

    fn put(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = (y * self.width + x) * 4;
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Visits every in-bounds pixel whose center lies within `reach` of
    /// `center`, passing the distance from `center` to that pixel center.
    fn for_each_near<F>(&mut self, center: Vec2, reach: f64, mut visit: F)
    where
        F: FnMut(&mut Self, usize, usize, f64),
    {
        if !center.is_finite() || !reach.is_finite() || reach < 0.0 {
            return;
        }
        let (x0, x1) = span(center.x, reach, self.width);
        let (y0, y1) = span(center.y, reach, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                let sample = Vec2::new(px as f64 + 0.5, py as f64 + 0.5);
                visit(self, px, py, center.distance(sample));
            }
        }
    }
}

/// Pixel index range `[lo, hi)` covering `[c - reach, c + reach]`, clipped to `[0, len)`.
fn span(c: f64, reach: f64, len: usize) -> (usize, usize) {
    let lo = (c - reach).floor().max(0.0);
    let hi = (c + reach).ceil().min(len as f64);
    if hi <= lo {
        return (0, 0);
    }
    (lo as usize, hi as usize)
}

impl Renderer for Raster {
    fn clear(&mut self) {
        let rgba = self.background.to_rgba8();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Srgb) {
        let rgba = color.to_rgba8();
        self.for_each_near(center, radius, |r, x, y, d| {
            if d <= radius {
                r.put(x, y, rgba);
            }
        });
        // Sub-pixel dots still mark the pixel they sit in.
        if center.is_finite() && center.x >= 0.0 && center.y >= 0.0 {
            let (x, y) = (center.x as usize, center.y as usize);
            if x < self.width && y < self.height {
                self.put(x, y, rgba);
            }
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Srgb) {
        let rgba = color.to_rgba8();
        self.for_each_near(center, radius + STROKE_HALF_WIDTH, |r, x, y, d| {
            if (d - radius).abs() <= STROKE_HALF_WIDTH {
                r.put(x, y, rgba);
            }
        });
    }
}
