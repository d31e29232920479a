//! The pointer-driven influence zone.

use particle_field_core::error::EngineError;
use particle_field_core::{Srgb, Vec2};

use crate::particle::Particle;

/// Outline color of the cursor unless one is given.
pub const DEFAULT_CURSOR_COLOR: Srgb = Srgb {
    r: 225.0 / 255.0,
    g: 225.0 / 255.0,
    b: 225.0 / 255.0,
};

/// A circular zone that pulls on particles within `radius` of `pos`.
///
/// The cursor never owns particles; it only borrows the collection for the
/// duration of a query or force pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    pub pos: Vec2,
    pub radius: f64,
    pub color: Srgb,
}

impl Cursor {
    pub fn new(radius: f64, color: Srgb) -> Self {
        Self {
            pos: Vec2::ZERO,
            radius,
            color,
        }
    }

    /// Moves the cursor to a pointer position given in device coordinates,
    /// translated by the canvas origin into canvas-local space.
    pub fn update(&mut self, pointer: Vec2, canvas_origin: Vec2) {
        self.pos = pointer - canvas_origin;
    }

    /// True if `point` lies within `radius` of the cursor (boundary inclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) <= self.radius
    }

    /// Particles within `radius` of the cursor, boundary inclusive.
    ///
    /// Lazily filters the borrowed slice; nothing is allocated.
    pub fn particles_in_range<'a>(
        &self,
        particles: &'a [Particle],
    ) -> impl Iterator<Item = &'a Particle> + 'a {
        let zone = self.clone();
        particles.iter().filter(move |p| zone.contains(p.pos))
    }

    /// Runs one integration step on every particle.
    ///
    /// Particles in range receive the vector toward the cursor; all others
    /// receive the zero vector and feel only their spawn pull.
    ///
    /// Every particle is checked for non-finite state before any of them
    /// moves, so a corrupted particle leaves the whole collection untouched.
    /// A step whose result overflows is still detected per particle; in that
    /// case the particles before it have already been integrated.
    pub fn apply_forces(&self, particles: &mut [Particle]) -> Result<(), EngineError> {
        particles.iter().try_for_each(Particle::check_finite)?;
        for particle in particles.iter_mut() {
            let to_cursor = if self.contains(particle.pos) {
                particle.pos.to(self.pos)
            } else {
                Vec2::ZERO
            };
            particle.apply_force(to_cursor)?;
        }
        Ok(())
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(crate::settings::DEFAULT_CURSOR_RADIUS, DEFAULT_CURSOR_COLOR)
    }
}
