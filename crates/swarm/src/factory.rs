//! Builds particles bound to the field's shared settings.

use particle_field_core::Vec2;

use crate::particle::Particle;
use crate::settings::SharedSettings;

/// Creates particles using the current particle radius and color.
#[derive(Debug, Clone)]
pub struct ParticleFactory {
    settings: SharedSettings,
}

impl ParticleFactory {
    pub fn new(settings: SharedSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// A fresh particle at rest, anchored at `position`.
    pub fn create_particle(&self, position: Vec2) -> Particle {
        self.create_particle_with_velocity(position, Vec2::ZERO)
    }

    /// A particle anchored at `position` that starts with `velocity`, as used
    /// when rebuilding particles from a saved snapshot.
    pub fn create_particle_with_velocity(&self, position: Vec2, velocity: Vec2) -> Particle {
        let (radius, color) = {
            let s = self.settings.get();
            (s.particle_radius, s.particle_color)
        };
        Particle::new(position, velocity, radius, color, self.settings.clone())
    }
}
