//! Saved particle state for the save/shuffle workflow.
//!
//! A snapshot keeps only what identifies a particle's motion (position and
//! velocity). Particles are rebuilt through the [`ParticleFactory`], so they
//! pick up the settings that are live when they are restored.

use particle_field_core::{Vec2, Xorshift64};
use serde::{Deserialize, Serialize};

use crate::factory::ParticleFactory;
use crate::particle::Particle;

/// Position and velocity of one particle at save time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedParticle {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// An ordered copy of a particle collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub particles: Vec<SavedParticle>,
}

impl ParticleSnapshot {
    /// Copies position and velocity of every particle.
    pub fn capture(particles: &[Particle]) -> Self {
        Self {
            particles: particles
                .iter()
                .map(|p| SavedParticle {
                    position: p.pos,
                    velocity: p.velocity,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Rebuilds the particles where they were saved.
    pub fn restore(&self, factory: &ParticleFactory) -> Vec<Particle> {
        self.particles
            .iter()
            .map(|s| factory.create_particle_with_velocity(s.position, s.velocity))
            .collect()
    }

    /// Rebuilds the particles at fresh random positions in
    /// `[0, width) x [0, height)`, keeping each saved velocity. Each particle's
    /// spawn anchor is its new position.
    pub fn shuffle(
        &self,
        factory: &ParticleFactory,
        rng: &mut Xorshift64,
        width: f64,
        height: f64,
    ) -> Vec<Particle> {
        self.particles
            .iter()
            .map(|s| factory.create_particle_with_velocity(rng.next_point(width, height), s.velocity))
            .collect()
    }
}
