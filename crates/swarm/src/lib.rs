#![deny(unsafe_code)]
//! Cursor-driven particle swarm engine.
//!
//! Particles rest at their spawn point. A pointer-controlled influence zone
//! ([`Cursor`]) pulls the ones within its radius; once released they drift
//! back under a saturating restoring pull. Physics constants live in one
//! [`SharedSettings`] instance read by every particle on every step.
//!
//! [`ParticleField`] implements the core `Engine` trait and also owns the
//! between-frame operations: populate, paint, reset, save and shuffle.

pub mod cursor;
pub mod factory;
pub mod field;
pub mod force;
pub mod particle;
pub mod settings;
pub mod snapshot;

pub use cursor::Cursor;
pub use factory::ParticleFactory;
pub use field::{PaintState, ParticleField};
pub use force::ForceModel;
pub use particle::Particle;
pub use settings::{CursorMode, PhysicsSettings, SharedSettings};
pub use snapshot::{ParticleSnapshot, SavedParticle};
