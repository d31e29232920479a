//! Scalar acceleration curves for the two force regimes.
//!
//! Both curves map a distance `w >= 0` to an acceleration factor that scales
//! the corresponding displacement vector (particle to spawn, particle to
//! cursor). Both are bounded below by `floor = 10^min_step_exponent` using
//! plain `f64::max`, so a negative floor yields negative factors rather than
//! being clamped to zero.

use crate::settings::PhysicsSettings;

/// Offset inside the cursor log term; keeps `ln(w + 1.001) > 0` for `w >= 0`.
pub const CURSOR_LOG_OFFSET: f64 = 1.001;
/// Distance beyond which the spawn curve stops growing.
pub const SPAWN_SATURATION: f64 = 0.5;
/// Divisor applied to the clamped spawn distance inside `sin`.
pub const SPAWN_DIVISOR: f64 = 150.0;

/// Cursor pull: `max(floor, 1 / (stiffness * ln(w + 1.001)))`.
///
/// Weakens with distance. Near `w = 0` the result is large (about
/// `1000 / stiffness`); only the low side is floored.
pub fn acceleration_cursor(w: f64, stiffness: f64, floor: f64) -> f64 {
    floor.max(1.0 / (stiffness * (w + CURSOR_LOG_OFFSET).ln()))
}

/// Spawn restoring pull: `max(floor, sin(min(w, 0.5) / 150) * stiffness)`.
///
/// Saturates at `sin(0.5 / 150) * stiffness` once `w >= 0.5`, so distant
/// particles are not pulled back harder than nearby ones.
pub fn acceleration_spawn(w: f64, stiffness: f64, floor: f64) -> f64 {
    floor.max((w.min(SPAWN_SATURATION) / SPAWN_DIVISOR).sin() * stiffness)
}

/// Both curves bound to one set of settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    pub stiffness: f64,
    pub floor: f64,
}

impl ForceModel {
    pub fn new(stiffness: f64, floor: f64) -> Self {
        Self { stiffness, floor }
    }

    pub fn from_settings(settings: &PhysicsSettings) -> Self {
        Self::new(settings.stiffness, settings.floor())
    }

    pub fn cursor(&self, w: f64) -> f64 {
        acceleration_cursor(w, self.stiffness, self.floor)
    }

    pub fn spawn(&self, w: f64) -> f64 {
        acceleration_spawn(w, self.stiffness, self.floor)
    }

    /// The constant the spawn curve settles at for `w >= 0.5`.
    pub fn saturated_spawn(&self) -> f64 {
        self.spawn(SPAWN_SATURATION)
    }
}
