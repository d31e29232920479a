//! A single particle and its integration step.

use particle_field_core::error::EngineError;
use particle_field_core::{Srgb, Vec2};

use crate::force::ForceModel;
use crate::settings::SharedSettings;

/// A particle anchored to the point it was spawned at.
///
/// Physics constants are read from the shared settings on every step, never
/// cached, so live tuning applies to existing particles immediately.
#[derive(Debug, Clone)]
pub struct Particle {
    spawn: Vec2,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub radius: f64,
    pub color: Srgb,
    original_color: Srgb,
    settings: SharedSettings,
}

impl Particle {
    /// Creates a particle at `pos` with the given initial velocity. The spawn
    /// anchor is fixed to `pos`.
    pub fn new(
        pos: Vec2,
        velocity: Vec2,
        radius: f64,
        color: Srgb,
        settings: SharedSettings,
    ) -> Self {
        Self {
            spawn: pos,
            pos,
            velocity,
            radius,
            color,
            original_color: color,
            settings,
        }
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    /// The color the particle was created with.
    pub fn original_color(&self) -> Srgb {
        self.original_color
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// Errors with `EngineError::NonFiniteState` if position or velocity
    /// holds NaN or infinity.
    pub fn check_finite(&self) -> Result<(), EngineError> {
        ensure_finite("position", self.pos)?;
        ensure_finite("velocity", self.velocity)
    }

    /// The force this particle would integrate for the given cursor vector,
    /// without mutating anything.
    pub fn net_force(&self, to_cursor: Vec2) -> Vec2 {
        let settings = self.settings.get();
        let model = ForceModel::from_settings(&settings);

        let mut to_spawn = self.pos.to(self.spawn);
        to_spawn.scale(model.spawn(to_spawn.magnitude()));

        let mut pull = to_cursor;
        pull.scale(settings.cursor_mode.sign() * model.cursor(to_cursor.magnitude()));

        to_spawn + pull
    }

    /// Advances the particle by one semi-implicit Euler step.
    ///
    /// `to_cursor` points from the particle to the cursor, or is zero when the
    /// particle is outside the influence zone. If the net force magnitude does
    /// not exceed the deadband (`force_epsilon`) nothing moves this step.
    ///
    /// Returns `EngineError::NonFiniteState` if the particle state or
    /// `to_cursor` holds NaN/infinity, or if the step would produce it; the
    /// particle is left unchanged in that case.
    pub fn apply_force(&mut self, to_cursor: Vec2) -> Result<(), EngineError> {
        self.check_finite()?;
        ensure_finite("cursor vector", to_cursor)?;

        let total = self.net_force(to_cursor);
        let settings = self.settings.get();

        if total.magnitude() > settings.force_epsilon() {
            let mut velocity = self.velocity;
            velocity += total;
            velocity.scale(settings.friction);
            let pos = self.pos + velocity;
            ensure_finite("velocity", velocity)?;
            ensure_finite("position", pos)?;

            self.velocity = velocity;
            self.pos = pos;
            if settings.velocity_indicator {
                self.color = settings.active_color;
            }
        } else if settings.velocity_indicator {
            self.color = self.original_color;
        }
        Ok(())
    }
}

fn ensure_finite(what: &'static str, v: Vec2) -> Result<(), EngineError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(EngineError::NonFiniteState {
            what,
            x: v.x,
            y: v.y,
        })
    }
}
