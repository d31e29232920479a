//! Live-tunable physics and appearance settings shared by every particle.
//!
//! There is exactly one [`PhysicsSettings`] value per field, held behind a
//! [`SharedSettings`] handle. Every particle keeps a clone of the handle, not a
//! copy of the values, so a change made between frames is seen by all
//! particles on their next integration step.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use particle_field_core::error::EngineError;
use particle_field_core::params::{param_bool, param_color, param_f64, param_string, param_usize};
use particle_field_core::Srgb;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

pub const DEFAULT_CURSOR_RADIUS: f64 = 40.0;
pub const DEFAULT_PARTICLE_RADIUS: f64 = 1.5;
pub const DEFAULT_PARTICLE_COLOR: &str = "#4181f8";
pub const DEFAULT_PARTICLE_AMOUNT: usize = 1000;
pub const DEFAULT_FRICTION: f64 = 0.8;
pub const DEFAULT_STIFFNESS: f64 = 10.0;
pub const DEFAULT_MIN_STEP_EXPONENT: f64 = -2.0;
pub const DEFAULT_FORCE_EPSILON_FACTOR: f64 = 1.0;
pub const DEFAULT_ACTIVE_COLOR: &str = "#ff0000";

/// Largest accepted `cursor_radius`.
pub const MAX_CURSOR_RADIUS: f64 = 500.0;

/// How the influence zone acts on particles inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    /// Particles in range accelerate toward the cursor.
    #[default]
    Attract,
    /// Particles in range accelerate away from the cursor.
    Repel,
}

impl CursorMode {
    /// Sign applied to the cursor acceleration along the particle-to-cursor vector.
    pub fn sign(self) -> f64 {
        match self {
            CursorMode::Attract => 1.0,
            CursorMode::Repel => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CursorMode::Attract => "attract",
            CursorMode::Repel => "repel",
        }
    }

    /// Parses `"attract"` or `"repel"`.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "attract" => Ok(CursorMode::Attract),
            "repel" => Ok(CursorMode::Repel),
            other => Err(EngineError::InvalidSetting {
                name: "cursor_mode".into(),
                reason: format!("expected \"attract\" or \"repel\", got \"{other}\""),
            }),
        }
    }
}

/// Physics constants and visual defaults read by particles every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// Radius of the cursor influence zone.
    pub cursor_radius: f64,
    /// Radius given to newly created particles.
    pub particle_radius: f64,
    /// Color given to newly created particles.
    pub particle_color: Srgb,
    /// Particles spawned at random when the field is created.
    pub particle_amount: usize,
    /// Velocity multiplier applied every integrated step, in (0, 1].
    pub friction: f64,
    /// Scales both acceleration curves. Must be > 0.
    pub stiffness: f64,
    /// Recolor particles with `active_color` while they move.
    pub velocity_indicator: bool,
    /// `10^min_step_exponent` is the acceleration floor.
    pub min_step_exponent: f64,
    /// Deadband threshold is `floor * force_epsilon_factor`.
    pub force_epsilon_factor: f64,
    pub cursor_mode: CursorMode,
    /// Color used by the velocity indicator.
    pub active_color: Srgb,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            cursor_radius: DEFAULT_CURSOR_RADIUS,
            particle_radius: DEFAULT_PARTICLE_RADIUS,
            particle_color: Srgb::from_rgb8(0x41, 0x81, 0xf8),
            particle_amount: DEFAULT_PARTICLE_AMOUNT,
            friction: DEFAULT_FRICTION,
            stiffness: DEFAULT_STIFFNESS,
            velocity_indicator: false,
            min_step_exponent: DEFAULT_MIN_STEP_EXPONENT,
            force_epsilon_factor: DEFAULT_FORCE_EPSILON_FACTOR,
            cursor_mode: CursorMode::Attract,
            active_color: Srgb::from_rgb8(0xff, 0x00, 0x00),
        }
    }
}

impl PhysicsSettings {
    /// Acceleration floor shared by both force curves: `10^min_step_exponent`.
    pub fn floor(&self) -> f64 {
        10f64.powf(self.min_step_exponent)
    }

    /// Deadband threshold for the integration gate: `floor * force_epsilon_factor`.
    pub fn force_epsilon(&self) -> f64 {
        self.floor() * self.force_epsilon_factor
    }

    /// Checks every field that the force model or integrator depends on.
    ///
    /// A zero or negative cursor radius is accepted; the range query then
    /// matches nothing (or only coincident particles).
    pub fn validate(&self) -> Result<(), EngineError> {
        require(
            self.stiffness.is_finite() && self.stiffness > 0.0,
            "stiffness",
            "must be finite and > 0",
        )?;
        require(
            self.friction.is_finite() && self.friction > 0.0 && self.friction <= 1.0,
            "friction",
            "must be in (0, 1]",
        )?;
        require(
            self.particle_radius.is_finite() && self.particle_radius > 0.0,
            "particle_radius",
            "must be finite and > 0",
        )?;
        require(
            self.cursor_radius.is_finite() && self.cursor_radius <= MAX_CURSOR_RADIUS,
            "cursor_radius",
            "must be finite and <= 500",
        )?;
        require(
            self.min_step_exponent.is_finite(),
            "min_step_exponent",
            "must be finite",
        )?;
        require(
            self.force_epsilon_factor.is_finite(),
            "force_epsilon_factor",
            "must be finite",
        )?;
        require(
            self.force_epsilon().is_finite(),
            "min_step_exponent",
            "floor overflows f64",
        )?;
        Ok(())
    }

    /// Builds settings from a params object, falling back to defaults for
    /// missing keys, then validates the result.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        let d = Self::default();
        let mode = param_string(params, "cursor_mode", d.cursor_mode.as_str());
        let settings = Self {
            cursor_radius: param_f64(params, "cursor_radius", d.cursor_radius),
            particle_radius: param_f64(params, "particle_radius", d.particle_radius),
            particle_color: param_color(params, "particle_color", d.particle_color)?,
            particle_amount: param_usize(params, "particle_amount", d.particle_amount),
            friction: param_f64(params, "friction", d.friction),
            stiffness: param_f64(params, "stiffness", d.stiffness),
            velocity_indicator: param_bool(params, "velocity_indicator", d.velocity_indicator),
            min_step_exponent: param_f64(params, "min_step_exponent", d.min_step_exponent),
            force_epsilon_factor: param_f64(
                params,
                "force_epsilon_factor",
                d.force_epsilon_factor,
            ),
            cursor_mode: CursorMode::from_name(&mode)?,
            active_color: param_color(params, "active_color", d.active_color)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Current values as a flat JSON object (same keys `from_json` reads).
    pub fn to_json(&self) -> Value {
        json!({
            "cursor_radius": self.cursor_radius,
            "particle_radius": self.particle_radius,
            "particle_color": self.particle_color.to_hex(),
            "particle_amount": self.particle_amount,
            "friction": self.friction,
            "stiffness": self.stiffness,
            "velocity_indicator": self.velocity_indicator,
            "min_step_exponent": self.min_step_exponent,
            "force_epsilon_factor": self.force_epsilon_factor,
            "cursor_mode": self.cursor_mode.as_str(),
            "active_color": self.active_color.to_hex(),
        })
    }

    pub fn schema() -> Value {
        json!({
            "cursor_radius": {
                "type": "number",
                "default": DEFAULT_CURSOR_RADIUS,
                "min": 0.0,
                "max": MAX_CURSOR_RADIUS,
                "description": "Radius of the cursor influence zone"
            },
            "particle_radius": {
                "type": "number",
                "default": DEFAULT_PARTICLE_RADIUS,
                "min": 0.1,
                "max": 20.0,
                "description": "Radius of newly created particles"
            },
            "particle_color": {
                "type": "color",
                "default": DEFAULT_PARTICLE_COLOR,
                "description": "Color of newly created particles"
            },
            "particle_amount": {
                "type": "integer",
                "default": DEFAULT_PARTICLE_AMOUNT,
                "min": 0,
                "max": 100_000,
                "description": "Particles spawned at random positions on creation"
            },
            "friction": {
                "type": "number",
                "default": DEFAULT_FRICTION,
                "min": 0.01,
                "max": 1.0,
                "description": "Velocity multiplier per integrated step"
            },
            "stiffness": {
                "type": "number",
                "default": DEFAULT_STIFFNESS,
                "min": 0.1,
                "max": 100.0,
                "description": "Scales the spawn and cursor acceleration curves"
            },
            "velocity_indicator": {
                "type": "boolean",
                "default": false,
                "description": "Paint moving particles with the active color"
            },
            "min_step_exponent": {
                "type": "number",
                "default": DEFAULT_MIN_STEP_EXPONENT,
                "min": -10.0,
                "max": 2.0,
                "description": "Acceleration floor is 10^min_step_exponent"
            },
            "force_epsilon_factor": {
                "type": "number",
                "default": DEFAULT_FORCE_EPSILON_FACTOR,
                "min": 0.0,
                "max": 100.0,
                "description": "Deadband threshold is floor * force_epsilon_factor"
            },
            "cursor_mode": {
                "type": "string",
                "default": "attract",
                "options": ["attract", "repel"],
                "description": "Whether the cursor pulls particles in or pushes them away"
            },
            "active_color": {
                "type": "color",
                "default": DEFAULT_ACTIVE_COLOR,
                "description": "Color of moving particles when the velocity indicator is on"
            }
        })
    }
}

fn require(ok: bool, name: &str, reason: &str) -> Result<(), EngineError> {
    if ok {
        Ok(())
    } else {
        Err(EngineError::InvalidSetting {
            name: name.to_owned(),
            reason: reason.to_owned(),
        })
    }
}

/// Shared handle to the single settings instance of a field.
///
/// Cloning the handle is cheap and every clone sees the same values. Writes go
/// through [`SharedSettings::update`] or [`SharedSettings::replace`], which
/// validate before committing, so particles never read an invalid value.
#[derive(Clone)]
pub struct SharedSettings(Rc<RefCell<PhysicsSettings>>);

impl SharedSettings {
    pub fn new(settings: PhysicsSettings) -> Result<Self, EngineError> {
        settings.validate()?;
        Ok(Self(Rc::new(RefCell::new(settings))))
    }

    /// Borrows the current values.
    ///
    /// Drop the returned guard before calling [`update`](Self::update) or
    /// [`replace`](Self::replace); while it is alive those return
    /// `EngineError::SettingsBusy`.
    pub fn get(&self) -> Ref<'_, PhysicsSettings> {
        self.0.borrow()
    }

    /// An owned copy of the current values.
    pub fn snapshot(&self) -> PhysicsSettings {
        self.0.borrow().clone()
    }

    /// Applies `change` to a copy of the settings and commits it if it
    /// validates. On error the live settings are untouched. `change` may
    /// read the handle itself; it only sees the values from before the update.
    pub fn update<F>(&self, change: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut PhysicsSettings),
    {
        let mut next = self.snapshot();
        change(&mut next);
        self.replace(next)
    }

    /// Replaces all values at once, after validation.
    pub fn replace(&self, settings: PhysicsSettings) -> Result<(), EngineError> {
        if let Err(e) = settings.validate() {
            warn!(error = %e, "rejected settings update");
            return Err(e);
        }
        let mut live = self
            .0
            .try_borrow_mut()
            .map_err(|_| EngineError::SettingsBusy)?;
        *live = settings;
        Ok(())
    }

    /// True if both handles point at the same settings instance.
    pub fn ptr_eq(&self, other: &SharedSettings) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedSettings").field(&*self.get()).finish()
    }
}
