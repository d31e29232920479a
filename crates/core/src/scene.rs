//! Reproducible description of a particle field run.
//!
//! A [`Scene`] captures canvas dimensions, parameter overrides, the PRNG seed
//! used for spawning and shuffling, and how many frames to simulate.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Canvas size, params, seed and frame count for one run.
///
/// Missing fields fall back to [`Scene::default`] when deserializing, so a
/// scene file only needs to list what it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub frames: usize,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(512, 512, 42)
    }
}

impl Scene {
    /// Creates a scene with empty params (`{}`) and zero frames.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            frames: 0,
        }
    }

    /// Rejects zero dimensions and `width * height` overflow.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(())
    }
}
