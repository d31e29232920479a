//! The `Engine` trait every frame-driven simulation implements.
//!
//! The trait is object-safe so hosts can drive a `dyn Engine` without knowing
//! which simulation sits behind it.

use crate::error::EngineError;
use crate::surface::Renderer;
use serde_json::Value;

/// A simulation advanced once per display frame.
///
/// A host calls [`Engine::step`] and then [`Engine::render`] on every tick.
/// Input events and settings changes arrive between ticks, never during one.
pub trait Engine {
    /// Advance the simulation by one frame.
    ///
    /// Returns an `EngineError` if the state became invalid (for example a
    /// non-finite particle position). After an error the frame may be only
    /// partly applied; hosts should stop driving the engine rather than retry.
    fn step(&mut self) -> Result<(), EngineError>;

    /// Paint the current state. Implementations clear the surface first.
    fn render(&self, renderer: &mut dyn Renderer);

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
