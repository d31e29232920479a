#![deny(unsafe_code)]
//! Core types and traits for the particle field.
//!
//! Provides the `Engine` and `Renderer` traits, the `FrameLoop` driver,
//! `Vec2`, `Srgb`, the `Xorshift64` PRNG, `Scene`, and parameter helpers.

pub mod color;
pub mod engine;
pub mod error;
pub mod frame_loop;
pub mod params;
pub mod prng;
pub mod scene;
pub mod surface;
pub mod vector;

pub use color::Srgb;
pub use engine::Engine;
pub use error::EngineError;
pub use frame_loop::{FrameBudget, FrameHost, FrameLoop, FrameStatus, Teardown};
pub use prng::Xorshift64;
pub use scene::Scene;
pub use surface::{DrawCall, RecordingRenderer, Renderer};
pub use vector::Vec2;
