#![deny(unsafe_code)]
//! CPU-side rendering for the particle field.
//!
//! [`Raster`] implements the core `Renderer` trait on an RGBA8 buffer so
//! frames can be produced without a window. PNG export lives behind the
//! `png` feature (default on) so embedders that ship their own surface do not
//! pull in the `image` crate.

pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

pub use raster::Raster;
