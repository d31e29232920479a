//! PNG export of a [`Raster`].
//!
//! Feature-gated behind `png` (default on). The raster itself is always
//! available.

use particle_field_core::error::EngineError;
use std::path::Path;

use crate::raster::Raster;

/// Writes the raster as an RGBA PNG.
///
/// Returns `EngineError::InvalidDimensions` if the raster dimensions overflow
/// `u32`, or `EngineError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), EngineError> {
    let w = u32::try_from(raster.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, raster.pixels().to_vec())
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_field_core::surface::Renderer;
    use particle_field_core::{Engine, Srgb, Vec2};
    use particle_field_swarm::ParticleField;

    #[test]
    fn write_png_round_trip() {
        let mut raster = Raster::new(24, 16, Srgb::BLACK).unwrap();
        raster.fill_circle(Vec2::new(12.0, 8.0), 3.0, Srgb::WHITE);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        write_png(&raster, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 24);
        assert_eq!(img.height(), 16);
        assert_eq!(img.get_pixel(12, 8).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn rendered_field_writes_particle_pixels() {
        let params = serde_json::json!({ "particle_amount": 50, "particle_radius": 2.0 });
        let mut field = ParticleField::from_json(64, 64, 7, &params).unwrap();
        field.step().unwrap();
        let mut raster = Raster::new(64, 64, Srgb::BLACK).unwrap();
        field.render(&mut raster);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("field.png");
        write_png(&raster, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        let lit = img.pixels().filter(|p| p.0[..3] != [0, 0, 0]).count();
        assert!(lit > 0);
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let raster = Raster::new(4, 4, Srgb::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.png");
        assert!(matches!(write_png(&raster, &path), Err(EngineError::Io(_))));
    }
}
