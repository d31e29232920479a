//! Headless driver: moves a synthetic pointer around the canvas and ticks the
//! frame loop, standing in for a browser's pointer events and animation frames.

use particle_field_core::{Engine, EngineError, FrameLoop, FrameStatus, Teardown, Vec2};
use particle_field_render::Raster;
use particle_field_swarm::ParticleField;
use tracing::debug;

/// Frames per full lap of the pointer around the canvas center.
pub const ORBIT_PERIOD: f64 = 240.0;

/// Pointer position for `frame` on a circle centred on the canvas, with a
/// radius of a quarter of the shorter side.
pub fn orbit_point(frame: usize, width: f64, height: f64) -> Vec2 {
    let angle = std::f64::consts::TAU * frame as f64 / ORBIT_PERIOD;
    let reach = width.min(height) / 4.0;
    Vec2::new(
        width / 2.0 + reach * angle.cos(),
        height / 2.0 + reach * angle.sin(),
    )
}

/// What a headless run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub painted: usize,
}

/// Runs `frames` frames, moving the pointer along [`orbit_point`] before each
/// one. The pointer is held down for the first `paint_frames` frames, so a
/// field with painting enabled fills the cursor disc along the path.
pub fn simulate(
    field: &mut ParticleField,
    raster: &mut Raster,
    frames: usize,
    paint_frames: usize,
) -> Result<RunSummary, EngineError> {
    let mut frame_loop = FrameLoop::new(Teardown::new());
    let (width, height) = (field.width(), field.height());
    field.set_paint_enabled(paint_frames > 0);

    let mut painted = 0;
    for frame in 0..frames {
        if frame == 0 && paint_frames > 0 {
            field.pointer_down();
        }
        if frame == paint_frames {
            field.pointer_up();
        }
        painted += field.pointer_move(orbit_point(frame, width, height), Vec2::ZERO);
        if frame_loop.tick(field, raster)? == FrameStatus::Stopped {
            break;
        }
    }
    field.pointer_up();

    // Zero frames still produces a picture of the initial state.
    if frames == 0 {
        field.render(raster);
    }
    debug!(frames = frame_loop.frames(), painted, "headless run finished");
    Ok(RunSummary {
        frames: frame_loop.frames(),
        painted,
    })
}
