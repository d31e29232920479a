//! The particle field engine: particles, cursor, settings and input state for
//! one canvas.
//!
//! Everything that changes the population (spawning, painting, reset,
//! shuffle) happens through methods called between frames. [`Engine::step`]
//! only integrates the particles that are already there.

use particle_field_core::error::EngineError;
use particle_field_core::surface::Renderer;
use particle_field_core::{Engine, Scene, Vec2, Xorshift64};
use serde_json::Value;
use tracing::{debug, trace};

use crate::cursor::{Cursor, DEFAULT_CURSOR_COLOR};
use crate::factory::ParticleFactory;
use crate::particle::Particle;
use crate::settings::{PhysicsSettings, SharedSettings};
use crate::snapshot::ParticleSnapshot;

/// Particles painted per grid cell are spaced `particle_radius + 2 * spacing`
/// apart, with `spacing = PAINT_SPACING_FACTOR * particle_radius`.
const PAINT_SPACING_FACTOR: f64 = 2.0;

/// Grid steps per axis for a single paint call.
const MAX_PAINT_STEPS: usize = 256;

/// Pointer gesture state relevant to painting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintState {
    pub enabled: bool,
    pub dragging: bool,
}

impl PaintState {
    pub fn is_painting(self) -> bool {
        self.enabled && self.dragging
    }
}

/// An interactive field of particles reacting to a cursor.
#[derive(Debug)]
pub struct ParticleField {
    width: f64,
    height: f64,
    factory: ParticleFactory,
    cursor: Cursor,
    particles: Vec<Particle>,
    saved: Option<ParticleSnapshot>,
    paint: PaintState,
    rng: Xorshift64,
    frame: u64,
}

impl ParticleField {
    /// Creates a field and spawns `settings.particle_amount` particles at
    /// random positions.
    ///
    /// Returns `EngineError::InvalidDimensions` for a zero-sized canvas and
    /// `EngineError::InvalidSetting` if the settings fail validation.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        settings: PhysicsSettings,
    ) -> Result<Self, EngineError> {
        Scene::new(width, height, seed).validate()?;

        let amount = settings.particle_amount;
        let cursor = Cursor::new(settings.cursor_radius, DEFAULT_CURSOR_COLOR);
        let shared = SharedSettings::new(settings)?;
        let mut field = Self {
            width: width as f64,
            height: height as f64,
            factory: ParticleFactory::new(shared),
            cursor,
            particles: Vec::with_capacity(amount),
            saved: None,
            paint: PaintState::default(),
            rng: Xorshift64::new(seed),
            frame: 0,
        };
        field.populate(amount);
        Ok(field)
    }

    /// Creates a field from a JSON params object, falling back to defaults
    /// for missing keys.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        Self::new(width, height, seed, PhysicsSettings::from_json(params)?)
    }

    pub fn from_scene(scene: &Scene) -> Result<Self, EngineError> {
        scene.validate()?;
        Self::from_json(scene.width, scene.height, scene.seed, &scene.params)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The live settings handle shared with every particle.
    pub fn settings(&self) -> &SharedSettings {
        self.factory.settings()
    }

    pub fn factory(&self) -> &ParticleFactory {
        &self.factory
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Direct access to the collection for hosts that edit it between frames.
    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Mutable cursor access. The radius is overwritten from
    /// `settings().cursor_radius` before every paint and step, so change it
    /// through the settings instead.
    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Spawns `count` particles at uniformly random positions on the canvas.
    pub fn populate(&mut self, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let pos = self.rng.next_point(self.width, self.height);
            self.particles.push(self.factory.create_particle(pos));
        }
        debug!(count, total = self.particles.len(), "populated field");
    }

    /// Removes every particle. A saved snapshot is kept.
    pub fn reset(&mut self) {
        let removed = self.particles.len();
        self.particles.clear();
        debug!(removed, "reset field");
    }

    pub fn paint_state(&self) -> PaintState {
        self.paint
    }

    pub fn set_paint_enabled(&mut self, enabled: bool) {
        self.paint.enabled = enabled;
    }

    pub fn pointer_down(&mut self) {
        self.paint.dragging = true;
    }

    pub fn pointer_up(&mut self) {
        self.paint.dragging = false;
    }

    /// Moves the cursor to a device-space pointer position. While painting
    /// (enabled and dragging), fills the cursor disc with new particles.
    ///
    /// Returns the number of particles painted.
    pub fn pointer_move(&mut self, pointer: Vec2, canvas_origin: Vec2) -> usize {
        self.cursor.update(pointer, canvas_origin);
        self.sync_cursor_radius();
        if self.paint.is_painting() {
            self.paint()
        } else {
            0
        }
    }

    /// Fills the cursor disc with a square grid of new particles.
    ///
    /// Grid pitch is `particle_radius * (1 + 2 * PAINT_SPACING_FACTOR)`,
    /// starting at the top-left corner of the cursor's bounding square. Only
    /// points inside the zone (boundary inclusive) get a particle. The pitch
    /// is widened if needed so one call never visits more than
    /// `MAX_PAINT_STEPS + 1` points per axis.
    pub fn paint(&mut self) -> usize {
        let radius = self.sync_cursor_radius();
        let center = self.cursor.pos;
        if !radius.is_finite() || radius < 0.0 || !center.is_finite() {
            return 0;
        }
        let particle_radius = self.settings().get().particle_radius;
        let pitch = (particle_radius + 2.0 * PAINT_SPACING_FACTOR * particle_radius)
            .max(2.0 * radius / MAX_PAINT_STEPS as f64);
        let span = 2.0 * radius / pitch;
        if !span.is_finite() {
            return 0;
        }
        let steps = (span.floor() as usize).min(MAX_PAINT_STEPS);
        let corner = Vec2::new(center.x - radius, center.y - radius);

        let before = self.particles.len();
        for i in 0..=steps {
            let x = corner.x + i as f64 * pitch;
            for j in 0..=steps {
                let point = Vec2::new(x, corner.y + j as f64 * pitch);
                if self.cursor.contains(point) {
                    self.particles.push(self.factory.create_particle(point));
                }
            }
        }
        let painted = self.particles.len() - before;
        debug!(painted, x = center.x, y = center.y, "painted particles");
        painted
    }

    /// Copies `cursor_radius` from the live settings onto the cursor.
    fn sync_cursor_radius(&mut self) -> f64 {
        let radius = self.settings().get().cursor_radius;
        self.cursor.radius = radius;
        radius
    }

    /// Saves position and velocity of every current particle, replacing any
    /// earlier snapshot.
    pub fn save(&mut self) -> &ParticleSnapshot {
        let snapshot = ParticleSnapshot::capture(&self.particles);
        debug!(saved = snapshot.len(), "saved particles");
        self.saved.insert(snapshot)
    }

    pub fn saved(&self) -> Option<&ParticleSnapshot> {
        self.saved.as_ref()
    }

    /// Installs a snapshot (for example one loaded from disk) as the saved state.
    pub fn load_snapshot(&mut self, snapshot: ParticleSnapshot) {
        self.saved = Some(snapshot);
    }

    /// Replaces the particle collection with the saved particles at new
    /// random positions, each keeping its saved velocity.
    ///
    /// Returns `EngineError::NoSnapshot` if nothing was saved.
    pub fn shuffle(&mut self) -> Result<usize, EngineError> {
        let snapshot = self.saved.as_ref().ok_or(EngineError::NoSnapshot)?;
        self.particles = snapshot.shuffle(&self.factory, &mut self.rng, self.width, self.height);
        debug!(count = self.particles.len(), "shuffled saved particles");
        Ok(self.particles.len())
    }
}

impl Engine for ParticleField {
    fn step(&mut self) -> Result<(), EngineError> {
        self.sync_cursor_radius();
        self.cursor.apply_forces(&mut self.particles)?;
        self.frame += 1;
        trace!(frame = self.frame, particles = self.particles.len(), "stepped field");
        Ok(())
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.clear();
        for p in &self.particles {
            renderer.fill_circle(p.pos, p.radius, p.color);
        }
        renderer.stroke_circle(self.cursor.pos, self.cursor.radius, self.cursor.color);
    }

    fn params(&self) -> Value {
        self.settings().get().to_json()
    }

    fn param_schema(&self) -> Value {
        PhysicsSettings::schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_field_core::surface::{DrawCall, RecordingRenderer};
    use serde_json::json;

    fn empty_field() -> ParticleField {
        ParticleField::from_json(400, 300, 42, &json!({"particle_amount": 0})).unwrap()
    }

    // ---- Construction ----

    #[test]
    fn new_spawns_particle_amount_in_bounds() {
        let field = ParticleField::from_json(200, 100, 7, &json!({"particle_amount": 250})).unwrap();
        assert_eq!(field.particles().len(), 250);
        for p in field.particles() {
            assert!((0.0..200.0).contains(&p.pos.x) && (0.0..100.0).contains(&p.pos.y));
            assert_eq!(p.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            ParticleField::from_json(0, 10, 1, &json!({})),
            Err(EngineError::InvalidDimensions)
        ));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert!(ParticleField::from_json(10, 10, 1, &json!({"stiffness": 0})).is_err());
    }

    #[test]
    fn same_seed_same_layout() {
        let a = ParticleField::from_json(300, 300, 99, &json!({"particle_amount": 50})).unwrap();
        let b = ParticleField::from_json(300, 300, 99, &json!({"particle_amount": 50})).unwrap();
        assert!(a
            .particles()
            .iter()
            .zip(b.particles())
            .all(|(pa, pb)| pa.pos == pb.pos));
    }

    #[test]
    fn from_scene_uses_scene_params() {
        let mut scene = Scene::new(64, 48, 3);
        scene.params = json!({"particle_amount": 5, "friction": 0.5});
        let field = ParticleField::from_scene(&scene).unwrap();
        assert_eq!(field.particles().len(), 5);
        assert_eq!(field.settings().get().friction, 0.5);
        assert_eq!(field.width(), 64.0);
    }

    // ---- Stepping ----

    #[test]
    fn step_attracts_particles_under_the_cursor_only() {
        let mut field = empty_field();
        field.settings().update(|s| s.cursor_radius = 30.0).unwrap();
        let near = field.factory().create_particle(Vec2::new(60.0, 50.0));
        let far = field.factory().create_particle(Vec2::new(100.0, 100.0));
        field.particles_mut().extend([near, far]);
        field.pointer_move(Vec2::new(50.0, 50.0), Vec2::ZERO);

        field.step().unwrap();

        let p = &field.particles()[0];
        assert!(p.velocity.x < 0.0 && p.pos.x < 60.0);
        assert_eq!(field.particles()[1].pos, Vec2::new(100.0, 100.0));
        assert_eq!(field.frame(), 1);
    }

    #[test]
    fn released_particles_return_toward_spawn() {
        let mut field = empty_field();
        let p = field.factory().create_particle(Vec2::new(200.0, 150.0));
        field.particles_mut().push(p);
        field.pointer_move(Vec2::new(190.0, 150.0), Vec2::ZERO);
        for _ in 0..20 {
            field.step().unwrap();
        }
        let pulled = field.particles()[0].pos.distance(Vec2::new(200.0, 150.0));
        assert!(pulled > 0.5, "cursor should have displaced the particle");

        field.pointer_move(Vec2::new(-1000.0, -1000.0), Vec2::ZERO);
        for _ in 0..400 {
            field.step().unwrap();
        }
        let after = field.particles()[0].pos.distance(Vec2::new(200.0, 150.0));
        assert!(after < pulled, "expected drift back to spawn: {after} >= {pulled}");
    }

    #[test]
    fn cursor_radius_follows_settings_each_frame() {
        let mut field = empty_field();
        field.settings().update(|s| s.cursor_radius = 12.5).unwrap();
        field.step().unwrap();
        assert_eq!(field.cursor().radius, 12.5);
    }

    #[test]
    fn step_fails_fast_on_nan() {
        let mut field = empty_field();
        let mut p = field.factory().create_particle(Vec2::new(1.0, 1.0));
        p.pos = Vec2::new(f64::NAN, 1.0);
        field.particles_mut().push(p);
        assert!(matches!(field.step(), Err(EngineError::NonFiniteState { .. })));
    }

    // ---- Painting ----

    #[test]
    fn paint_fills_cursor_disc_on_grid() {
        let mut field = empty_field();
        field
            .settings()
            .update(|s| {
                s.particle_radius = 1.0;
                s.cursor_radius = 10.0;
            })
            .unwrap();
        field.cursor_mut().pos = Vec2::new(50.0, 50.0);
        // Pitch 5 over [40, 60]^2: 13 of the 25 grid points lie in the disc.
        assert_eq!(field.paint(), 13);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.pos.distance(Vec2::new(50.0, 50.0)) <= 10.0));
    }

    #[test]
    fn pointer_move_paints_only_while_enabled_and_dragging() {
        let mut field = empty_field();
        assert_eq!(field.pointer_move(Vec2::new(100.0, 100.0), Vec2::ZERO), 0);

        field.set_paint_enabled(true);
        assert_eq!(field.pointer_move(Vec2::new(100.0, 100.0), Vec2::ZERO), 0);

        field.pointer_down();
        assert!(field.paint_state().is_painting());
        assert!(field.pointer_move(Vec2::new(100.0, 100.0), Vec2::ZERO) > 0);

        field.pointer_up();
        let count = field.particles().len();
        assert_eq!(field.pointer_move(Vec2::new(120.0, 100.0), Vec2::ZERO), 0);
        assert_eq!(field.particles().len(), count);
    }

    #[test]
    fn paint_with_negative_radius_adds_nothing() {
        let mut field = empty_field();
        field.settings().update(|s| s.cursor_radius = -1.0).unwrap();
        assert_eq!(field.paint(), 0);
    }

    #[test]
    fn paint_uses_radius_changed_since_last_frame() {
        let mut field = empty_field();
        field
            .settings()
            .update(|s| {
                s.particle_radius = 1.0;
                s.cursor_radius = 10.0;
            })
            .unwrap();
        field.set_paint_enabled(true);
        field.pointer_down();
        // No step has run since the change; the disc must still be r = 10.
        assert_eq!(field.pointer_move(Vec2::new(50.0, 50.0), Vec2::ZERO), 13);
        assert_eq!(field.cursor().radius, 10.0);
    }

    #[test]
    fn paint_far_from_origin_terminates_with_bounded_grid() {
        let mut field = empty_field();
        field.set_paint_enabled(true);
        field.pointer_down();
        // Pitch 7.5 is far below one ULP at 1e17; the walk must still end.
        let painted = field.pointer_move(Vec2::new(1e17, 1e17), Vec2::ZERO);
        assert!(painted <= 11 * 11, "painted {painted}");
    }

    #[test]
    fn paint_grid_is_capped_for_tiny_particles() {
        let mut field = empty_field();
        field
            .settings()
            .update(|s| {
                s.particle_radius = 1e-6;
                s.cursor_radius = 500.0;
            })
            .unwrap();
        field.cursor_mut().pos = Vec2::new(0.0, 0.0);
        let painted = field.paint();
        assert!(painted > 0);
        assert!(painted <= (MAX_PAINT_STEPS + 1) * (MAX_PAINT_STEPS + 1));
    }

    // ---- Population changes ----

    #[test]
    fn reset_removes_everything_but_keeps_snapshot() {
        let mut field = ParticleField::from_json(100, 100, 1, &json!({"particle_amount": 10})).unwrap();
        field.save();
        field.reset();
        assert!(field.particles().is_empty());
        assert_eq!(field.saved().map(ParticleSnapshot::len), Some(10));
    }

    #[test]
    fn shuffle_without_save_is_an_error() {
        let mut field = empty_field();
        assert!(matches!(field.shuffle(), Err(EngineError::NoSnapshot)));
    }

    #[test]
    fn save_then_shuffle_preserves_count_and_velocities() {
        let mut field = ParticleField::from_json(320, 240, 11, &json!({"particle_amount": 40})).unwrap();
        field.pointer_move(Vec2::new(160.0, 120.0), Vec2::ZERO);
        field.settings().update(|s| s.cursor_radius = 80.0).unwrap();
        for _ in 0..5 {
            field.step().unwrap();
        }
        let saved: Vec<Vec2> = field.save().particles.iter().map(|s| s.velocity).collect();

        assert_eq!(field.shuffle().unwrap(), 40);
        for (p, v) in field.particles().iter().zip(&saved) {
            assert!((p.velocity.x - v.x).abs() < 1e-12 && (p.velocity.y - v.y).abs() < 1e-12);
            assert!((0.0..=320.0).contains(&p.pos.x));
            assert!((0.0..=240.0).contains(&p.pos.y));
        }
    }

    #[test]
    fn load_snapshot_then_shuffle() {
        let mut field = empty_field();
        let snapshot: ParticleSnapshot = serde_json::from_value(json!({
            "particles": [
                {"position": {"x": 1.0, "y": 2.0}, "velocity": {"x": 0.5, "y": -0.5}}
            ]
        }))
        .unwrap();
        field.load_snapshot(snapshot);
        assert_eq!(field.shuffle().unwrap(), 1);
        assert_eq!(field.particles()[0].velocity, Vec2::new(0.5, -0.5));
    }

    // ---- Engine trait ----

    #[test]
    fn render_clears_draws_particles_then_cursor() {
        let mut field = empty_field();
        field.populate(3);
        let mut r = RecordingRenderer::new();
        field.render(&mut r);
        let calls = r.calls();
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[0], DrawCall::Clear);
        assert!(calls[1..4].iter().all(|c| matches!(c, DrawCall::Fill { .. })));
        assert!(matches!(calls[4], DrawCall::Stroke { radius, .. } if radius == 40.0));
    }

    #[test]
    fn params_reflect_live_settings() {
        let field = empty_field();
        field.settings().update(|s| s.stiffness = 2.5).unwrap();
        assert_eq!(field.params()["stiffness"], 2.5);
        assert!(field.param_schema().get("stiffness").is_some());
    }

    #[test]
    fn engine_is_object_safe() {
        let mut boxed: Box<dyn Engine> = Box::new(empty_field());
        boxed.step().unwrap();
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn particles_stay_finite_under_a_wandering_cursor(
                seed: u64,
                stiffness in 0.5_f64..20.0,
                friction in 0.1_f64..0.95,
                path in prop::collection::vec((0.0_f64..256.0, 0.0_f64..256.0), 1..40),
            ) {
                let params = json!({
                    "particle_amount": 60,
                    "stiffness": stiffness,
                    "friction": friction,
                });
                let mut field = ParticleField::from_json(256, 256, seed, &params).unwrap();
                for (x, y) in path {
                    field.pointer_move(Vec2::new(x, y), Vec2::ZERO);
                    field.step().unwrap();
                }
                for p in field.particles() {
                    prop_assert!(p.pos.is_finite() && p.velocity.is_finite());
                }
            }
        }
    }
}
