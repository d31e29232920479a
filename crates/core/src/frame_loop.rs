//! Cooperative per-frame driver: run one step, render, request the next.
//!
//! The host owns the clock. A [`FrameHost`] yields once per display tick and
//! reports when the owning view is gone; a [`Teardown`] token lets any other
//! part of the host stop the loop between frames. After teardown no further
//! frame runs.

use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;

use crate::engine::Engine;
use crate::error::EngineError;
use crate::surface::Renderer;

/// Scheduling primitive supplied by the host environment.
pub trait FrameHost {
    /// Waits for the next display tick. Returns `false` once the host will
    /// not schedule any more frames.
    fn next_frame(&mut self) -> bool;
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct Teardown(Rc<Cell<bool>>);

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the loop before its next frame.
    pub fn signal(&self) {
        self.0.set(true);
    }

    pub fn is_signalled(&self) -> bool {
        self.0.get()
    }
}

/// Outcome of a single [`FrameLoop::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame ran; the host should schedule another.
    Continue,
    /// Teardown was signalled; nothing ran.
    Stopped,
}

/// Drives an [`Engine`] one frame at a time.
#[derive(Debug, Default)]
pub struct FrameLoop {
    teardown: Teardown,
    frames: u64,
}

impl FrameLoop {
    pub fn new(teardown: Teardown) -> Self {
        Self {
            teardown,
            frames: 0,
        }
    }

    /// A handle that stops this loop when signalled.
    pub fn teardown(&self) -> Teardown {
        self.teardown.clone()
    }

    /// Number of frames executed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame (`step` then `render`) unless teardown was signalled.
    pub fn tick<E: Engine + ?Sized>(
        &mut self,
        engine: &mut E,
        renderer: &mut dyn Renderer,
    ) -> Result<FrameStatus, EngineError> {
        if self.teardown.is_signalled() {
            return Ok(FrameStatus::Stopped);
        }
        engine.step()?;
        engine.render(renderer);
        self.frames += 1;
        trace!(frame = self.frames, "frame complete");
        Ok(FrameStatus::Continue)
    }

    /// Ticks once per host frame until the host stops or teardown is
    /// signalled. Returns the total frame count.
    pub fn run<H, E>(
        &mut self,
        host: &mut H,
        engine: &mut E,
        renderer: &mut dyn Renderer,
    ) -> Result<u64, EngineError>
    where
        H: FrameHost + ?Sized,
        E: Engine + ?Sized,
    {
        while host.next_frame() {
            if self.tick(engine, renderer)? == FrameStatus::Stopped {
                break;
            }
        }
        Ok(self.frames)
    }
}

/// Host that grants a fixed number of frames, for headless runs.
#[derive(Debug, Clone)]
pub struct FrameBudget {
    remaining: usize,
}

impl FrameBudget {
    pub fn new(frames: usize) -> Self {
        Self { remaining: frames }
    }
}

impl FrameHost for FrameBudget {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
