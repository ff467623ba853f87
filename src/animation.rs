// Render loop state, kept apart from the browser so it can be driven by hand.
// Whatever owns the scheduling calls `frame` once per display refresh and
// only asks for another callback while `frame` returns true.

use crate::field::ParticleField;
use crate::surface::Surface;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    /// Terminal. A remount builds a fresh animation.
    Stopped,
}

/// Smoothed frames per second, from the host's frame timestamps.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    last_timestamp: Option<f64>,
    fps: f64,
}

impl FrameStats {
    const SMOOTHING: f64 = 0.1;

    pub fn record(&mut self, timestamp_ms: f64) {
        if let Some(last) = self.last_timestamp {
            let elapsed = timestamp_ms - last;
            if elapsed > 0.0 {
                let instant = 1000.0 / elapsed;
                self.fps = if self.fps == 0.0 {
                    instant
                } else {
                    self.fps + (instant - self.fps) * FrameStats::SMOOTHING
                };
            }
        }
        self.last_timestamp = Some(timestamp_ms);
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

pub struct Animation<S: Surface> {
    field: ParticleField,
    surface: S,
    state: LoopState,
    frames: u64,
    stats: FrameStats,
}

impl<S: Surface> Animation<S> {
    /// Sizes the surface to the field.
    pub fn new(field: ParticleField, mut surface: S) -> Self {
        let (width, height) = field.size();
        surface.resize(width, height);
        Animation {
            field,
            surface,
            state: LoopState::Idle,
            frames: 0,
            stats: FrameStats::default(),
        }
    }

    /// Returns true when the caller should schedule the first frame.
    pub fn start(&mut self) -> bool {
        match self.state {
            LoopState::Idle => {
                self.state = LoopState::Running;
                log::debug!(
                    "particle field started with {} particles",
                    self.field.particles().len()
                );
                true
            }
            LoopState::Running | LoopState::Stopped => false,
        }
    }

    /// Runs one update-and-draw pass. Returns whether another frame should be
    /// scheduled; a stopped or never-started loop ignores the call.
    pub fn frame(&mut self, timestamp_ms: f64) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.stats.record(timestamp_ms);
        self.field.frame(&mut self.surface);
        self.frames += 1;
        true
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.field.size() == (width, height) {
            return;
        }
        log::debug!("particle field resized to {}x{}", width, height);
        self.field.resize(width, height);
        self.surface.resize(width, height);
    }

    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            log::debug!("particle field stopped after {} frames", self.frames);
        }
        self.state = LoopState::Stopped;
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn frame_rate(&self) -> f64 {
        self.stats.fps()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
