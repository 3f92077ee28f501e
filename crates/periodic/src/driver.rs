//! # Frame Driver
//!
//! Ticks the engine on a fixed simulated clock. The driver owns time; the
//! engine never reads a wall clock, so runs are reproducible.
//!
//! ```text
//! step():
//!   clock += interval
//!   engine.frame(clock)      advance tasks, render, apply requests
//!   stats.record(report)
//! ```

use periodic_tween::TickReport;

use crate::config::EngineConfig;
use crate::engine::Engine;

/// Counters accumulated over every frame a driver ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames driven.
    pub frames: u64,
    /// Frames in which the render sink fired.
    pub rendered_frames: u64,
    /// Entity tasks that finished.
    pub completed_tasks: u64,
    /// Deferred requests applied.
    pub applied_requests: u64,
}

impl FrameStats {
    /// Records one frame.
    pub fn record(&mut self, report: &TickReport) {
        self.frames += 1;
        self.rendered_frames += u64::from(report.rendered);
        self.completed_tasks += report.completed as u64;
        self.applied_requests += u64::from(report.applied_request);
    }

    /// Share of frames that rendered.
    #[must_use]
    pub fn render_ratio(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.rendered_frames as f64 / self.frames as f64
    }
}

/// How a [`FrameDriver::run_until_idle`] call ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Frames driven by this call.
    pub frames: u64,
    /// The engine went idle within the frame limit.
    pub settled: bool,
}

/// Drives an [`Engine`] at a fixed frame interval.
#[derive(Clone, Debug)]
pub struct FrameDriver {
    interval_ms: f64,
    clock_ms: f64,
    stats: FrameStats,
}

impl FrameDriver {
    /// Creates a driver starting at time zero.
    #[must_use]
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            clock_ms: 0.0,
            stats: FrameStats::default(),
        }
    }

    /// Creates a driver using `config.frame_interval_ms`.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.frame_interval_ms)
    }

    /// Time of the last frame.
    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Time between frames.
    #[must_use]
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Counters over every frame so far.
    #[must_use]
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Advances the clock one interval and ticks the engine.
    pub fn step(&mut self, engine: &mut Engine) -> TickReport {
        self.clock_ms += self.interval_ms;
        let report = engine.frame(self.clock_ms);
        self.stats.record(&report);
        report
    }

    /// Runs exactly `frames` frames.
    pub fn run_frames(&mut self, engine: &mut Engine, frames: u64) {
        for _ in 0..frames {
            self.step(engine);
        }
    }

    /// Runs until the engine is idle or `max_frames` frames have passed.
    pub fn run_until_idle(&mut self, engine: &mut Engine, max_frames: u64) -> RunOutcome {
        let mut frames = 0;
        while !engine.is_idle() {
            if frames == max_frames {
                tracing::warn!(frames, clock_ms = self.clock_ms, "engine did not settle");
                return RunOutcome { frames, settled: false };
            }
            self.step(engine);
            frames += 1;
        }
        tracing::debug!(frames, clock_ms = self.clock_ms, "engine idle");
        RunOutcome { frames, settled: true }
    }
}
