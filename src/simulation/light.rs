//! Traffic light state machine
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::types::{Axis, Phase};

/// Per-phase durations (seconds) for one light's cycle.
///
/// Always contains a duration for all three phases, so a light constructed
/// from a table can never reach a phase it has no timing for.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTable {
    pub go: f32,
    pub caution: f32,
    pub stop: f32,
}

impl PhaseTable {
    pub fn new(go: f32, caution: f32, stop: f32) -> Self {
        Self { go, caution, stop }
    }

    pub fn duration(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Go => self.go,
            Phase::Caution => self.caution,
            Phase::Stop => self.stop,
        }
    }

    /// Total length of one full GO -> CAUTION -> STOP cycle
    pub fn cycle_length(&self) -> f32 {
        self.go + self.caution + self.stop
    }
}

/// A traffic light governing one road axis
#[derive(Debug, Clone)]
pub struct SimLight {
    pub axis: Axis,
    phase: Phase,
    durations: PhaseTable,
    time_remaining: f32,
}

impl SimLight {
    pub fn new(axis: Axis, initial_phase: Phase, durations: PhaseTable) -> Self {
        Self {
            axis,
            phase: initial_phase,
            durations,
            time_remaining: durations.duration(initial_phase),
        }
    }

    /// The currently displayed phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds until the next forced phase transition
    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Advance the light's timer by `delta_secs`.
    ///
    /// When the timer runs out the light steps one position through the
    /// cycle and reloads the new phase's full duration. At most one
    /// transition happens per call, so the timer is never left negative.
    pub fn advance(&mut self, delta_secs: f32) {
        if !delta_secs.is_finite() || delta_secs <= 0.0 {
            return;
        }
        self.time_remaining -= delta_secs;
        if self.time_remaining <= 0.0 {
            self.phase = self.phase.next();
            self.time_remaining = self.durations.duration(self.phase);
        }
    }
}
