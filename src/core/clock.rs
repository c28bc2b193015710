//! Simulation clock and replay mode
//!
//! Every mutating rule takes a `TickContext` snapshot and runs its body only
//! when `is_recording()` holds: unpaused, and in Record mode. Replay is
//! reserved for deterministic playback and looks identical to Idle from the
//! point of view of these rules.

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Whether the simulation is recording live decisions or replaying them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReplayMode {
    Idle,
    #[default]
    Record,
    Replay,
}

/// Monotonic tick counter plus pause flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickClock {
    pub tick: Tick,
    pub is_paused: bool,
}

/// Immutable clock/mode snapshot handed to each rule for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickContext {
    pub tick: Tick,
    pub is_paused: bool,
    pub mode: ReplayMode,
}

impl TickContext {
    /// Gate shared by every mutating rule
    #[inline]
    pub fn is_recording(&self) -> bool {
        !self.is_paused && self.mode == ReplayMode::Record
    }

    /// Convenience: a live recording context at `tick`
    pub fn recording(tick: Tick) -> Self {
        Self {
            tick,
            is_paused: false,
            mode: ReplayMode::Record,
        }
    }
}

/// Process-wide simulation clock and replay mode
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimClock {
    clock: TickClock,
    mode: ReplayMode,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&self) -> Tick {
        self.clock.tick
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused
    }

    pub fn mode(&self) -> ReplayMode {
        self.mode
    }

    /// Snapshot for one tick; rules never re-read the clock mid-pass
    pub fn context(&self) -> TickContext {
        TickContext {
            tick: self.clock.tick,
            is_paused: self.clock.is_paused,
            mode: self.mode,
        }
    }

    /// Advance exactly one step. Returns false while paused.
    pub fn advance(&mut self) -> bool {
        if self.clock.is_paused {
            return false;
        }
        self.clock.tick += 1;
        true
    }

    pub fn pause(&mut self) {
        self.clock.is_paused = true;
    }

    pub fn resume(&mut self) {
        self.clock.is_paused = false;
    }

    pub fn set_mode(&mut self, mode: ReplayMode) {
        if self.mode != mode {
            tracing::debug!("Replay mode {:?} -> {:?} at tick {}", self.mode, mode, self.clock.tick);
        }
        self.mode = mode;
    }

    /// Explicit rewind: the only way the tick counter decreases.
    ///
    /// Switches to Replay so the gated rules stay quiet until the host
    /// returns to Record.
    pub fn rewind_to(&mut self, tick: Tick) {
        tracing::debug!("Rewinding clock from {} to {}", self.clock.tick, tick);
        self.clock.tick = tick;
        self.mode = ReplayMode::Replay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_gate() {
        assert!(TickContext::recording(5).is_recording());

        let paused = TickContext {
            is_paused: true,
            ..TickContext::recording(5)
        };
        assert!(!paused.is_recording());

        for mode in [ReplayMode::Idle, ReplayMode::Replay] {
            let ctx = TickContext {
                mode,
                ..TickContext::recording(5)
            };
            assert!(!ctx.is_recording());
        }
    }

    #[test]
    fn test_advance_respects_pause() {
        let mut clock = SimClock::new();
        assert!(clock.advance());
        assert_eq!(clock.tick(), 1);

        clock.pause();
        assert!(!clock.advance());
        assert_eq!(clock.tick(), 1);

        clock.resume();
        clock.advance();
        assert_eq!(clock.tick(), 2);
    }

    #[test]
    fn test_rewind_switches_to_replay() {
        let mut clock = SimClock::new();
        for _ in 0..10 {
            clock.advance();
        }
        clock.rewind_to(4);
        assert_eq!(clock.tick(), 4);
        assert_eq!(clock.mode(), ReplayMode::Replay);
        assert!(!clock.context().is_recording());
    }

    #[test]
    fn test_context_is_snapshot() {
        let mut clock = SimClock::new();
        let ctx = clock.context();
        clock.advance();
        assert_eq!(ctx.tick, 0);
        assert_eq!(clock.context().tick, 1);
    }
}
