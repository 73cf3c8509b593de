//! Core configuration for murmur-card-core.

use serde::{Deserialize, Serialize};

/// Auto-advance durations (seconds) for each non-terminal stage.
/// `active: None` means the interactive stage waits for its modality (or a
/// manual advance) and never times out on its own.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StageTimings {
    pub arriving: f32,
    #[serde(default)]
    pub active: Option<f32>,
    pub resonant: f32,
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            arriving: 1.2,
            active: None,
            resonant: 2.4,
        }
    }
}

/// Engine-wide defaults. Per-card overrides live in `CardCfg`.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub timings: StageTimings,

    /// Seconds a rejected submission stays in its shake state before
    /// self-healing back to typing.
    pub shake_revert: f32,

    /// Modality defaults.
    pub tap_target: u32,
    pub hold_threshold: f32,
    pub drag_threshold: f32,
    pub observe_dwell: f32,

    /// Maximum events emitted per tick; overflow carries over to the next
    /// tick so no event is ever lost.
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timings: StageTimings::default(),
            shake_revert: 0.8,
            tap_target: 3,
            hold_threshold: 1.5,
            drag_threshold: 96.0,
            observe_dwell: 4.0,
            max_events_per_tick: 1024,
        }
    }
}
