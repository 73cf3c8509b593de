//! Stage lifecycle: the fixed narrative arc every card moves through.
//!
//! Tick-driven. Entering a stage schedules at most one auto-advance deadline,
//! tagged with the stage's generation token. Leaving the stage by any path
//! bumps the generation and clears the deadline before the next stage
//! schedules its own, so a deadline belonging to a superseded stage can never
//! fire out of order.

use serde::{Deserialize, Serialize};

use crate::config::StageTimings;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Arriving,
    Active,
    Resonant,
    Afterglow,
}

impl Stage {
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Arriving => Some(Stage::Active),
            Stage::Active => Some(Stage::Resonant),
            Stage::Resonant => Some(Stage::Afterglow),
            Stage::Afterglow => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Stage::Arriving => "arriving",
            Stage::Active => "active",
            Stage::Resonant => "resonant",
            Stage::Afterglow => "afterglow",
        }
    }
}

/// A scheduled auto-advance, valid only for the generation that created it.
#[derive(Debug, Clone)]
struct Pending {
    remaining: f32,
    token: u32,
}

#[derive(Debug, Clone)]
pub struct StageLifecycle {
    stage: Stage,
    generation: u32,
    pending: Option<Pending>,
    fired: bool,
    torn_down: bool,
    timings: StageTimings,
}

impl StageLifecycle {
    pub fn new(timings: StageTimings) -> Self {
        let mut lc = Self {
            stage: Stage::Arriving,
            generation: 0,
            pending: None,
            fired: false,
            torn_down: false,
            timings,
        };
        lc.schedule_for(Stage::Arriving);
        lc
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.stage == Stage::Afterglow
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn auto_advance_after(&self, stage: Stage) -> Option<f32> {
        match stage {
            Stage::Arriving => Some(self.timings.arriving),
            Stage::Active => self.timings.active,
            Stage::Resonant => Some(self.timings.resonant),
            Stage::Afterglow => None,
        }
    }

    fn schedule_for(&mut self, stage: Stage) {
        self.pending = self.auto_advance_after(stage).map(|remaining| Pending {
            remaining,
            token: self.generation,
        });
    }

    /// Advance to the next stage, cancelling the current stage's deadline
    /// first. Returns the transition, or None at the terminal stage.
    pub fn advance(&mut self) -> Option<(Stage, Stage)> {
        if self.torn_down {
            return None;
        }
        let Some(next) = self.stage.next() else {
            log::debug!("advance past terminal stage suppressed");
            return None;
        };
        // Cancel this stage's timers before the next stage schedules its own.
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;

        let from = self.stage;
        self.stage = next;
        self.schedule_for(next);
        Some((from, next))
    }

    /// Drive scheduled deadlines forward by dt. A large dt may cascade
    /// through several stages; each transition is appended to `out`.
    pub fn tick(&mut self, dt: f32, out: &mut Vec<(Stage, Stage)>) {
        if self.torn_down {
            return;
        }
        let mut budget = dt;
        loop {
            let fire = match self.pending.as_mut() {
                Some(p) if p.token == self.generation => {
                    p.remaining -= budget;
                    if p.remaining <= 0.0 {
                        budget = -p.remaining;
                        true
                    } else {
                        false
                    }
                }
                Some(_) => {
                    // Stale token from a superseded stage: drop, never fire.
                    self.pending = None;
                    false
                }
                None => false,
            };
            if !fire {
                break;
            }
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Exactly-once completion latch. True only for the first call after the
    /// terminal stage is entered.
    pub fn take_completion(&mut self) -> bool {
        if self.torn_down || self.stage != Stage::Afterglow {
            return false;
        }
        if self.fired {
            log::debug!("duplicate terminal-stage completion suppressed");
            return false;
        }
        self.fired = true;
        true
    }

    /// Cancel everything; all further ticks and advances are no-ops.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    /// Return to a fresh Arriving state. Revives a torn-down lifecycle; the
    /// host owns instance reuse.
    pub fn reset(&mut self) {
        self.stage = Stage::Arriving;
        self.generation = self.generation.wrapping_add(1);
        self.fired = false;
        self.torn_down = false;
        self.schedule_for(Stage::Arriving);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timings(arriving: f32, active: Option<f32>, resonant: f32) -> StageTimings {
        StageTimings {
            arriving,
            active,
            resonant,
        }
    }

    #[test]
    fn stages_advance_in_order_by_deadline() {
        let mut lc = StageLifecycle::new(timings(1.0, Some(1.0), 1.0));
        let mut out = Vec::new();
        lc.tick(0.5, &mut out);
        assert!(out.is_empty());
        assert_eq!(lc.stage(), Stage::Arriving);
        lc.tick(0.6, &mut out);
        assert_eq!(out, vec![(Stage::Arriving, Stage::Active)]);
    }

    #[test]
    fn large_dt_cascades_without_skipping() {
        let mut lc = StageLifecycle::new(timings(0.1, Some(0.1), 0.1));
        let mut out = Vec::new();
        lc.tick(10.0, &mut out);
        assert_eq!(
            out,
            vec![
                (Stage::Arriving, Stage::Active),
                (Stage::Active, Stage::Resonant),
                (Stage::Resonant, Stage::Afterglow),
            ]
        );
        assert!(lc.take_completion());
        assert!(!lc.take_completion());
    }

    #[test]
    fn manual_advance_cancels_pending_deadline() {
        let mut lc = StageLifecycle::new(timings(5.0, None, 5.0));
        // Manual advance out of Arriving while its 5s deadline is pending.
        assert_eq!(lc.advance(), Some((Stage::Arriving, Stage::Active)));
        // Ticking far past the old deadline must not advance Active, which
        // has no auto-advance of its own.
        let mut out = Vec::new();
        lc.tick(60.0, &mut out);
        assert!(out.is_empty());
        assert_eq!(lc.stage(), Stage::Active);
    }

    #[test]
    fn teardown_poisons_everything() {
        let mut lc = StageLifecycle::new(timings(0.1, Some(0.1), 0.1));
        lc.teardown();
        let mut out = Vec::new();
        lc.tick(10.0, &mut out);
        assert!(out.is_empty());
        assert_eq!(lc.advance(), None);
        assert!(!lc.take_completion());
    }

    #[test]
    fn reset_restores_fresh_arrival() {
        let mut lc = StageLifecycle::new(timings(0.1, Some(0.1), 0.1));
        let mut out = Vec::new();
        lc.tick(10.0, &mut out);
        assert!(lc.take_completion());
        lc.reset();
        assert_eq!(lc.stage(), Stage::Arriving);
        out.clear();
        lc.tick(10.0, &mut out);
        assert_eq!(out.len(), 3);
        assert!(lc.take_completion());
    }
}
