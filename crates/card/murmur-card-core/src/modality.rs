//! Modality adapters: the pluggable input strategies a card can mount.
//!
//! A closed tagged union, selected once from the spec's hook at mount time.
//! Every adapter exposes normalized progress in [0,1] and a monotonic
//! completed flag that only an explicit reset() can clear.

use crate::validator::{TextValidator, TypeRules};

/// Counts qualifying taps toward a target.
#[derive(Clone, Debug)]
pub struct TapCounter {
    count: u32,
    target: u32,
}

impl TapCounter {
    pub fn new(target: u32) -> Self {
        Self { count: 0, target }
    }

    /// Taps past the target are ignored.
    pub fn tap(&mut self) {
        if !self.completed() {
            self.count += 1;
        }
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn progress(&self) -> f32 {
        if self.target == 0 {
            return 1.0;
        }
        (self.count as f32 / self.target as f32).min(1.0)
    }

    #[inline]
    pub fn completed(&self) -> bool {
        self.count >= self.target
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

/// Accrues held time from pointer-down to pointer-up; early release resets
/// the accrual to zero. Accrual only happens inside tick(), so there is no
/// loop to leak when the pointer lifts or the card unmounts.
#[derive(Clone, Debug)]
pub struct HoldTimer {
    held: f32,
    threshold: f32,
    pressing: bool,
    done: bool,
}

impl HoldTimer {
    pub fn new(threshold: f32) -> Self {
        Self {
            held: 0.0,
            threshold: threshold.max(0.0),
            pressing: false,
            done: false,
        }
    }

    pub fn press(&mut self) {
        if !self.done {
            self.pressing = true;
        }
    }

    /// Release or cancel. Early release loses all accrued time.
    pub fn release(&mut self) {
        self.pressing = false;
        if !self.done {
            self.held = 0.0;
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.done || !self.pressing {
            return;
        }
        self.held += dt;
        if self.held >= self.threshold {
            self.done = true;
            self.pressing = false;
        }
    }

    pub fn progress(&self) -> f32 {
        if self.done {
            return 1.0;
        }
        if self.threshold <= 0.0 {
            return 0.0;
        }
        (self.held / self.threshold).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn completed(&self) -> bool {
        self.done
    }

    pub fn reset(&mut self) {
        self.held = 0.0;
        self.pressing = false;
        self.done = false;
    }
}

/// Maps pointer x within track bounds to 0..100 percent. Crossing the
/// threshold is terminal: dragging back does not un-complete.
#[derive(Clone, Debug)]
pub struct DragTrack {
    percent: f32,
    threshold: f32,
    done: bool,
}

impl DragTrack {
    pub fn new(threshold: f32) -> Self {
        Self {
            percent: 0.0,
            threshold: threshold.clamp(0.0, 100.0),
            done: false,
        }
    }

    pub fn move_to(&mut self, x: f32, width: f32) {
        // NaN fails a <= comparison, so the width needs its own finite check.
        if !width.is_finite() || width <= 0.0 || !x.is_finite() {
            return;
        }
        self.percent = (x / width * 100.0).clamp(0.0, 100.0);
        if self.percent >= self.threshold {
            self.done = true;
        }
    }

    #[inline]
    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn progress(&self) -> f32 {
        if self.done {
            return 1.0;
        }
        (self.percent / 100.0).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn completed(&self) -> bool {
        self.done
    }

    pub fn reset(&mut self) {
        self.percent = 0.0;
        self.done = false;
    }
}

/// Witness-and-continue: completes after a fixed dwell with no input.
#[derive(Clone, Debug)]
pub struct ObserveTimer {
    elapsed: f32,
    dwell: f32,
}

impl ObserveTimer {
    pub fn new(dwell: f32) -> Self {
        Self {
            elapsed: 0.0,
            dwell: dwell.max(0.0),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.completed() {
            self.elapsed += dt;
        }
    }

    pub fn progress(&self) -> f32 {
        if self.dwell <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.dwell).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn completed(&self) -> bool {
        self.elapsed >= self.dwell
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// The mounted interaction strategy. Fixed for the card's lifetime.
#[derive(Clone, Debug)]
pub enum Modality {
    Tap(TapCounter),
    Hold(HoldTimer),
    Drag(DragTrack),
    Type(TextValidator),
    Observe(ObserveTimer),
}

impl Modality {
    pub fn new_type(rules: TypeRules, shake_revert: f32) -> Self {
        Modality::Type(TextValidator::new(rules, shake_revert))
    }

    /// Per-frame work while the interactive stage is live.
    pub fn tick(&mut self, dt: f32) {
        match self {
            Modality::Tap(_) | Modality::Drag(_) => {}
            Modality::Hold(h) => h.tick(dt),
            Modality::Type(v) => v.tick(dt),
            Modality::Observe(o) => o.tick(dt),
        }
    }

    pub fn progress(&self) -> f32 {
        match self {
            Modality::Tap(t) => t.progress(),
            Modality::Hold(h) => h.progress(),
            Modality::Drag(d) => d.progress(),
            Modality::Type(v) => {
                if v.accepted() {
                    1.0
                } else {
                    0.0
                }
            }
            Modality::Observe(o) => o.progress(),
        }
    }

    pub fn completed(&self) -> bool {
        match self {
            Modality::Tap(t) => t.completed(),
            Modality::Hold(h) => h.completed(),
            Modality::Drag(d) => d.completed(),
            Modality::Type(v) => v.accepted(),
            Modality::Observe(o) => o.completed(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Modality::Tap(t) => t.reset(),
            Modality::Hold(h) => h.reset(),
            Modality::Drag(d) => d.reset(),
            Modality::Type(v) => v.reset(),
            Modality::Observe(o) => o.reset(),
        }
    }
}
