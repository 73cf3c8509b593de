//! Phrase-matching text validator used by "type" interactions.
//!
//! Submission returns a discriminated outcome instead of invoking callbacks;
//! the engine turns outcomes into events. The shake state self-heals after a
//! fixed delay, driven by tick(dt) like every other deadline in the crate.

use serde::{Deserialize, Serialize};

/// Host-supplied matching rules. All fields defaulted so partial JSON works.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeRules {
    #[serde(default)]
    pub accept_phrases: Vec<String>,
    #[serde(default)]
    pub reject_phrases: Vec<String>,
    /// Require exact (case-insensitive) equality with an accept phrase
    /// instead of substring containment.
    #[serde(default)]
    pub exact_match: bool,
    /// Minimum trimmed length (chars) before a submit is considered at all.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

fn default_min_length() -> usize {
    1
}

impl Default for TypeRules {
    fn default() -> Self {
        Self {
            accept_phrases: Vec::new(),
            reject_phrases: Vec::new(),
            exact_match: false,
            min_length: default_min_length(),
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextStatus {
    Idle,
    Typing,
    Accepted,
    Rejected,
}

/// Result of one submit() call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Below the length gate, or already accepted. No state change.
    Ignored,
    Accepted,
    Rejected,
}

#[derive(Clone, Debug)]
pub struct TextValidator {
    rules: TypeRules,
    value: String,
    status: TextStatus,
    shake_count: u32,
    accepted: bool,
    /// Seconds until a Rejected status self-heals back to Typing.
    revert_in: Option<f32>,
    shake_revert: f32,
}

impl TextValidator {
    pub fn new(rules: TypeRules, shake_revert: f32) -> Self {
        Self {
            rules,
            value: String::new(),
            status: TextStatus::Idle,
            shake_count: 0,
            accepted: false,
            revert_in: None,
            shake_revert,
        }
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn status(&self) -> TextStatus {
        self.status
    }

    #[inline]
    pub fn shake_count(&self) -> u32 {
        self.shake_count
    }

    #[inline]
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    /// Record the current input. No validation happens here; that is
    /// deferred to submit().
    pub fn on_change(&mut self, text: &str) {
        if self.accepted {
            return;
        }
        self.value.clear();
        self.value.push_str(text);
        self.status = if self.value.is_empty() {
            TextStatus::Idle
        } else {
            TextStatus::Typing
        };
    }

    /// Validate the current value. Order matters: length gate, explicit
    /// reject, accept (or implicit reject), free-form.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.accepted {
            return SubmitOutcome::Ignored;
        }
        let trimmed = self.value.trim();
        if trimmed.chars().count() < self.rules.min_length {
            return SubmitOutcome::Ignored;
        }
        // A fresh submit supersedes any pending shake recovery.
        self.revert_in = None;

        let lower = trimmed.to_lowercase();
        let rejected = self
            .rules
            .reject_phrases
            .iter()
            .any(|p| !p.is_empty() && lower.contains(&p.to_lowercase()));
        if rejected {
            // Reject takes precedence over accept, even when the same input
            // also satisfies an accept phrase.
            return self.reject();
        }

        if !self.rules.accept_phrases.is_empty() {
            let matched = if self.rules.exact_match {
                self.rules
                    .accept_phrases
                    .iter()
                    .any(|p| lower == p.to_lowercase())
            } else {
                self.rules
                    .accept_phrases
                    .iter()
                    .any(|p| !p.is_empty() && lower.contains(&p.to_lowercase()))
            };
            if matched {
                self.accept()
            } else {
                // No accept phrase matched: implicit rejection, same shake
                // path as an explicit one.
                self.reject()
            }
        } else {
            // Free-form mode: anything past the length gate is accepted.
            self.accept()
        }
    }

    fn accept(&mut self) -> SubmitOutcome {
        self.status = TextStatus::Accepted;
        self.accepted = true;
        self.revert_in = None;
        SubmitOutcome::Accepted
    }

    fn reject(&mut self) -> SubmitOutcome {
        self.status = TextStatus::Rejected;
        self.shake_count += 1;
        self.revert_in = Some(self.shake_revert);
        SubmitOutcome::Rejected
    }

    /// Drive the shake auto-revert deadline.
    pub fn tick(&mut self, dt: f32) {
        if let Some(remaining) = self.revert_in.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.revert_in = None;
                if self.status == TextStatus::Rejected {
                    self.status = TextStatus::Typing;
                }
            }
        }
    }

    /// Back to defaults; cancels any pending auto-revert so a stale deadline
    /// cannot resurrect Typing after a fresh reset.
    pub fn reset(&mut self) {
        self.value.clear();
        self.status = TextStatus::Idle;
        self.shake_count = 0;
        self.accepted = false;
        self.revert_in = None;
    }
}
