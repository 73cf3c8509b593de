//! Output contracts from the core engine.
//!
//! Outputs carry per-tick value changes keyed by a small string key, plus a
//! separate list of semantic events. Hosts apply changes to their UI tree
//! and route events (completion, text outcomes) to product code.

use serde::{Deserialize, Serialize};

use crate::ids::CardId;
use crate::lifecycle::Stage;
use crate::value::Value;

/// One changed value for a given card this tick.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Change {
    pub card: CardId,
    pub key: String,
    pub value: Value,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum CardEvent {
    StageChanged {
        card: CardId,
        from: Stage,
        to: Stage,
    },
    /// The mounted modality reached completion. Fires once per mount (or per
    /// reset).
    ModalityCompleted {
        card: CardId,
    },
    TextAccepted {
        card: CardId,
        /// Raw, untrimmed input.
        text: String,
    },
    TextRejected {
        card: CardId,
        text: String,
        /// Monotonic per-card rejection counter; hosts key shake replays on it.
        shake_count: u32,
    },
    /// Terminal-stage completion. Fires exactly once per card instance.
    CardCompleted {
        card: CardId,
    },
}

impl CardEvent {
    /// The card this event belongs to.
    pub fn card(&self) -> CardId {
        match *self {
            CardEvent::StageChanged { card, .. }
            | CardEvent::ModalityCompleted { card }
            | CardEvent::TextAccepted { card, .. }
            | CardEvent::TextRejected { card, .. }
            | CardEvent::CardCompleted { card } => card,
        }
    }
}

/// Outputs returned by Engine::update().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CardEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: CardEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }
}
