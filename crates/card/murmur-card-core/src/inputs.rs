//! Input contracts for the core engine.
//!
//! Hosts collect raw UI events into per-card commands and pass them into
//! Engine::update() each tick.

use serde::{Deserialize, Serialize};

use crate::ids::CardId;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Per-card commands applied before stepping.
    #[serde(default)]
    pub card_cmds: Vec<CardCommand>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CardCommand {
    /// One qualifying tap (tap modality).
    Tap {
        card: CardId,
    },
    /// Pointer down on the hold surface.
    PointerDown {
        card: CardId,
    },
    /// Pointer up; early release resets hold accrual.
    PointerUp {
        card: CardId,
    },
    /// Pointer cancel; treated like a release.
    PointerCancel {
        card: CardId,
    },
    /// Pointer moved along the drag track. `width` is the track extent in
    /// the same units as `x`; layout belongs to the host.
    PointerMove {
        card: CardId,
        x: f32,
        width: f32,
    },
    /// Replace the current text of a type card.
    SetText {
        card: CardId,
        text: String,
    },
    /// Submit the current text for validation.
    Submit {
        card: CardId,
    },
    /// Manual stage advance (host skip, or the source's tap-to-continue).
    Advance {
        card: CardId,
    },
    /// Return the card to a fresh Arriving state.
    Reset {
        card: CardId,
    },
}

impl CardCommand {
    pub fn card(&self) -> CardId {
        match *self {
            CardCommand::Tap { card }
            | CardCommand::PointerDown { card }
            | CardCommand::PointerUp { card }
            | CardCommand::PointerCancel { card }
            | CardCommand::PointerMove { card, .. }
            | CardCommand::SetText { card, .. }
            | CardCommand::Submit { card }
            | CardCommand::Advance { card }
            | CardCommand::Reset { card } => card,
        }
    }
}
