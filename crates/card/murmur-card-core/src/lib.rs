//! Murmur Card Core (host-agnostic)
//!
//! The interaction engine behind Murmur's animated cards: a deterministic
//! theme compositor, a shared stage lifecycle, pluggable input modalities
//! (tap / hold / drag / type / observe), and the text-validation state
//! machine reused by type cards. Hosts drive everything through
//! Engine::update(dt, inputs) and react to the returned outputs; nothing in
//! this crate renders, persists, or touches ambient timers.

pub mod config;
pub mod engine;
pub mod ids;
pub mod inputs;
pub mod lifecycle;
pub mod modality;
pub mod outputs;
pub mod rng;
pub mod spec;
pub mod spec_json;
pub mod theme;
pub mod validator;
pub mod value;

// Re-exports for consumers (hosts)
pub use config::{Config, StageTimings};
pub use engine::{Card, CardCfg, Engine};
pub use ids::CardId;
pub use inputs::{CardCommand, Inputs};
pub use lifecycle::{Stage, StageLifecycle};
pub use modality::{DragTrack, HoldTimer, Modality, ObserveTimer, TapCounter};
pub use outputs::{CardEvent, Change, Outputs};
pub use spec::{CardSpec, Chrono, Form, Hook, Kbe, Signature};
pub use spec_json::{parse_card_spec_json, SpecError};
pub use theme::{compose, CopyBundle, Palette, Sparkle, Theme};
pub use validator::{SubmitOutcome, TextStatus, TextValidator, TypeRules};
pub use value::{Value, ValueKind};
