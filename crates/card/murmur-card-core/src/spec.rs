//! Canonical card spec: the compact categorical description a host supplies
//! once per mounted card. All enums are closed; the lenient JSON loader in
//! spec_json.rs maps unknown keys onto defaults before this model is built.

use serde::{Deserialize, Serialize};

/// Base theme family.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Signature {
    #[default]
    Ember,
    Tide,
    Meadow,
    Aurora,
    Umbra,
}

impl Signature {
    /// Total mapping from a raw key; unknown keys degrade to the default.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "ember" => Signature::Ember,
            "tide" => Signature::Tide,
            "meadow" => Signature::Meadow,
            "aurora" => Signature::Aurora,
            "umbra" => Signature::Umbra,
            other => {
                log::warn!("unknown signature key '{other}', falling back to ember");
                Signature::Ember
            }
        }
    }
}

/// Visual shape/motif.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    #[default]
    Orb,
    Bloom,
    Thread,
    Prism,
    Vessel,
}

impl Form {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "orb" => Form::Orb,
            "bloom" => Form::Bloom,
            "thread" => Form::Thread,
            "prism" => Form::Prism,
            "vessel" => Form::Vessel,
            other => {
                log::warn!("unknown form key '{other}', falling back to orb");
                Form::Orb
            }
        }
    }
}

/// Time-of-day inflection on the palette.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Chrono {
    Dawn,
    #[default]
    Day,
    Dusk,
    Night,
}

impl Chrono {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "dawn" => Chrono::Dawn,
            "day" => Chrono::Day,
            "dusk" => Chrono::Dusk,
            "night" => Chrono::Night,
            other => {
                log::warn!("unknown chrono key '{other}', falling back to day");
                Chrono::Day
            }
        }
    }
}

/// Cognitive/behavioral/emotional category; also drives labeling.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Kbe {
    #[default]
    Knowing,
    Believing,
    Embodying,
}

impl Kbe {
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "knowing" => Kbe::Knowing,
            "believing" => Kbe::Believing,
            "embodying" => Kbe::Embodying,
            other => {
                log::warn!("unknown kbe key '{other}', falling back to knowing");
                Kbe::Knowing
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Kbe::Knowing => "knowing",
            Kbe::Believing => "believing",
            Kbe::Embodying => "embodying",
        }
    }
}

/// Which interaction modality mounts for the card's lifetime.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Hook {
    Tap,
    Hold,
    Drag,
    Type,
    #[default]
    Observe,
}

impl Hook {
    /// Unknown hooks degrade to observe: it needs no input, so a
    /// misconfigured card can still complete.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "tap" => Hook::Tap,
            "hold" => Hook::Hold,
            "drag" => Hook::Drag,
            "type" => Hook::Type,
            "observe" => Hook::Observe,
            other => {
                log::warn!("unknown hook key '{other}', falling back to observe");
                Hook::Observe
            }
        }
    }
}

/// Immutable per-card spec, supplied once at mount.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardSpec {
    pub signature: Signature,
    pub form: Form,
    pub chrono: Chrono,
    pub kbe: Kbe,
    pub hook: Hook,
    /// Seeds deterministic visual variation (sparkles, hue jitter).
    #[serde(default)]
    pub specimen_seed: u64,
    /// Marks a terminal/summary-style card.
    #[serde(default)]
    pub is_seal: bool,
}
