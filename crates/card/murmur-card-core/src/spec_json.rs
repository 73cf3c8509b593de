//! Lenient JSON loader for card specs.
//!
//! Authoring tools emit shorthand specs with free-text categorical keys;
//! this maps them onto the closed enums in spec.rs. Unknown keys degrade to
//! defaults (with a warn log); malformed JSON is the only hard error.

use serde::Deserialize;
use thiserror::Error;

use crate::spec::{CardSpec, Chrono, Form, Hook, Kbe, Signature};

/// Errors produced while loading authored card-spec JSON.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("card spec parse error: {0}")]
    Parse(String),
}

/// Parse authored JSON into a canonical CardSpec.
pub fn parse_card_spec_json(s: &str) -> Result<CardSpec, SpecError> {
    let raw: RawSpec = serde_json::from_str(s).map_err(|e| SpecError::Parse(e.to_string()))?;
    Ok(CardSpec {
        signature: Signature::from_key(&raw.signature),
        form: Form::from_key(&raw.form),
        chrono: Chrono::from_key(&raw.chrono),
        kbe: Kbe::from_key(&raw.kbe),
        hook: Hook::from_key(&raw.hook),
        specimen_seed: raw.specimen_seed,
        is_seal: raw.is_seal,
    })
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct RawSpec {
    pub signature: String,
    pub form: String,
    pub chrono: String,
    pub kbe: String,
    pub hook: String,
    #[serde(default)]
    #[serde(rename = "specimenSeed")]
    pub specimen_seed: u64,
    #[serde(default)]
    #[serde(rename = "isSeal")]
    pub is_seal: bool,
}
