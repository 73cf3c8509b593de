//! Canned card-spec fixtures shared by integration tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    cards: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = fixtures_root().join(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

/// Raw JSON for a named card fixture.
pub fn card_spec_json(name: &str) -> Result<String> {
    let rel = MANIFEST
        .cards
        .get(name)
        .ok_or_else(|| anyhow!("unknown card fixture '{name}'"))?;
    read_to_string(rel)
}

/// All card fixture names in the manifest.
pub fn card_fixture_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = MANIFEST.cards.keys().map(|s| s.as_str()).collect();
    names.sort_unstable();
    names
}
