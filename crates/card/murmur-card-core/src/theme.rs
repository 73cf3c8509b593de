//! ThemeCompositor: pure mapping from a CardSpec to a palette, copy bundle,
//! and seeded sparkle layout.
//!
//! `compose` is total and deterministic: identical specs yield
//! bitwise-identical themes. The engine memoizes the result at mount, but
//! re-invoking is safe and cheap.

use serde::{Deserialize, Serialize};

use crate::rng::Xorshift64;
use crate::spec::{CardSpec, Chrono, Form, Hook, Kbe, Signature};

/// RGBA in linear 0..1.
pub type Color = [f32; 4];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Palette {
    pub primary: Color,
    pub accent: Color,
    pub shadow: Color,
    pub text: Color,
    pub text_faint: Color,
    pub stroke: Color,
}

/// One decorative glint, positioned in normalized card space.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Sparkle {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    /// Animation phase offset in [0,1); hosts use it to desynchronize twinkle.
    pub phase: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CopyBundle {
    /// Short line shown while the card arrives.
    pub arrival: String,
    /// Instruction for the mounted modality.
    pub prompt: String,
    /// Line shown during the resonant stage.
    pub resonance: String,
    /// Closing line; seals get a summary variant.
    pub afterglow: String,
    /// Category label (knowing/believing/embodying).
    pub label: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    pub palette: Palette,
    pub copy: CopyBundle,
    pub sparkles: Vec<Sparkle>,
}

/// Compose a theme from a spec. Pure; no ambient randomness.
pub fn compose(spec: &CardSpec) -> Theme {
    let mut rng = Xorshift64::new(spec.specimen_seed);

    let (mut h, mut s, mut l) = base_hsl(spec.signature);
    // Seed-driven hue jitter keeps sibling cards from looking stamped out,
    // without breaking reproducibility.
    h += (rng.next_f32() - 0.5) * 0.04;

    match spec.chrono {
        Chrono::Dawn => {
            h += 0.02;
            l += 0.06;
        }
        Chrono::Day => {
            l += 0.10;
        }
        Chrono::Dusk => {
            h -= 0.03;
            l -= 0.04;
        }
        Chrono::Night => {
            s = (s - 0.08).max(0.0);
            l -= 0.14;
        }
    }
    let l = l.clamp(0.08, 0.92);

    let primary = rgba(h, s, l);
    let accent = rgba(h + 0.08, (s + 0.15).min(1.0), (l + 0.12).min(0.92));
    let shadow = rgba(h, s * 0.6, (l - 0.30).max(0.05));
    let text = rgba(h, 0.12, 0.94);
    let mut text_faint = text;
    text_faint[3] = 0.62;
    let stroke = rgba(h, s * 0.5, (l - 0.18).max(0.06));

    let palette = Palette {
        primary,
        accent,
        shadow,
        text,
        text_faint,
        stroke,
    };

    let count = sparkle_count(spec.form) + (rng.next_u64() % 3) as usize;
    let mut sparkles = Vec::with_capacity(count);
    for _ in 0..count {
        sparkles.push(Sparkle {
            x: rng.next_f32(),
            y: rng.next_f32(),
            scale: rng.range_f32(0.5, 1.5),
            phase: rng.next_f32(),
        });
    }

    Theme {
        palette,
        copy: copy_bundle(spec),
        sparkles,
    }
}

fn base_hsl(signature: Signature) -> (f32, f32, f32) {
    match signature {
        Signature::Ember => (0.06, 0.72, 0.52),
        Signature::Tide => (0.55, 0.58, 0.46),
        Signature::Meadow => (0.30, 0.48, 0.44),
        Signature::Aurora => (0.78, 0.54, 0.50),
        Signature::Umbra => (0.66, 0.22, 0.34),
    }
}

fn sparkle_count(form: Form) -> usize {
    match form {
        Form::Orb => 5,
        Form::Bloom => 8,
        Form::Thread => 3,
        Form::Prism => 6,
        Form::Vessel => 4,
    }
}

fn copy_bundle(spec: &CardSpec) -> CopyBundle {
    let arrival = match spec.kbe {
        Kbe::Knowing => "Something small is worth noticing.",
        Kbe::Believing => "Hold this thought a moment.",
        Kbe::Embodying => "Let it land in the body.",
    };
    let prompt = match spec.hook {
        Hook::Tap => "Tap, gently, until it settles.",
        Hook::Hold => "Rest a finger here and stay.",
        Hook::Drag => "Draw it across, all the way.",
        Hook::Type => "Put it in your own words.",
        Hook::Observe => "Nothing to do. Just watch.",
    };
    let resonance = match spec.kbe {
        Kbe::Knowing => "Notice what that changes.",
        Kbe::Believing => "It can be true quietly.",
        Kbe::Embodying => "Stay with the feeling.",
    };
    let afterglow = if spec.is_seal {
        "That closes this set. Carry it with you."
    } else {
        "Carried. On to the next."
    };

    CopyBundle {
        arrival: arrival.to_string(),
        prompt: prompt.to_string(),
        resonance: resonance.to_string(),
        afterglow: afterglow.to_string(),
        label: spec.kbe.label().to_string(),
    }
}

/// HSL (0..1) to RGBA (0..1, alpha 1).
fn rgba(h: f32, s: f32, l: f32) -> Color {
    let (r, g, b) = hsl_to_rgb(h, s, l);
    [r, g, b, 1.0]
}

/// HSL (0..1) to RGB (0..1)
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let h = ((h % 1.0) + 1.0) % 1.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return (l, l, l);
    }
    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);
    (r, g, b)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}
