use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::color::Rgba;

/// How streak directions are spread around the circle, and which
/// sampling kernel stretches them.
///
/// Serialized as `"full_circle"` / `"half_circle"`; presets may also use
/// the integer switch `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "PassModeRepr")]
#[repr(i32)]
pub enum PassMode {
    /// Directions cover the full circle; each streak is one-sided.
    FullCircle = 0,
    /// Directions cover half the circle; each streak is sampled both ways.
    HalfCircle = 1,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PassModeRepr {
    Index(i64),
    Name(String),
}

impl TryFrom<PassModeRepr> for PassMode {
    type Error = String;

    fn try_from(repr: PassModeRepr) -> Result<Self, Self::Error> {
        match repr {
            PassModeRepr::Index(i) => i32::try_from(i)
                .ok()
                .and_then(PassMode::from_i32)
                .ok_or_else(|| format!("pass mode {i} is not 0 or 1")),
            PassModeRepr::Name(name) => match name.as_str() {
                "full_circle" => Ok(PassMode::FullCircle),
                "half_circle" => Ok(PassMode::HalfCircle),
                _ => Err(format!("unknown pass mode `{name}`")),
            },
        }
    }
}

impl PassMode {
    pub const ALL: [PassMode; 2] = [PassMode::FullCircle, PassMode::HalfCircle];

    /// Map the legacy integer switch. Only 0 and 1 were ever implemented.
    pub fn from_i32(val: i32) -> Option<Self> {
        match val {
            0 => Some(PassMode::FullCircle),
            1 => Some(PassMode::HalfCircle),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PassMode::FullCircle => "Full Circle",
            PassMode::HalfCircle => "Half Circle",
        }
    }

    /// Angle added between consecutive streaks, in radians.
    pub fn angle_step(&self, num_streaks: u32) -> f32 {
        if num_streaks == 0 {
            return 0.0;
        }
        match self {
            PassMode::FullCircle => TAU / num_streaks as f32,
            PassMode::HalfCircle => PI / num_streaks as f32,
        }
    }
}

/// Tunable parameters of the star effect.
///
/// Values are expected to be inside the ranges of
/// [`parameter_specs`](crate::parameter::parameter_specs); use
/// [`EffectParameters::clamped`] on anything user-authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectParameters {
    pub pass_mode: PassMode,
    /// Number of streak directions. Range: 0..=8
    pub num_streaks: u32,
    /// Streak brightness, gamma space. Range: 0.0..10.0
    pub intensity: f32,
    /// Per-tap falloff, gamma space. Range: 0.5..0.99
    pub attenuation: f32,
    /// Brightness cutoff. Range: 0.0..50.0
    pub threshold: f32,
    /// Knee width as a fraction of the threshold. Range: 0.0..1.0
    pub soft_threshold: f32,
    /// Scratch buffer scale relative to the source. Range: 0.1..1.0
    pub resolution: f32,
    /// Direction of the first streak in degrees. Range: 0.0..360.0
    pub start_angle: f32,
    /// Stretch passes per direction. Range: 1..=4
    pub iteration_count: u32,
    /// Samples per stretch pass. Range: 1..=30
    pub tap_count: u32,
    pub base_color: Rgba,
    pub color_aberration: Rgba,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            pass_mode: PassMode::HalfCircle,
            num_streaks: 3,
            intensity: 1.5,
            attenuation: 0.95,
            threshold: 3.0,
            soft_threshold: 0.5,
            resolution: 0.25,
            start_angle: 30.0,
            iteration_count: 2,
            tap_count: 20,
            base_color: Rgba::WHITE,
            color_aberration: Rgba::RED,
        }
    }
}

impl EffectParameters {
    /// Start angle converted to radians.
    pub fn start_angle_radians(&self) -> f32 {
        self.start_angle * PI / 180.0
    }

    /// Copy with every numeric field clamped into its declared range.
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        for spec in crate::parameter::parameter_specs() {
            let v = spec.clamp((spec.read)(&out));
            (spec.write)(&mut out, v);
        }
        out
    }
}
