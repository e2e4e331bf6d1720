use crate::error::ParameterError;
use crate::settings::{EffectParameters, PassMode};

/// Descriptor for one numeric effect parameter.
///
/// The table returned by [`parameter_specs`] is the single source of the
/// ranges that authoring surfaces (presets, CLI overrides) clamp to. Each
/// entry also carries the accessors for its field.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub min: f32,
    pub max: f32,
    pub default_value: f32,
    /// 1.0 for integer-valued parameters.
    pub step: f32,
    pub read: fn(&EffectParameters) -> f32,
    /// Stores the value as given; callers clamp first.
    pub write: fn(&mut EffectParameters, f32),
}

impl ParameterSpec {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        default_value: f32,
        min: f32,
        max: f32,
        read: fn(&EffectParameters) -> f32,
        write: fn(&mut EffectParameters, f32),
    ) -> Self {
        Self { id, name, description, min, max, default_value, step: 0.0001, read, write }
    }

    const fn integer(self) -> Self {
        Self { step: 1.0, ..self }
    }

    pub fn is_integer(&self) -> bool {
        self.step >= 1.0
    }

    /// Clamp into range, rounding integer parameters to the nearest step.
    pub fn clamp(&self, value: f32) -> f32 {
        let v = if value.is_nan() { self.default_value } else { value };
        let v = v.clamp(self.min, self.max);
        if self.is_integer() { v.round() } else { v }
    }

    /// Get the normalized value in [0, 1].
    pub fn normalized_value(&self, value: f32) -> f32 {
        if self.max == self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Map a normalized [0, 1] input back into parameter units.
    pub fn from_normalized(&self, normalized: f32) -> f32 {
        let clamped = normalized.clamp(0.0, 1.0);
        self.clamp(self.min + clamped * (self.max - self.min))
    }
}

static SPECS: [ParameterSpec; 10] = [
    ParameterSpec::new(
        "passMode", "Pass Mode",
        "0 spreads streaks over the full circle, 1 over half with two-sided sampling.",
        1.0, 0.0, 1.0,
        |p| p.pass_mode as i32 as f32,
        |p, v| p.pass_mode = PassMode::from_i32(v as i32).unwrap_or(PassMode::HalfCircle),
    )
    .integer(),
    ParameterSpec::new(
        "numStreaks", "Streaks", "Number of streak directions.", 3.0, 0.0, 8.0,
        |p| p.num_streaks as f32,
        |p, v| p.num_streaks = v as u32,
    )
    .integer(),
    ParameterSpec::new(
        "intensity", "Intensity", "Brightness of the streaks.", 1.5, 0.0, 10.0,
        |p| p.intensity,
        |p, v| p.intensity = v,
    ),
    ParameterSpec::new(
        "attenuation", "Attenuation", "Falloff per sample along a streak.", 0.95, 0.5, 0.99,
        |p| p.attenuation,
        |p, v| p.attenuation = v,
    ),
    ParameterSpec::new(
        "threshold", "Threshold", "Brightness above which pixels emit streaks.", 3.0, 0.0, 50.0,
        |p| p.threshold,
        |p, v| p.threshold = v,
    ),
    ParameterSpec::new(
        "softThreshold", "Soft Threshold", "Width of the soft knee below the threshold.", 0.5, 0.0, 1.0,
        |p| p.soft_threshold,
        |p, v| p.soft_threshold = v,
    ),
    ParameterSpec::new(
        "resolution", "Resolution", "Scale of the intermediate streak buffers.", 0.25, 0.1, 1.0,
        |p| p.resolution,
        |p, v| p.resolution = v,
    ),
    ParameterSpec::new(
        "startAngle", "Start Angle", "Direction of the first streak in degrees.", 30.0, 0.0, 360.0,
        |p| p.start_angle,
        |p, v| p.start_angle = v,
    ),
    ParameterSpec::new(
        "iterationCount", "Iterations", "Stretch passes per streak direction.", 2.0, 1.0, 4.0,
        |p| p.iteration_count as f32,
        |p, v| p.iteration_count = v as u32,
    )
    .integer(),
    ParameterSpec::new(
        "tapCount", "Taps", "Samples taken per stretch pass.", 20.0, 1.0, 30.0,
        |p| p.tap_count as f32,
        |p, v| p.tap_count = v as u32,
    )
    .integer(),
];

/// All numeric parameters of the star effect.
pub fn parameter_specs() -> &'static [ParameterSpec] {
    &SPECS
}

/// Look up a descriptor by id.
pub fn find_spec(id: &str) -> Option<&'static ParameterSpec> {
    SPECS.iter().find(|s| s.id == id)
}

impl EffectParameters {
    /// Read a numeric parameter by descriptor id.
    pub fn get(&self, id: &str) -> Option<f32> {
        find_spec(id).map(|spec| (spec.read)(self))
    }

    /// Write a numeric parameter by descriptor id, clamping to its range.
    pub fn set(&mut self, id: &str, value: f32) -> Result<(), ParameterError> {
        let spec = find_spec(id).ok_or_else(|| ParameterError::UnknownParameter(id.to_string()))?;
        (spec.write)(self, spec.clamp(value));
        Ok(())
    }

    /// Apply an override of the form `id=value`.
    pub fn apply_override(&mut self, assignment: &str) -> Result<(), ParameterError> {
        let (id, raw) = assignment
            .split_once('=')
            .ok_or_else(|| ParameterError::InvalidOverride(assignment.to_string()))?;
        let value: f32 = raw
            .trim()
            .parse()
            .map_err(|_| ParameterError::InvalidOverride(assignment.to_string()))?;
        self.set(id.trim(), value)
    }
}
