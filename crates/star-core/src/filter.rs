use glam::Vec4;

/// Guards the knee scale against division by zero when the knee is 0.
pub const KNEE_EPSILON: f32 = 1e-5;

/// Soft-knee threshold curve coefficients handed to the prefilter.
///
/// With `knee = threshold * soft_threshold` the curve ramps quadratically
/// over `[threshold - knee, threshold + knee]` instead of cutting off hard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCoefficients {
    pub threshold: f32,
    /// `threshold - knee`
    pub knee_offset: f32,
    /// `2 * knee`
    pub knee_width: f32,
    /// `0.25 / (knee + KNEE_EPSILON)`
    pub knee_scale: f32,
}

impl FilterCoefficients {
    pub fn new(threshold: f32, soft_threshold: f32) -> Self {
        let knee = threshold * soft_threshold;
        Self {
            threshold,
            knee_offset: threshold - knee,
            knee_width: 2.0 * knee,
            knee_scale: 0.25 / (knee + KNEE_EPSILON),
        }
    }

    /// Packed as `(threshold, knee_offset, knee_width, knee_scale)`.
    pub fn as_vec4(&self) -> Vec4 {
        Vec4::new(self.threshold, self.knee_offset, self.knee_width, self.knee_scale)
    }

    /// Fraction of a pixel's color that survives the threshold, given its
    /// brightest channel.
    pub fn contribution(&self, brightness: f32) -> f32 {
        let soft = (brightness - self.knee_offset).clamp(0.0, self.knee_width);
        let soft = soft * soft * self.knee_scale;
        let c = soft.max(brightness - self.threshold);
        c / brightness.max(KNEE_EPSILON)
    }
}
