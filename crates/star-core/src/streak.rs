use glam::Vec2;

use crate::color::{gamma_to_linear, Rgba};
use crate::settings::{EffectParameters, PassMode};

/// Direction of one streak of the star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreakDirection {
    pub index: u32,
    /// Radians, not wrapped.
    pub angle: f32,
    /// `(cos(angle), sin(angle))`
    pub vector: Vec2,
}

impl StreakDirection {
    pub fn degrees(&self) -> f32 {
        self.angle.to_degrees()
    }
}

/// Yields the direction of every streak in draw order.
///
/// Each streak uses the current angle, then the angle advances by
/// [`PassMode::angle_step`].
#[derive(Debug, Clone)]
pub struct StreakDirections {
    next: u32,
    count: u32,
    angle: f32,
    step: f32,
}

impl StreakDirections {
    pub fn new(start_radians: f32, count: u32, mode: PassMode) -> Self {
        Self {
            next: 0,
            count,
            angle: start_radians,
            step: mode.angle_step(count),
        }
    }

    pub fn from_parameters(params: &EffectParameters) -> Self {
        Self::new(params.start_angle_radians(), params.num_streaks, params.pass_mode)
    }
}

impl Iterator for StreakDirections {
    type Item = StreakDirection;

    fn next(&mut self) -> Option<StreakDirection> {
        if self.next >= self.count {
            return None;
        }
        let angle = self.angle;
        let dir = StreakDirection {
            index: self.next,
            angle,
            vector: Vec2::new(angle.cos(), angle.sin()),
        };
        self.angle += self.step;
        self.next += 1;
        Some(dir)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.count - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for StreakDirections {}

/// Sampling kernel used by stretch passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakKernel {
    /// Taps along `+direction` only.
    Standard,
    /// Taps along both `+direction` and `-direction`.
    Symmetric,
}

impl From<PassMode> for StreakKernel {
    fn from(mode: PassMode) -> Self {
        match mode {
            PassMode::FullCircle => StreakKernel::Standard,
            PassMode::HalfCircle => StreakKernel::Symmetric,
        }
    }
}

/// One stretch pass along a streak direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreakPass {
    pub direction: Vec2,
    /// Zero-based; later iterations space their taps further apart.
    pub iteration: u32,
    pub kernel: StreakKernel,
}

/// Shading inputs shared by every stretch pass of one composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreakShading {
    /// Linear space.
    pub intensity: f32,
    /// Linear space.
    pub attenuation: f32,
    pub base_color: Rgba,
    pub color_aberration: Rgba,
    pub tap_count: u32,
}

impl StreakShading {
    pub fn from_parameters(params: &EffectParameters) -> Self {
        Self {
            intensity: gamma_to_linear(params.intensity),
            attenuation: gamma_to_linear(params.attenuation),
            base_color: params.base_color,
            color_aberration: params.color_aberration,
            tap_count: params.tap_count,
        }
    }
}
