//! Per-pixel passes of the star effect.
//!
//! Each pass walks the destination texel by texel and samples the source in
//! UV space, so source and destination may differ in size.

use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};
use star_core::{FilterCoefficients, StreakKernel, StreakPass, StreakShading};

use crate::surface::CpuImage;

// ── Copy ────────────────────────────────────────────────────────────

pub fn blit(src: &CpuImage, dst: &mut CpuImage) {
    if src.size() == dst.size() {
        dst.clone_from(src);
        return;
    }
    for y in 0..dst.height() {
        for x in 0..dst.width() {
            let uv = dst.uv(x, y);
            dst.put_pixel(x, y, src.sample(uv));
        }
    }
}

// ── Box-down prefilter ──────────────────────────────────────────────

/// 4-tap box downsample followed by the soft-knee threshold.
pub fn prefilter(src: &CpuImage, dst: &mut CpuImage, filter: &FilterCoefficients) {
    let texel = src.texel_size();
    let offsets = [
        Vec2::new(-texel.x, -texel.y),
        Vec2::new(texel.x, -texel.y),
        Vec2::new(-texel.x, texel.y),
        Vec2::new(texel.x, texel.y),
    ];

    for y in 0..dst.height() {
        for x in 0..dst.width() {
            let uv = dst.uv(x, y);
            let boxed: Vec3 = offsets.iter().map(|o| src.sample(uv + *o).xyz()).sum::<Vec3>() * 0.25;
            let brightness = boxed.max_element();
            let color = boxed * filter.contribution(brightness);
            dst.put_pixel(x, y, color.extend(1.0));
        }
    }
}

// ── Streak stretch ──────────────────────────────────────────────────

struct Tap {
    distance: f32,
    weight: f32,
    tint: Vec3,
}

/// Weights and tints for one pass. Tap `s` sits `b * s` texels out with
/// weight `attenuation ^ (b * s)`, where `b = tap_count ^ iteration`.
fn taps(pass: &StreakPass, shading: &StreakShading) -> Vec<Tap> {
    let count = shading.tap_count.max(1);
    let b = (count as f32).powi(pass.iteration as i32);
    (0..count)
        .map(|s| {
            let distance = b * s as f32;
            // Color and brightness are applied once, on the first stretch.
            let tint = if pass.iteration == 0 {
                let t = s as f32 / count as f32;
                shading.base_color.lerp(shading.color_aberration, t).to_vec4().xyz() * shading.intensity
            } else {
                Vec3::ONE
            };
            Tap { distance, weight: shading.attenuation.powf(distance), tint }
        })
        .collect()
}

pub fn streak(src: &CpuImage, dst: &mut CpuImage, pass: &StreakPass, shading: &StreakShading) {
    let taps = taps(pass, shading);
    let step = pass.direction * src.texel_size();
    let symmetric = pass.kernel == StreakKernel::Symmetric;

    let mut weight_sum = 0.0;
    for (s, tap) in taps.iter().enumerate() {
        weight_sum += if symmetric && s > 0 { 2.0 * tap.weight } else { tap.weight };
    }
    let norm = if weight_sum > 0.0 { 1.0 / weight_sum } else { 0.0 };

    for y in 0..dst.height() {
        for x in 0..dst.width() {
            let uv = dst.uv(x, y);
            let mut acc = Vec3::ZERO;
            for (s, tap) in taps.iter().enumerate() {
                let offset = step * tap.distance;
                let mut c = src.sample(uv + offset).xyz();
                if symmetric && s > 0 {
                    c += src.sample(uv - offset).xyz();
                }
                acc += c * tap.weight * tap.tint;
            }
            dst.put_pixel(x, y, (acc * norm).extend(1.0));
        }
    }
}

// ── Additive composite ──────────────────────────────────────────────

/// `dst.rgb += src.rgb`; destination alpha is kept.
pub fn add(src: &CpuImage, dst: &mut CpuImage) {
    for y in 0..dst.height() {
        for x in 0..dst.width() {
            let uv = dst.uv(x, y);
            let base = dst.pixel(x, y);
            let glow = src.sample(uv);
            dst.put_pixel(x, y, Vec4::new(base.x + glow.x, base.y + glow.y, base.z + glow.z, base.w));
        }
    }
}
