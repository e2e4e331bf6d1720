use std::io::Cursor;

use glam::Vec4;
use image::{DynamicImage, ImageFormat, RgbaImage};
use star_core::color::gamma_to_linear;
use star_core::{EffectParameters, ImageSize, PassMode, Stage, StreakCompositor};
use star_cpu::{CpuBackend, CpuImage};

// ── Helpers ──────────────────────────────────────────────────────

const SIZE: u32 = 64;

/// Dim background with a 4x4 block of HDR white in the middle.
fn bright_block() -> CpuImage {
    CpuImage::from_fn(ImageSize::new(SIZE, SIZE), |x, y| {
        if (30..34).contains(&x) && (30..34).contains(&y) {
            Vec4::new(50.0, 50.0, 50.0, 1.0)
        } else {
            Vec4::new(0.0, 0.0, 0.0, 1.0)
        }
    })
}

fn single_streak(mode: PassMode) -> EffectParameters {
    EffectParameters {
        pass_mode: mode,
        num_streaks: 1,
        start_angle: 0.0,
        resolution: 0.5,
        ..Default::default()
    }
}

fn run(backend: &mut CpuBackend, source: &CpuImage, params: &EffectParameters) -> CpuImage {
    let (out, _) = StreakCompositor::new()
        .composite_to_new(backend, source, params)
        .expect("composite");
    out
}

// ── 1. Passthrough ───────────────────────────────────────────────

#[test]
fn zero_streaks_is_identity() {
    let src = bright_block();
    let params = EffectParameters { num_streaks: 0, ..Default::default() };
    let mut backend = CpuBackend::default();
    let first = run(&mut backend, &src, &params);
    let second = run(&mut backend, &src, &params);
    assert_eq!(first, src);
    assert_eq!(second, src);
    assert_eq!(backend.scratch_stats().acquired(), 0);
}

#[test]
fn image_below_threshold_is_unchanged() {
    let src = CpuImage::from_fn(ImageSize::new(32, 24), |x, y| {
        Vec4::new(x as f32 / 32.0, y as f32 / 24.0, 0.2, 1.0)
    });
    let out = run(&mut CpuBackend::default(), &src, &EffectParameters::default());
    assert_eq!(out, src);
}

// ── 2. Streak shape ──────────────────────────────────────────────

#[test]
fn standard_kernel_streaks_one_way() {
    let src = bright_block();
    let out = run(&mut CpuBackend::default(), &src, &single_streak(PassMode::FullCircle));

    assert!(out.total_energy() > src.total_energy());
    // Taps gather from +x, so the glow lands on the -x side of the block.
    assert!(out.pixel(20, 32).x > 0.0);
    assert_eq!(out.pixel(44, 32).x, 0.0);
    // Alpha is carried from the source.
    assert_eq!(out.pixel(20, 32).w, 1.0);
}

#[test]
fn symmetric_kernel_streaks_both_ways() {
    let src = bright_block();
    let out = run(&mut CpuBackend::default(), &src, &single_streak(PassMode::HalfCircle));

    assert!(out.pixel(20, 32).x > 0.0);
    assert!(out.pixel(44, 32).x > 0.0);
    // Nothing leaks perpendicular to a horizontal streak, far from the block.
    assert_eq!(out.pixel(32, 4).x, 0.0);
}

#[test]
fn more_streaks_add_more_energy() {
    let src = bright_block();
    let mut params = single_streak(PassMode::FullCircle);
    let one = run(&mut CpuBackend::default(), &src, &params).total_energy();
    params.num_streaks = 4;
    let four = run(&mut CpuBackend::default(), &src, &params).total_energy();
    assert!(four > one);
}

#[test]
fn zero_intensity_adds_nothing() {
    let src = bright_block();
    let mut params = single_streak(PassMode::HalfCircle);
    params.intensity = 0.0;
    let out = run(&mut CpuBackend::default(), &src, &params);
    assert_eq!(out, src);
}

#[test]
fn output_is_finite_across_parameter_extremes() {
    let src = bright_block();
    for (iterations, taps, soft) in [(1, 1, 0.0), (4, 30, 1.0), (2, 7, 0.25)] {
        let params = EffectParameters {
            num_streaks: 8,
            iteration_count: iterations,
            tap_count: taps,
            soft_threshold: soft,
            resolution: 0.1,
            ..Default::default()
        };
        let out = run(&mut CpuBackend::default(), &src, &params);
        assert!(out.as_rgba32f().iter().all(|v| v.is_finite()));
    }
}

// ── 3. Scratch pool ──────────────────────────────────────────────

#[test]
fn scratch_is_pooled_across_frames() {
    let src = bright_block();
    let params = single_streak(PassMode::FullCircle);
    let mut backend = CpuBackend::default();

    run(&mut backend, &src, &params);
    let stats = backend.scratch_stats();
    assert_eq!((stats.allocated, stats.released, stats.outstanding()), (2, 2, 0));

    run(&mut backend, &src, &params);
    let stats = backend.scratch_stats();
    assert_eq!((stats.allocated, stats.reused, stats.released), (2, 2, 4));
    assert_eq!(stats.outstanding(), 0);
}

#[test]
fn trim_drops_pooled_scratch() {
    let src = bright_block();
    let params = single_streak(PassMode::FullCircle);
    let mut backend = CpuBackend::default();

    run(&mut backend, &src, &params);
    backend.trim();
    run(&mut backend, &src, &params);
    let stats = backend.scratch_stats();
    assert_eq!((stats.allocated, stats.reused, stats.released), (4, 0, 4));
}

#[test]
fn empty_scratch_resolution_fails_cleanly() {
    let src = CpuImage::from_fn(ImageSize::new(5, 5), |_, _| Vec4::splat(10.0));
    let params = EffectParameters { resolution: 0.1, ..Default::default() };
    let mut backend = CpuBackend::default();
    let mut dst = CpuImage::new(ImageSize::new(5, 5));

    let err = StreakCompositor::new()
        .composite(&mut backend, &src, &mut dst, &params)
        .unwrap_err();
    assert_eq!(err.stage(), Stage::AllocateScratch);
    assert_eq!(backend.scratch_stats().outstanding(), 0);
    // The destination was already seeded with the source.
    assert_eq!(dst, src);
}

// ── 4. File IO ───────────────────────────────────────────────────

#[test]
fn png_roundtrip_through_linear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    let img = CpuImage::from_fn(ImageSize::new(4, 4), |x, _| Vec4::new(x as f32 / 3.0, 0.5, 0.0, 1.0));

    star_cpu::save(&path, &img).unwrap();
    let back = star_cpu::load_linear(&path).unwrap();
    assert_eq!(back.size(), img.size());
    for x in 0..4 {
        assert!((back.pixel(x, 1) - img.pixel(x, 1)).abs().max_element() < 0.01);
    }
}

#[test]
fn exr_keeps_hdr_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.exr");
    let img = bright_block();

    star_cpu::save(&path, &img).unwrap();
    let back = star_cpu::load_linear(&path).unwrap();
    assert!((back.pixel(31, 31).x - 50.0).abs() < 1e-3);
}

#[test]
fn decode_png_bytes_to_linear() {
    let encoded = RgbaImage::from_pixel(3, 2, image::Rgba([128, 128, 128, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(encoded)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();

    let img = star_cpu::decode_linear(&bytes).unwrap();
    assert_eq!(img.size(), ImageSize::new(3, 2));
    let expected = gamma_to_linear(128.0 / 255.0);
    let p = img.pixel(2, 1);
    assert!((p.x - expected).abs() < 1e-4);
    assert!((p.x - 0.2159).abs() < 1e-3);
    assert_eq!(p.w, 1.0);
}

#[test]
fn decode_rejects_garbage() {
    assert!(star_cpu::decode_linear(b"not an image").is_err());
}
