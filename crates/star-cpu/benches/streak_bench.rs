use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Vec2, Vec4};
use star_core::{
    EffectParameters, ImageSize, PassMode, StreakCompositor, StreakKernel, StreakPass, StreakShading,
};
use star_cpu::{kernels, CpuBackend, CpuImage};

fn test_frame(size: ImageSize) -> CpuImage {
    CpuImage::from_fn(size, |x, y| {
        let hot = (x / 16 + y / 16) % 5 == 0;
        let v = if hot { 8.0 } else { 0.3 };
        Vec4::new(v, v * 0.9, v * 0.8, 1.0)
    })
}

fn bench_composite_256(c: &mut Criterion) {
    let src = test_frame(ImageSize::new(256, 256));
    let params = EffectParameters::default();
    let mut backend = CpuBackend::default();
    let mut dst = CpuImage::new(src.size());
    c.bench_function("composite_256_default", |b| {
        b.iter(|| {
            StreakCompositor::new()
                .composite(&mut backend, black_box(&src), &mut dst, &params)
                .unwrap();
        });
    });
}

fn bench_composite_full_circle_8(c: &mut Criterion) {
    let src = test_frame(ImageSize::new(256, 256));
    let params = EffectParameters {
        pass_mode: PassMode::FullCircle,
        num_streaks: 8,
        ..Default::default()
    };
    let mut backend = CpuBackend::default();
    let mut dst = CpuImage::new(src.size());
    c.bench_function("composite_256_full_circle_8", |b| {
        b.iter(|| {
            StreakCompositor::new()
                .composite(&mut backend, black_box(&src), &mut dst, &params)
                .unwrap();
        });
    });
}

fn bench_streak_pass_128(c: &mut Criterion) {
    let src = test_frame(ImageSize::new(128, 128));
    let mut dst = CpuImage::new(src.size());
    let shading = StreakShading::from_parameters(&EffectParameters::default());
    let pass = StreakPass { direction: Vec2::new(0.6, 0.8), iteration: 0, kernel: StreakKernel::Symmetric };
    c.bench_function("streak_pass_128_symmetric", |b| {
        b.iter(|| kernels::streak(black_box(&src), &mut dst, &pass, &shading));
    });
}

criterion_group!(benches, bench_composite_256, bench_composite_full_circle_8, bench_streak_pass_128);
criterion_main!(benches);
