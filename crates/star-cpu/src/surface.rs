use glam::{Vec2, Vec4};
use image::{Rgba, Rgba32FImage};
use star_core::ImageSize;

/// A linear-light RGBA `f32` image.
///
/// Sampling mirrors a GPU render target with a linear filter and
/// clamp-to-edge wrapping: texel centres sit at `(i + 0.5) / size` in UV
/// space.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuImage {
    pixels: Rgba32FImage,
}

impl CpuImage {
    /// Create a transparent black image.
    pub fn new(size: ImageSize) -> Self {
        Self { pixels: Rgba32FImage::new(size.width, size.height) }
    }

    pub fn from_rgba32f(pixels: Rgba32FImage) -> Self {
        Self { pixels }
    }

    pub fn from_fn(size: ImageSize, mut f: impl FnMut(u32, u32) -> Vec4) -> Self {
        let pixels = Rgba32FImage::from_fn(size.width, size.height, |x, y| Rgba(f(x, y).to_array()));
        Self { pixels }
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.pixels.width(), self.pixels.height())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Vec4 {
        Vec4::from_array(self.pixels.get_pixel(x, y).0)
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Vec4) {
        self.pixels.put_pixel(x, y, Rgba(color.to_array()));
    }

    pub fn as_rgba32f(&self) -> &Rgba32FImage {
        &self.pixels
    }

    pub fn clear(&mut self) {
        for v in self.pixels.iter_mut() {
            *v = 0.0;
        }
    }

    /// Multiply the color channels, leaving alpha alone.
    pub fn scale_rgb(&mut self, factor: f32) {
        for px in self.pixels.pixels_mut() {
            for c in &mut px.0[..3] {
                *c *= factor;
            }
        }
    }

    /// Size of one texel in UV units.
    pub fn texel_size(&self) -> Vec2 {
        Vec2::new(1.0 / self.width().max(1) as f32, 1.0 / self.height().max(1) as f32)
    }

    /// UV coordinate of the centre of texel `(x, y)`.
    pub fn uv(&self, x: u32, y: u32) -> Vec2 {
        (Vec2::new(x as f32, y as f32) + 0.5) * self.texel_size()
    }

    /// Bilinear sample with clamp-to-edge. Empty images sample as zero.
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return Vec4::ZERO;
        }

        let x = (uv.x * w as f32 - 0.5).clamp(0.0, (w - 1) as f32);
        let y = (uv.y * h as f32 - 0.5).clamp(0.0, (h - 1) as f32);
        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(w - 1);
        let y1 = (y0 + 1).min(h - 1);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let top = self.pixel(x0, y0).lerp(self.pixel(x1, y0), fx);
        let bottom = self.pixel(x0, y1).lerp(self.pixel(x1, y1), fx);
        top.lerp(bottom, fy)
    }

    /// Sum of the RGB channels over all pixels.
    pub fn total_energy(&self) -> f64 {
        self.pixels
            .pixels()
            .map(|p| (p.0[0] + p.0[1] + p.0[2]) as f64)
            .sum()
    }
}
