use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use star_core::color::{gamma_to_linear, linear_to_gamma};

use crate::surface::CpuImage;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
}

/// Formats whose samples are already linear floats.
fn is_float_format(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Hdr | ImageFormat::OpenExr)
}

fn format_for(path: &Path) -> Result<ImageFormat, IoError> {
    ImageFormat::from_path(path).map_err(|_| IoError::UnsupportedFormat(path.display().to_string()))
}

/// Load an image as linear-light RGBA.
///
/// Radiance HDR and OpenEXR are taken as-is; every other format is assumed
/// sRGB-encoded and linearized.
pub fn load_linear(path: &Path) -> Result<CpuImage, IoError> {
    let format = format_for(path)?;
    let img = image::open(path)?;
    Ok(to_linear(img, is_float_format(format)))
}

/// Decode in-memory image bytes as linear-light RGBA.
pub fn decode_linear(data: &[u8]) -> Result<CpuImage, IoError> {
    let format = image::guess_format(data)?;
    let img = image::load_from_memory_with_format(data, format)?;
    Ok(to_linear(img, is_float_format(format)))
}

fn to_linear(img: DynamicImage, already_linear: bool) -> CpuImage {
    let mut rgba = img.to_rgba32f();
    if !already_linear {
        for px in rgba.pixels_mut() {
            for c in &mut px.0[..3] {
                *c = gamma_to_linear(*c);
            }
        }
    }
    CpuImage::from_rgba32f(rgba)
}

/// Encode linear RGBA to sRGB 8-bit, clipping at white.
pub fn to_srgb8(image: &CpuImage) -> RgbaImage {
    let src = image.as_rgba32f();
    RgbaImage::from_fn(src.width(), src.height(), |x, y| {
        let p = src.get_pixel(x, y).0;
        let enc = |v: f32| (linear_to_gamma(v.clamp(0.0, 1.0)) * 255.0).round() as u8;
        image::Rgba([enc(p[0]), enc(p[1]), enc(p[2]), (p[3].clamp(0.0, 1.0) * 255.0).round() as u8])
    })
}

/// Save an image, choosing the encoding from the file extension.
///
/// `.hdr` and `.exr` keep full float range; other formats are sRGB 8-bit.
pub fn save(path: &Path, image: &CpuImage) -> Result<(), IoError> {
    let format = format_for(path)?;
    let out: DynamicImage = match format {
        ImageFormat::Hdr => DynamicImage::ImageRgba32F(image.as_rgba32f().clone()).to_rgb32f().into(),
        ImageFormat::OpenExr => DynamicImage::ImageRgba32F(image.as_rgba32f().clone()),
        // No alpha channel in JPEG.
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(to_srgb8(image)).to_rgb8()),
        _ => DynamicImage::ImageRgba8(to_srgb8(image)),
    };
    out.save_with_format(path, format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use star_core::ImageSize;

    #[test]
    fn test_srgb_encoding_clips() {
        let img = CpuImage::from_fn(ImageSize::new(2, 1), |x, _| {
            if x == 0 { Vec4::new(4.0, 0.0, 1.0, 1.0) } else { Vec4::new(0.214, 0.214, 0.214, 0.5) }
        });
        let enc = to_srgb8(&img);
        assert_eq!(enc.get_pixel(0, 0).0, [255, 0, 255, 255]);
        let mid = enc.get_pixel(1, 0).0;
        assert!((mid[0] as i32 - 128).abs() <= 1);
        assert_eq!(mid[3], 128);
    }

    #[test]
    fn test_unknown_extension() {
        let err = save(Path::new("out.nope"), &CpuImage::new(ImageSize::new(1, 1))).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }
}
