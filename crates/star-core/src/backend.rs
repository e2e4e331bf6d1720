use crate::error::BackendError;
use crate::filter::FilterCoefficients;
use crate::streak::{StreakPass, StreakShading};

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `floor(width * factor) x floor(height * factor)`
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            width: (self.width as f32 * factor).floor() as u32,
            height: (self.height as f32 * factor).floor() as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Image operations the streak compositor is built from.
///
/// Implementations own their image type; the compositor only borrows images
/// for the duration of a call and never touches pixel data. Every operation
/// reads `src` and overwrites (or, for [`additive_composite`], accumulates
/// into) `dst`, resampling when the two differ in size.
///
/// [`additive_composite`]: ImageFilterBackend::additive_composite
pub trait ImageFilterBackend {
    type Image;

    fn image_size(&self, image: &Self::Image) -> ImageSize;

    /// Allocate a long-lived image, such as a composite destination.
    fn allocate_image(&mut self, size: ImageSize) -> Result<Self::Image, BackendError>;

    /// Allocate a temporary image. Every scratch image must be handed back
    /// through [`release_scratch`](ImageFilterBackend::release_scratch).
    fn allocate_scratch(&mut self, size: ImageSize) -> Result<Self::Image, BackendError>;

    fn release_scratch(&mut self, image: Self::Image);

    /// Plain blit.
    fn copy(&mut self, src: &Self::Image, dst: &mut Self::Image) -> Result<(), BackendError>;

    /// Isolate the pixels above the soft-knee threshold.
    fn prefilter(
        &mut self,
        src: &Self::Image,
        dst: &mut Self::Image,
        filter: &FilterCoefficients,
    ) -> Result<(), BackendError>;

    /// Stretch highlights along `pass.direction`.
    fn streak_sample(
        &mut self,
        src: &Self::Image,
        dst: &mut Self::Image,
        pass: &StreakPass,
        shading: &StreakShading,
    ) -> Result<(), BackendError>;

    /// Add `src` onto `dst`.
    fn additive_composite(&mut self, src: &Self::Image, dst: &mut Self::Image) -> Result<(), BackendError>;
}
