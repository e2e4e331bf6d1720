use star_core::{
    BackendError, FilterCoefficients, ImageFilterBackend, ImageSize, StreakPass, StreakShading,
};

use crate::surface::CpuImage;
use crate::kernels;
use crate::pool::{ScratchPool, ScratchStats};

/// CPU backend configuration.
#[derive(Debug, Clone)]
pub struct CpuBackendOptions {
    /// Largest width or height accepted for any allocation.
    pub max_dimension: u32,
    /// Released scratch images kept for reuse.
    pub pool_capacity: usize,
}

impl Default for CpuBackendOptions {
    fn default() -> Self {
        Self {
            max_dimension: 16384,
            pool_capacity: 4,
        }
    }
}

/// Software [`ImageFilterBackend`] over [`CpuImage`]s.
#[derive(Debug)]
pub struct CpuBackend {
    options: CpuBackendOptions,
    pool: ScratchPool,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new(CpuBackendOptions::default())
    }
}

impl CpuBackend {
    pub fn new(options: CpuBackendOptions) -> Self {
        let pool = ScratchPool::new(options.pool_capacity);
        Self { options, pool }
    }

    pub fn scratch_stats(&self) -> ScratchStats {
        self.pool.stats()
    }

    /// Drop pooled scratch images.
    pub fn trim(&mut self) {
        self.pool.trim();
    }

    fn check_size(&self, size: ImageSize) -> Result<(), BackendError> {
        if size.is_empty() || size.width > self.options.max_dimension || size.height > self.options.max_dimension {
            return Err(BackendError::UnsupportedResolution { width: size.width, height: size.height });
        }
        Ok(())
    }
}

fn check_image(image: &CpuImage, role: &str) -> Result<(), BackendError> {
    if image.size().is_empty() {
        return Err(BackendError::InvalidImage(format!(
            "{role} image is {}x{}",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

fn check_pair(src: &CpuImage, dst: &CpuImage) -> Result<(), BackendError> {
    check_image(src, "source")?;
    check_image(dst, "destination")
}

impl ImageFilterBackend for CpuBackend {
    type Image = CpuImage;

    fn image_size(&self, image: &CpuImage) -> ImageSize {
        image.size()
    }

    fn allocate_image(&mut self, size: ImageSize) -> Result<CpuImage, BackendError> {
        self.check_size(size)?;
        Ok(CpuImage::new(size))
    }

    fn allocate_scratch(&mut self, size: ImageSize) -> Result<CpuImage, BackendError> {
        self.check_size(size)?;
        Ok(self.pool.take(size))
    }

    fn release_scratch(&mut self, image: CpuImage) {
        self.pool.give(image);
    }

    fn copy(&mut self, src: &CpuImage, dst: &mut CpuImage) -> Result<(), BackendError> {
        check_pair(src, dst)?;
        kernels::blit(src, dst);
        Ok(())
    }

    fn prefilter(&mut self, src: &CpuImage, dst: &mut CpuImage, filter: &FilterCoefficients) -> Result<(), BackendError> {
        check_pair(src, dst)?;
        kernels::prefilter(src, dst, filter);
        Ok(())
    }

    fn streak_sample(
        &mut self,
        src: &CpuImage,
        dst: &mut CpuImage,
        pass: &StreakPass,
        shading: &StreakShading,
    ) -> Result<(), BackendError> {
        check_pair(src, dst)?;
        kernels::streak(src, dst, pass, shading);
        Ok(())
    }

    fn additive_composite(&mut self, src: &CpuImage, dst: &mut CpuImage) -> Result<(), BackendError> {
        check_pair(src, dst)?;
        kernels::add(src, dst);
        Ok(())
    }
}
