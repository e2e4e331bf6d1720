use crate::backend::{ImageFilterBackend, ImageSize};
use crate::error::{CompositeError, Stage, StageExt};
use crate::filter::FilterCoefficients;
use crate::scratch::ScratchPair;
use crate::settings::EffectParameters;
use crate::streak::{StreakDirections, StreakKernel, StreakPass, StreakShading};

/// Summary of the work done by one composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompositeReport {
    pub streaks: u32,
    pub stretch_passes: u32,
    /// `None` when no scratch images were needed.
    pub scratch_size: Option<ImageSize>,
}

/// Multi-directional streak ("star") bloom.
///
/// For every streak direction the bright parts of the source are isolated
/// into a scratch image, stretched along the direction by a few ping-pong
/// passes, then added onto the destination, which starts out as a copy of
/// the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakCompositor;

impl StreakCompositor {
    pub fn new() -> Self {
        Self
    }

    /// Write `source` plus its streaks into `destination`.
    ///
    /// Parameters are used as given; clamp user-authored values first with
    /// [`EffectParameters::clamped`]. Scratch images are released before any
    /// error is returned.
    pub fn composite<B: ImageFilterBackend>(
        &self,
        backend: &mut B,
        source: &B::Image,
        destination: &mut B::Image,
        params: &EffectParameters,
    ) -> Result<CompositeReport, CompositeError> {
        let filter = FilterCoefficients::new(params.threshold, params.soft_threshold);

        backend.copy(source, destination).at(Stage::Copy)?;

        if params.num_streaks == 0 {
            log::debug!("No streaks requested; source copied through");
            return Ok(CompositeReport::default());
        }

        let base = backend.image_size(source);
        let size = base.scaled(params.resolution);
        if size.is_empty() {
            log::warn!(
                "Scratch size {}x{} at resolution {} is empty for a {}x{} source",
                size.width, size.height, params.resolution, base.width, base.height
            );
        }

        let shading = StreakShading::from_parameters(params);
        let kernel = StreakKernel::from(params.pass_mode);

        log::trace!("begin star draw ({} streaks, {:?})", params.num_streaks, kernel);
        let mut scratch = ScratchPair::acquire(backend, size).at(Stage::AllocateScratch)?;
        let mut report = CompositeReport { scratch_size: Some(scratch.size()), ..Default::default() };

        for direction in StreakDirections::from_parameters(params) {
            scratch.reset();

            let (backend, bright) = scratch.front_mut();
            backend.prefilter(source, bright, &filter).at(Stage::Prefilter)?;

            for iteration in 0..params.iteration_count {
                let pass = StreakPass { direction: direction.vector, iteration, kernel };
                let (backend, src, dst) = scratch.split();
                backend.streak_sample(src, dst, &pass, &shading).at(Stage::StreakSample)?;
                scratch.swap();
                report.stretch_passes += 1;
            }

            let (backend, streak, _) = scratch.split();
            backend.additive_composite(streak, destination).at(Stage::AdditiveComposite)?;
            report.streaks += 1;

            log::debug!(
                "Streak {} at {:.1} deg composited after {} passes",
                direction.index,
                direction.degrees(),
                params.iteration_count
            );
        }

        drop(scratch);
        log::trace!("end star draw");
        log::debug!(
            "Composite done: {} streaks, {} stretch passes, scratch {}x{}",
            report.streaks, report.stretch_passes, size.width, size.height
        );
        Ok(report)
    }

    /// Like [`composite`](Self::composite), into a freshly allocated
    /// destination the size of `source`.
    pub fn composite_to_new<B: ImageFilterBackend>(
        &self,
        backend: &mut B,
        source: &B::Image,
        params: &EffectParameters,
    ) -> Result<(B::Image, CompositeReport), CompositeError> {
        let size = backend.image_size(source);
        let mut destination = backend.allocate_image(size).at(Stage::AllocateDestination)?;
        let report = self.composite(backend, source, &mut destination, params)?;
        Ok((destination, report))
    }
}
