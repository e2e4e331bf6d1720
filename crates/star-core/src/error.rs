use std::fmt;

/// Failure reported by an [`ImageFilterBackend`](crate::backend::ImageFilterBackend) call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("unsupported resolution {width}x{height}")]
    UnsupportedResolution { width: u32, height: u32 },

    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("backend operation failed: {0}")]
    Operation(String),
}

/// Step of the composite during which a backend call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AllocateDestination,
    Copy,
    AllocateScratch,
    Prefilter,
    StreakSample,
    AdditiveComposite,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::AllocateDestination => "allocate destination",
            Stage::Copy => "copy",
            Stage::AllocateScratch => "allocate scratch",
            Stage::Prefilter => "prefilter",
            Stage::StreakSample => "streak sample",
            Stage::AdditiveComposite => "additive composite",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompositeError {
    #[error("{stage} failed: {source}")]
    Backend {
        stage: Stage,
        #[source]
        source: BackendError,
    },
}

impl CompositeError {
    pub fn stage(&self) -> Stage {
        match self {
            CompositeError::Backend { stage, .. } => *stage,
        }
    }
}

/// Attach the failing stage to a backend result.
pub(crate) trait StageExt<T> {
    fn at(self, stage: Stage) -> Result<T, CompositeError>;
}

impl<T> StageExt<T> for Result<T, BackendError> {
    fn at(self, stage: Stage) -> Result<T, CompositeError> {
        self.map_err(|source| CompositeError::Backend { stage, source })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("invalid override '{0}', expected id=value")]
    InvalidOverride(String),
}
