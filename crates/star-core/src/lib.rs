pub mod backend;
pub mod color;
pub mod compositor;
pub mod error;
pub mod filter;
pub mod parameter;
pub mod scratch;
pub mod settings;
pub mod streak;

pub use backend::{ImageFilterBackend, ImageSize};
pub use color::Rgba;
pub use compositor::{CompositeReport, StreakCompositor};
pub use error::{BackendError, CompositeError, ParameterError, Stage};
pub use filter::FilterCoefficients;
pub use parameter::{parameter_specs, ParameterSpec};
pub use scratch::{ScratchPair, Slot};
pub use settings::{EffectParameters, PassMode};
pub use streak::{StreakDirection, StreakDirections, StreakKernel, StreakPass, StreakShading};
