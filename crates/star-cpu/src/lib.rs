pub mod backend;
pub mod io;
pub mod kernels;
pub mod pool;
pub mod surface;

pub use backend::{CpuBackend, CpuBackendOptions};
pub use surface::CpuImage;
pub use io::{decode_linear, load_linear, save, IoError};
pub use pool::ScratchStats;
