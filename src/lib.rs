pub mod arch;
pub mod config;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod math;
pub mod operations;
pub mod topology;

pub use arch::{generate, ArchAssembly, ArchPhysicalConstants, StationSample, Triangle3D};
pub use config::ArchConfig;
pub use error::{ArchError, Result};
pub use kernel::{GeometryKernel, ModelKernel};
