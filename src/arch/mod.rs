//! Catenary arch model: spine solver, section contours, and section assembly.

mod assembler;
mod constants;
mod contours;
mod generator;
mod select;
mod solver;
mod stations;

pub use assembler::{assemble_segment, sketch_station, ArchSegment, LipDirection, StationProfiles};
pub use constants::ArchPhysicalConstants;
pub use contours::{build_contours, AnnularContour, OffsetContourSet, OffsetMargins};
pub use generator::{generate, ArchAssembly};
pub use select::{select_largest_face, select_longest_edge};
pub use solver::{solve_apex, solve_station, solve_stations, StationSample, Triangle3D};
pub use stations::{validate_stations, GATEWAY_STATIONS};
