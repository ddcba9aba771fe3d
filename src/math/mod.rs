pub mod polygon_2d;
pub mod polygon_3d;

/// 2D point type, used for coordinates inside a section plane.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type. Units are feet throughout the crate.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
