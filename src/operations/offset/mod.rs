mod polygon_offset_2d;

pub use polygon_offset_2d::{OffsetSide, PolygonOffset2D};
