mod area;
mod length;

pub use area::FaceArea;
pub use length::Length;
