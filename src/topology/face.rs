use crate::geometry::Plane;

use super::wire::WireId;

slotmap::new_key_type! {
    pub struct FaceId;
}

/// A planar region: a profile in a sketch, or a face of a solid.
///
/// The outer wire winds counter-clockwise about the surface normal, so for
/// solid faces the normal points out of the material.
#[derive(Debug, Clone)]
pub struct FaceData {
    pub surface: Plane,
    pub outer_wire: WireId,
    /// Hole loops, as in the lip band profile.
    pub inner_wires: Vec<WireId>,
}
