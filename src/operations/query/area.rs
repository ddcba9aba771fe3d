use crate::error::Result;
use crate::math::polygon_3d::polygon_area_3d;
use crate::topology::{FaceId, TopologyStore};

/// Computes the area of a planar face, holes subtracted.
pub struct FaceArea {
    face: FaceId,
}

impl FaceArea {
    /// Creates a new `FaceArea` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the query, returning the face area.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or one of its wires is not found.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        let face = store.face(self.face)?;
        let normal = face.surface.normal();
        let mut area = polygon_area_3d(&store.wire_points(face.outer_wire)?, normal);
        for &hole in &face.inner_wires {
            area -= polygon_area_3d(&store.wire_points(hole)?, normal);
        }
        Ok(area)
    }
}
