use crate::error::{OperationError, Result};
use crate::geometry::Plane;
use crate::math::polygon_3d::newell_normal;
use crate::topology::{FaceData, FaceId, TopologyStore, WireId};

/// Creates a planar face from a closed outer wire and optional hole wires.
pub struct MakeFace {
    outer_wire: WireId,
    inner_wires: Vec<WireId>,
}

impl MakeFace {
    /// Creates a new `MakeFace` operation.
    #[must_use]
    pub fn new(outer_wire: WireId, inner_wires: Vec<WireId>) -> Self {
        Self {
            outer_wire,
            inner_wires,
        }
    }

    /// Executes the operation, creating the face in the topology store.
    ///
    /// The plane normal follows the outer wire's winding (Newell's method).
    ///
    /// # Errors
    ///
    /// Returns an error if a wire is missing or open, or the outer wire has no area.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<FaceId> {
        for &wire in std::iter::once(&self.outer_wire).chain(&self.inner_wires) {
            if !store.wire(wire)?.is_closed {
                return Err(crate::error::TopologyError::WireNotClosed.into());
            }
        }

        let points = store.wire_points(self.outer_wire)?;
        if points.len() < 3 {
            return Err(OperationError::InvalidInput(
                "face boundary needs at least 3 vertices".into(),
            )
            .into());
        }
        let normal = newell_normal(&points)?;
        let u_dir = points[1] - points[0];
        let surface = Plane::new(points[0], u_dir, normal.cross(&u_dir))?;

        Ok(store.add_face(FaceData {
            surface,
            outer_wire: self.outer_wire,
            inner_wires: self.inner_wires.clone(),
        }))
    }
}
