use crate::error::{OperationError, Result};
use crate::math::polygon_3d::polygon_centroid_3d;
use crate::math::{Point3, TOLERANCE};
use crate::operations::creation::MakeSolid;
use crate::topology::{FaceId, ShellData, SolidId, TopologyStore};

use super::{face_loops, make_planar_face, make_side_faces, orient_ring};

/// Ruled loft between two planar profiles.
///
/// Vertex `i` of each loop in the start profile is connected to vertex `i` of
/// the matching loop in the end profile, so both profiles must have the same
/// number of loops with the same vertex counts. Lateral faces are planar
/// approximations of the ruled quads.
pub struct Loft {
    start: FaceId,
    end: FaceId,
}

impl Loft {
    /// Creates a new `Loft` operation.
    #[must_use]
    pub fn new(start: FaceId, end: FaceId) -> Self {
        Self { start, end }
    }

    /// Executes the loft, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the profiles have mismatched
    /// topology or coincide, and [`OperationError::Failed`] if a loop is degenerate.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        let start = face_loops(store, self.start)?;
        let end = face_loops(store, self.end)?;

        if start.len() != end.len() {
            return Err(OperationError::InvalidInput(format!(
                "loft profiles have {} and {} loops",
                start.len(),
                end.len()
            ))
            .into());
        }
        for (i, (a, b)) in start.iter().zip(&end).enumerate() {
            if a.len() != b.len() {
                return Err(OperationError::InvalidInput(format!(
                    "loft loop {i} has {} and {} vertices",
                    a.len(),
                    b.len()
                ))
                .into());
            }
        }

        let axis = polygon_centroid_3d(&end[0]) - polygon_centroid_3d(&start[0]);
        if axis.norm() < TOLERANCE {
            return Err(OperationError::InvalidInput(
                "loft profiles share the same centroid".into(),
            )
            .into());
        }

        // Outer loops wind along the loft axis and holes against it. Reversing
        // both rings of a pair keeps vertex i matched to vertex i.
        let mut pairs: Vec<(Vec<Point3>, Vec<Point3>)> = Vec::with_capacity(start.len());
        for (k, (a, b)) in start.iter().zip(&end).enumerate() {
            let along = k == 0;
            let a_oriented = orient_ring(a, &axis, along)?;
            let b_oriented = if a_oriented.first() == a.first() {
                b.clone()
            } else {
                b.iter().rev().copied().collect()
            };
            if orient_ring(&b_oriented, &axis, along)? != b_oriented {
                return Err(OperationError::Failed(format!(
                    "loft loop {k} reverses winding between profiles"
                ))
                .into());
            }
            pairs.push((a_oriented, b_oriented));
        }

        let mut all_faces = Vec::new();

        let start_outer: Vec<Point3> = pairs[0].0.iter().rev().copied().collect();
        let start_holes: Vec<Vec<Point3>> = pairs[1..]
            .iter()
            .map(|(a, _)| a.iter().rev().copied().collect())
            .collect();
        all_faces.push(make_planar_face(store, &start_outer, &start_holes)?);

        let end_holes: Vec<Vec<Point3>> = pairs[1..].iter().map(|(_, b)| b.clone()).collect();
        all_faces.push(make_planar_face(store, &pairs[0].1, &end_holes)?);

        for (a, b) in &pairs {
            all_faces.extend(make_side_faces(store, a, b)?);
        }

        let shell_id = store.add_shell(ShellData {
            faces: all_faces,
            is_closed: true,
        });
        MakeSolid::new(shell_id, vec![]).execute(store)
    }
}
