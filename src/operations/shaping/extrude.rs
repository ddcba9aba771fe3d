use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::operations::creation::MakeSolid;
use crate::topology::{FaceId, ShellData, SolidId, TopologyStore};

use super::{face_loops, make_planar_face, make_side_faces, orient_ring};

/// Extrudes a planar face along a direction vector to create a solid.
///
/// Faces with holes (annular profiles) produce a prism with a through-hole:
/// both caps keep the hole and the hole gets its own ring of side faces.
pub struct Extrude {
    face: FaceId,
    direction: Vector3,
}

impl Extrude {
    /// Creates a new `Extrude` operation.
    #[must_use]
    pub fn new(face: FaceId, direction: Vector3) -> Self {
        Self { face, direction }
    }

    /// Executes the extrusion, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the direction is zero-length
    /// or parallel to the face.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        if self.direction.norm() < TOLERANCE {
            return Err(
                OperationError::InvalidInput("extrude direction must be non-zero".into()).into(),
            );
        }
        let plane_normal = *store.face(self.face)?.surface.normal();
        if plane_normal.dot(&self.direction).abs() < TOLERANCE {
            return Err(OperationError::InvalidInput(
                "extrude direction lies in the profile plane".into(),
            )
            .into());
        }

        let loops = face_loops(store, self.face)?;

        // Outer ring ordered with its normal along the direction, holes against it.
        // Then side quads of both face away from the material.
        let base_outer = orient_ring(&loops[0], &self.direction, true)?;
        let base_holes = loops[1..]
            .iter()
            .map(|ring| orient_ring(ring, &self.direction, false))
            .collect::<Result<Vec<_>>>()?;

        let translate = |ring: &[Point3]| -> Vec<Point3> {
            ring.iter().map(|p| p + self.direction).collect()
        };
        let top_outer = translate(&base_outer);
        let top_holes: Vec<Vec<Point3>> = base_holes.iter().map(|r| translate(r)).collect();

        let mut all_faces = Vec::new();

        // Bottom face: reversed → normal ≈ -direction (outward below).
        let bottom_outer: Vec<Point3> = base_outer.iter().rev().copied().collect();
        let bottom_holes: Vec<Vec<Point3>> = base_holes
            .iter()
            .map(|r| r.iter().rev().copied().collect())
            .collect();
        all_faces.push(make_planar_face(store, &bottom_outer, &bottom_holes)?);
        all_faces.push(make_planar_face(store, &top_outer, &top_holes)?);

        all_faces.extend(make_side_faces(store, &base_outer, &top_outer)?);
        for (base, top) in base_holes.iter().zip(&top_holes) {
            all_faces.extend(make_side_faces(store, base, top)?);
        }

        let shell_id = store.add_shell(ShellData {
            faces: all_faces,
            is_closed: true,
        });
        MakeSolid::new(shell_id, vec![]).execute(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::FaceArea;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn make_face(store: &mut TopologyStore, points: &[Point3], holes: &[Vec<Point3>]) -> FaceId {
        make_planar_face(store, points, holes).unwrap()
    }

    #[test]
    fn unit_cube_has_6_faces() {
        let mut store = TopologyStore::new();
        let face = make_face(
            &mut store,
            &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)],
            &[],
        );
        let solid = Extrude::new(face, Vector3::new(0.0, 0.0, 1.0))
            .execute(&mut store)
            .unwrap();

        let solid_data = store.solid(solid).unwrap();
        let shell = store.shell(solid_data.outer_shell).unwrap();
        assert_eq!(shell.faces.len(), 6);
        assert!(shell.is_closed);
    }

    #[test]
    fn triangle_prism_has_5_faces() {
        let mut store = TopologyStore::new();
        let face = make_face(
            &mut store,
            &[p(0.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(1.5, 2.0, 0.0)],
            &[],
        );
        let solid = Extrude::new(face, Vector3::new(0.0, 0.0, 3.0))
            .execute(&mut store)
            .unwrap();
        assert_eq!(store.solid_faces(solid).unwrap().len(), 5);
    }

    #[test]
    fn all_face_normals_point_outward() {
        let mut store = TopologyStore::new();
        // Clockwise base, extruded downward: orientation is fixed up internally.
        let face = make_face(
            &mut store,
            &[p(0.0, 0.0, 0.0), p(0.0, 2.0, 0.0), p(2.0, 2.0, 0.0), p(2.0, 0.0, 0.0)],
            &[],
        );
        let solid = Extrude::new(face, Vector3::new(0.0, 0.0, -3.0))
            .execute(&mut store)
            .unwrap();

        let centroid = p(1.0, 1.0, -1.5);
        for face_id in store.solid_faces(solid).unwrap() {
            let plane = &store.face(face_id).unwrap().surface;
            let to_face = plane.origin() - centroid;
            let face_normal = plane.normal();
            assert!(
                face_normal.dot(&to_face) > 0.0,
                "face normal {face_normal:?} should point outward (dot with {to_face:?} was {})",
                face_normal.dot(&to_face)
            );
        }
    }

    #[test]
    fn annulus_extrudes_to_tube_with_hole_faces() {
        let mut store = TopologyStore::new();
        let outer = [p(0.0, 0.0, 0.0), p(6.0, 0.0, 0.0), p(6.0, 6.0, 0.0), p(0.0, 6.0, 0.0)];
        let hole = vec![p(2.0, 2.0, 0.0), p(4.0, 2.0, 0.0), p(4.0, 4.0, 0.0), p(2.0, 4.0, 0.0)];
        let face = make_face(&mut store, &outer, &[hole]);
        let solid = Extrude::new(face, Vector3::new(0.0, 0.0, 1.0))
            .execute(&mut store)
            .unwrap();

        let faces = store.solid_faces(solid).unwrap();
        // 2 caps + 4 outer sides + 4 hole sides.
        assert_eq!(faces.len(), 10);
        let cap_area = FaceArea::new(faces[0]).execute(&store).unwrap();
        assert!((cap_area - 32.0).abs() < 1e-9);
    }

    #[test]
    fn zero_direction_returns_error() {
        let mut store = TopologyStore::new();
        let face = make_face(
            &mut store,
            &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)],
            &[],
        );
        assert!(Extrude::new(face, Vector3::zeros()).execute(&mut store).is_err());
    }

    #[test]
    fn in_plane_direction_returns_error() {
        let mut store = TopologyStore::new();
        let face = make_face(
            &mut store,
            &[p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)],
            &[],
        );
        let result = Extrude::new(face, Vector3::new(1.0, 0.0, 0.0)).execute(&mut store);
        assert!(result.is_err());
    }
}
