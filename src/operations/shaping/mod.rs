mod extrude;
mod loft;

pub use extrude::Extrude;
pub use loft::Loft;

use crate::error::Result;
use crate::math::polygon_3d::newell_normal;
use crate::math::{Point3, Vector3};
use crate::operations::creation::{MakeFace, MakeWire};
use crate::topology::{FaceId, TopologyStore};

/// Boundary loops of a planar face: the outer ring first, then holes.
pub(crate) fn face_loops(store: &TopologyStore, face: FaceId) -> Result<Vec<Vec<Point3>>> {
    let data = store.face(face)?;
    let mut loops = Vec::with_capacity(1 + data.inner_wires.len());
    loops.push(store.wire_points(data.outer_wire)?);
    for &inner in &data.inner_wires {
        loops.push(store.wire_points(inner)?);
    }
    Ok(loops)
}

/// Returns `ring` ordered so its Newell normal points along `+axis`
/// (`along == true`) or `-axis` (`along == false`).
pub(crate) fn orient_ring(ring: &[Point3], axis: &Vector3, along: bool) -> Result<Vec<Point3>> {
    let normal = newell_normal(ring)?;
    if (normal.dot(axis) > 0.0) == along {
        Ok(ring.to_vec())
    } else {
        Ok(ring.iter().rev().copied().collect())
    }
}

/// Creates a planar face from closed rings using `MakeWire` + `MakeFace`.
pub(crate) fn make_planar_face(
    store: &mut TopologyStore,
    outer: &[Point3],
    holes: &[Vec<Point3>],
) -> Result<FaceId> {
    let outer_wire = MakeWire::new(outer.to_vec(), true).execute(store)?;
    let mut inner_wires = Vec::with_capacity(holes.len());
    for hole in holes {
        inner_wires.push(MakeWire::new(hole.clone(), true).execute(store)?);
    }
    MakeFace::new(outer_wire, inner_wires).execute(store)
}

/// Side quads joining two matched rings: `[a_i, a_j, b_j, b_i]` per edge.
pub(crate) fn make_side_faces(
    store: &mut TopologyStore,
    a: &[Point3],
    b: &[Point3],
) -> Result<Vec<FaceId>> {
    let n = a.len();
    let mut faces = Vec::with_capacity(n);
    for i in 0..n {
        let j = (i + 1) % n;
        let quad = [a[i], a[j], b[j], b[i]];
        faces.push(make_planar_face(store, &quad, &[])?);
    }
    Ok(faces)
}
