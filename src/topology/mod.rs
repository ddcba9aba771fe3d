//! Boundary representation of profiles and solids.
//!
//! Entities live in slotmap arenas inside [`TopologyStore`] and refer to each
//! other by generational keys.

pub mod edge;
pub mod face;
pub mod shell;
pub mod solid;
pub mod vertex;
pub mod wire;

pub use edge::{EdgeData, EdgeId};
pub use face::{FaceData, FaceId};
pub use shell::{ShellData, ShellId};
pub use solid::{SolidData, SolidId};
pub use vertex::{VertexData, VertexId};
pub use wire::{OrientedEdge, WireData, WireId};

use slotmap::SlotMap;

use crate::error::TopologyError;
use crate::math::Point3;

/// Owner of every vertex, edge, wire, face, shell and solid.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    wires: SlotMap<WireId, WireData>,
    faces: SlotMap<FaceId, FaceData>,
    shells: SlotMap<ShellId, ShellData>,
    solids: SlotMap<SolidId, SolidData>,
}

/// Generates an `add_*` inserter and a fallible getter for one arena.
macro_rules! arena {
    ($field:ident, $add:ident, $get:ident, $id:ty, $data:ty, $kind:literal) => {
        pub fn $add(&mut self, data: $data) -> $id {
            self.$field.insert(data)
        }

        /// # Errors
        ///
        #[doc = concat!("Returns `TopologyError::EntityNotFound` for a stale or foreign ", $kind, " id.")]
        pub fn $get(&self, id: $id) -> Result<&$data, TopologyError> {
            self.$field
                .get(id)
                .ok_or_else(|| TopologyError::EntityNotFound($kind.into()))
        }
    };
}

impl TopologyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    arena!(vertices, add_vertex, vertex, VertexId, VertexData, "vertex");
    arena!(edges, add_edge, edge, EdgeId, EdgeData, "edge");
    arena!(wires, add_wire, wire, WireId, WireData, "wire");
    arena!(faces, add_face, face, FaceId, FaceData, "face");
    arena!(shells, add_shell, shell, ShellId, ShellData, "shell");
    arena!(solids, add_solid, solid, SolidId, SolidData, "solid");

    /// Vertex positions of a wire in traversal order, one per edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the wire or anything it references is missing.
    pub fn wire_points(&self, id: WireId) -> Result<Vec<Point3>, TopologyError> {
        self.wire(id)?
            .edges
            .iter()
            .map(|oe| {
                let edge = self.edge(oe.edge)?;
                let start = if oe.forward { edge.start } else { edge.end };
                Ok(self.vertex(start)?.point)
            })
            .collect()
    }

    /// Faces of a solid: the outer shell, then any void shells.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid or one of its shells is missing.
    pub fn solid_faces(&self, id: SolidId) -> Result<Vec<FaceId>, TopologyError> {
        let solid = self.solid(id)?;
        let mut faces = self.shell(solid.outer_shell)?.faces.clone();
        for &inner in &solid.inner_shells {
            faces.extend_from_slice(&self.shell(inner)?.faces);
        }
        Ok(faces)
    }

    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Removes a face with its wires, edges and vertices.
    ///
    /// The face must own its boundary; nothing shared with another face is
    /// checked for. Stale ids are ignored.
    pub fn remove_face(&mut self, id: FaceId) {
        let Some(face) = self.faces.remove(id) else {
            return;
        };
        for wire in std::iter::once(face.outer_wire).chain(face.inner_wires) {
            let Some(wire) = self.wires.remove(wire) else {
                continue;
            };
            for oe in wire.edges {
                if let Some(edge) = self.edges.remove(oe.edge) {
                    self.vertices.remove(edge.start);
                    self.vertices.remove(edge.end);
                }
            }
        }
    }

    /// Removes a solid, its shells and every face they hold.
    pub fn remove_solid(&mut self, id: SolidId) {
        let Some(solid) = self.solids.remove(id) else {
            return;
        };
        for shell in std::iter::once(solid.outer_shell).chain(solid.inner_shells) {
            if let Some(shell) = self.shells.remove(shell) {
                for face in shell.faces {
                    self.remove_face(face);
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeWire;

    #[test]
    fn reversed_edges_start_at_their_end_vertex() {
        let mut store = TopologyStore::new();
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let wire = MakeWire::new(points.clone(), true).execute(&mut store).unwrap();
        let reversed = WireData {
            edges: store
                .wire(wire)
                .unwrap()
                .edges
                .iter()
                .rev()
                .map(|oe| OrientedEdge::new(oe.edge, !oe.forward))
                .collect(),
            is_closed: true,
        };
        let reversed = store.add_wire(reversed);
        let walked = store.wire_points(reversed).unwrap();
        assert_eq!(walked, vec![points[0], points[2], points[1]]);
    }

    #[test]
    fn removing_a_solid_frees_its_topology() {
        use crate::math::Vector3;
        use crate::operations::shaping::{make_planar_face, Extrude};

        let mut store = TopologyStore::new();
        let triangle = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let base = make_planar_face(&mut store, &triangle, &[]).unwrap();
        let faces_before = store.face_count();
        let vertices_before = store.vertex_count();

        let solid = Extrude::new(base, Vector3::new(0.0, 0.0, 1.0))
            .execute(&mut store)
            .unwrap();
        assert_eq!(store.face_count(), faces_before + 5);

        store.remove_solid(solid);
        assert_eq!(store.solid_count(), 0);
        assert_eq!(store.face_count(), faces_before);
        assert_eq!(store.vertex_count(), vertices_before);
        assert!(store.face(base).is_ok());

        store.remove_face(base);
        assert_eq!(store.face_count(), 0);
        assert_eq!(store.vertex_count(), 0);
    }

    #[test]
    fn missing_solid_is_reported() {
        let mut other = TopologyStore::new();
        let shell = other.add_shell(ShellData {
            faces: Vec::new(),
            is_closed: false,
        });
        let solid = other.add_solid(SolidData {
            outer_shell: shell,
            inner_shells: Vec::new(),
        });
        let store = TopologyStore::new();
        assert!(matches!(
            store.solid_faces(solid),
            Err(TopologyError::EntityNotFound(_))
        ));
        assert_eq!(other.solid_count(), 1);
    }
}
