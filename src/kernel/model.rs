use slotmap::{SecondaryMap, SlotMap};
use tracing::debug;

use super::{
    ComponentId, EdgeCandidate, EdgeRef, ExtentDirection, FaceCandidate, FaceRef, FeatureId,
    FeatureOperation, GeometryKernel, PathId, PlaneId, ProfileId, SketchId, TextId, TextSpec,
};
use crate::error::{KernelError, OperationError, Result};
use crate::geometry::Plane;
use crate::math::polygon_3d::polygon_centroid_3d;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::operations::query::{FaceArea, Length};
use crate::operations::shaping::{make_planar_face, Extrude, Loft};
use crate::topology::{EdgeId, FaceId, SolidId, TopologyStore};

/// Maximum distance a profile point may sit off its sketch plane.
const ON_PLANE_TOLERANCE: f64 = 1e-6;

/// Glyph advance as a fraction of text height, used to size text boxes.
const GLYPH_ASPECT: f64 = 0.6;

#[derive(Debug, Clone)]
pub struct ComponentData {
    pub name: String,
    pub parent: Option<ComponentId>,
    /// The first `NewBody` feature; `Cut` and `Join` act on it.
    pub body: Option<FeatureId>,
}

#[derive(Debug, Clone)]
pub struct SketchData {
    pub component: ComponentId,
    pub plane: Plane,
}

#[derive(Debug, Clone)]
pub struct FeatureData {
    pub component: ComponentId,
    pub operation: FeatureOperation,
    /// Body the feature modifies; `None` for a `NewBody`.
    pub target: Option<FeatureId>,
    pub solid: SolidId,
    /// Faces left visible in the model once the feature is applied.
    pub exposed: Vec<FaceId>,
}

#[derive(Debug, Clone)]
pub struct PathData {
    pub sketch: SketchId,
    pub start: Point3,
    pub end: Point3,
}

#[derive(Debug, Clone)]
pub struct TextData {
    pub sketch: SketchId,
    pub path: PathId,
    pub spec: TextSpec,
    /// Closed outline of the text block on the sketch plane.
    pub outline: Vec<Point3>,
}

/// In-memory [`GeometryKernel`] backed by a [`TopologyStore`].
///
/// Profiles become planar faces, lofts and extrusions become closed solids.
/// Booleans are recorded rather than evaluated: each `Cut` or `Join` keeps
/// its own solid and a link to the body it acts on.
#[derive(Debug, Default)]
pub struct ModelKernel {
    store: TopologyStore,
    components: SlotMap<ComponentId, ComponentData>,
    planes: SlotMap<PlaneId, (ComponentId, Plane)>,
    sketches: SlotMap<SketchId, SketchData>,
    profiles: SlotMap<ProfileId, (SketchId, FaceId)>,
    features: SlotMap<FeatureId, FeatureData>,
    faces: SlotMap<FaceRef, FaceId>,
    face_refs: SecondaryMap<FaceId, FaceRef>,
    edges: SlotMap<EdgeRef, EdgeId>,
    edge_refs: SecondaryMap<EdgeId, EdgeRef>,
    paths: SlotMap<PathId, PathData>,
    texts: SlotMap<TextId, TextData>,
}

impl ModelKernel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying topology.
    #[must_use]
    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    /// # Errors
    ///
    /// Returns an error if the component is unknown.
    pub fn component(&self, id: ComponentId) -> Result<&ComponentData> {
        self.components
            .get(id)
            .ok_or_else(|| KernelError::UnknownHandle { kind: "component" }.into())
    }

    /// Live components named `name`.
    pub fn components_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = ComponentId> + 'a {
        self.components
            .iter()
            .filter(move |(_, c)| c.name == name)
            .map(|(id, _)| id)
    }

    /// Direct children of `parent`, in creation order.
    #[must_use]
    pub fn children(&self, parent: ComponentId) -> Vec<ComponentId> {
        self.components
            .iter()
            .filter(|(_, c)| c.parent == Some(parent))
            .map(|(id, _)| id)
            .collect()
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// # Errors
    ///
    /// Returns an error if the feature is unknown.
    pub fn feature(&self, id: FeatureId) -> Result<&FeatureData> {
        self.features
            .get(id)
            .ok_or_else(|| KernelError::UnknownHandle { kind: "feature" }.into())
    }

    /// # Errors
    ///
    /// Returns an error if the text is unknown.
    pub fn text(&self, id: TextId) -> Result<&TextData> {
        self.texts
            .get(id)
            .ok_or_else(|| KernelError::UnknownHandle { kind: "text" }.into())
    }

    /// # Errors
    ///
    /// Returns an error if the sketch is unknown.
    pub fn sketch(&self, id: SketchId) -> Result<&SketchData> {
        self.sketches
            .get(id)
            .ok_or_else(|| KernelError::UnknownHandle { kind: "sketch" }.into())
    }

    /// Boundary loops of a profile, outer loop first.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is unknown.
    pub fn profile_loops(&self, id: ProfileId) -> Result<Vec<Vec<Point3>>> {
        let face = self.profile_face(id)?;
        let data = self.store.face(face)?;
        let mut loops = vec![self.store.wire_points(data.outer_wire)?];
        for &inner in &data.inner_wires {
            loops.push(self.store.wire_points(inner)?);
        }
        Ok(loops)
    }

    fn profile_face(&self, id: ProfileId) -> Result<FaceId> {
        self.profiles
            .get(id)
            .map(|&(_, face)| face)
            .ok_or_else(|| KernelError::UnknownHandle { kind: "profile" }.into())
    }

    fn sketch_plane(&self, id: SketchId) -> Result<&Plane> {
        Ok(&self.sketch(id)?.plane)
    }

    fn face_id(&self, face: FaceRef) -> Result<FaceId> {
        self.faces
            .get(face)
            .copied()
            .ok_or_else(|| KernelError::UnknownHandle { kind: "face" }.into())
    }

    fn face_ref(&mut self, face: FaceId) -> FaceRef {
        if let Some(&r) = self.face_refs.get(face) {
            return r;
        }
        let r = self.faces.insert(face);
        self.face_refs.insert(face, r);
        r
    }

    fn edge_ref(&mut self, edge: EdgeId) -> EdgeRef {
        if let Some(&r) = self.edge_refs.get(edge) {
            return r;
        }
        let r = self.edges.insert(edge);
        self.edge_refs.insert(edge, r);
        r
    }

    fn check_on_plane(plane: &Plane, points: &[Point3]) -> Result<()> {
        match points
            .iter()
            .map(|p| plane.signed_distance(p).abs())
            .find(|d| *d > ON_PLANE_TOLERANCE)
        {
            Some(d) => Err(KernelError::Failed(format!(
                "profile point lies {d:.3e} off the sketch plane"
            ))
            .into()),
            None => Ok(()),
        }
    }

    fn is_cut_face(&self, face: FaceId) -> bool {
        self.features
            .values()
            .any(|f| f.operation == FeatureOperation::Cut && f.exposed.contains(&face))
    }

    /// Body a `Cut` or `Join` acts on; `None` for a `NewBody`.
    fn resolve_target(
        &self,
        component: ComponentId,
        operation: FeatureOperation,
    ) -> Result<Option<FeatureId>> {
        let data = self
            .components
            .get(component)
            .ok_or(KernelError::UnknownHandle { kind: "component" })?;
        match operation {
            FeatureOperation::NewBody => Ok(None),
            FeatureOperation::Cut | FeatureOperation::Join => data.body.map(Some).ok_or_else(|| {
                KernelError::Failed(format!(
                    "{operation:?} in component '{}' has no body to act on",
                    data.name
                ))
                .into()
            }),
        }
    }

    fn record_feature(
        &mut self,
        component: ComponentId,
        operation: FeatureOperation,
        target: Option<FeatureId>,
        solid: SolidId,
        exposed: Vec<FaceId>,
    ) -> FeatureId {
        let id = self.features.insert(FeatureData {
            component,
            operation,
            target,
            solid,
            exposed,
        });
        if operation == FeatureOperation::NewBody {
            if let Some(c) = self.components.get_mut(component) {
                c.body.get_or_insert(id);
            }
        }
        id
    }

    fn extrude_face(
        &mut self,
        component: ComponentId,
        face: FaceId,
        normal: Vector3,
        distance: f64,
        direction: ExtentDirection,
        operation: FeatureOperation,
    ) -> Result<FeatureId> {
        if !(distance.is_finite() && distance > TOLERANCE) {
            return Err(OperationError::InvalidInput(format!(
                "extrude distance must be positive, got {distance}"
            ))
            .into());
        }
        let target = self.resolve_target(component, operation)?;
        let solid =
            Extrude::new(face, normal * (distance * direction.sign())).execute(&mut self.store)?;
        let exposed = self.store.solid_faces(solid)?;
        Ok(self.record_feature(component, operation, target, solid, exposed))
    }
}

impl GeometryKernel for ModelKernel {
    fn remove_component(&mut self, name: &str) -> Result<usize> {
        let roots: Vec<ComponentId> = self
            .components
            .iter()
            .filter(|(_, c)| c.parent.is_none() && c.name == name)
            .map(|(id, _)| id)
            .collect();

        let mut doomed = roots.clone();
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i];
            doomed.extend(self.children(parent));
            i += 1;
        }

        self.components.retain(|id, _| !doomed.contains(&id));
        self.planes.retain(|_, (c, _)| !doomed.contains(c));
        self.sketches.retain(|_, s| !doomed.contains(&s.component));

        let store = &mut self.store;
        self.features.retain(|_, f| {
            let keep = !doomed.contains(&f.component);
            if !keep {
                store.remove_solid(f.solid);
            }
            keep
        });
        let sketches = &self.sketches;
        self.profiles.retain(|_, (s, face)| {
            let keep = sketches.contains_key(*s);
            if !keep {
                store.remove_face(*face);
            }
            keep
        });
        self.paths.retain(|_, p| sketches.contains_key(p.sketch));
        self.texts.retain(|_, t| sketches.contains_key(t.sketch));

        let store = &self.store;
        self.faces.retain(|_, f| store.face(*f).is_ok());
        self.face_refs.retain(|f, _| store.face(f).is_ok());
        self.edges.retain(|_, e| store.edge(*e).is_ok());
        self.edge_refs.retain(|e, _| store.edge(e).is_ok());

        if !roots.is_empty() {
            debug!(name, removed = doomed.len(), "removed component tree");
        }
        Ok(roots.len())
    }

    fn create_component(&mut self, parent: Option<ComponentId>, name: &str) -> Result<ComponentId> {
        if let Some(p) = parent {
            self.component(p)?;
        }
        Ok(self.components.insert(ComponentData {
            name: name.to_owned(),
            parent,
            body: None,
        }))
    }

    fn create_plane_from_three_points(
        &mut self,
        component: ComponentId,
        p1: Point3,
        p2: Point3,
        p3: Point3,
    ) -> Result<PlaneId> {
        self.component(component)?;
        let plane = Plane::from_three_points(p1, p2, p3)?;
        Ok(self.planes.insert((component, plane)))
    }

    fn create_sketch_on_plane(&mut self, component: ComponentId, plane: PlaneId) -> Result<SketchId> {
        self.component(component)?;
        let (_, plane) = self
            .planes
            .get(plane)
            .ok_or(KernelError::UnknownHandle { kind: "plane" })?;
        let plane = plane.clone();
        Ok(self.sketches.insert(SketchData { component, plane }))
    }

    fn create_sketch_on_face(&mut self, component: ComponentId, face: FaceRef) -> Result<SketchId> {
        self.component(component)?;
        let face = self.face_id(face)?;
        let surface = &self.store.face(face)?.surface;
        // Faces a cut leaves behind bound the remaining body, so they face the
        // removed material rather than the tool's outside.
        let plane = if self.is_cut_face(face) {
            surface.flipped()
        } else {
            surface.clone()
        };
        Ok(self.sketches.insert(SketchData { component, plane }))
    }

    fn add_profile(&mut self, sketch: SketchId, points: &[Point3]) -> Result<ProfileId> {
        Self::check_on_plane(self.sketch_plane(sketch)?, points)?;
        let face = make_planar_face(&mut self.store, points, &[])?;
        Ok(self.profiles.insert((sketch, face)))
    }

    fn add_annular_profile(
        &mut self,
        sketch: SketchId,
        outer: &[Point3],
        inner: &[Point3],
    ) -> Result<ProfileId> {
        let plane = self.sketch_plane(sketch)?;
        Self::check_on_plane(plane, outer)?;
        Self::check_on_plane(plane, inner)?;
        let face = make_planar_face(&mut self.store, outer, &[inner.to_vec()])?;
        Ok(self.profiles.insert((sketch, face)))
    }

    fn profile_loop_count(&self, profile: ProfileId) -> Result<usize> {
        let face = self.profile_face(profile)?;
        Ok(1 + self.store.face(face)?.inner_wires.len())
    }

    fn loft(
        &mut self,
        component: ComponentId,
        from: ProfileId,
        to: ProfileId,
        operation: FeatureOperation,
    ) -> Result<FeatureId> {
        let start = self.profile_face(from)?;
        let end = self.profile_face(to)?;
        let target = self.resolve_target(component, operation)?;
        let solid = Loft::new(start, end).execute(&mut self.store)?;
        let faces = self.store.solid_faces(solid)?;
        // A cut loft spanning the body leaves only its lateral walls exposed.
        let exposed = match operation {
            FeatureOperation::Cut => faces.get(2..).map(<[FaceId]>::to_vec).unwrap_or_default(),
            FeatureOperation::NewBody | FeatureOperation::Join => faces,
        };
        Ok(self.record_feature(component, operation, target, solid, exposed))
    }

    fn extrude(
        &mut self,
        component: ComponentId,
        profile: ProfileId,
        distance: f64,
        direction: ExtentDirection,
        operation: FeatureOperation,
    ) -> Result<FeatureId> {
        let (sketch, face) = *self
            .profiles
            .get(profile)
            .ok_or(KernelError::UnknownHandle { kind: "profile" })?;
        let normal = *self.sketch_plane(sketch)?.normal();
        self.extrude_face(component, face, normal, distance, direction, operation)
    }

    fn feature_faces(&mut self, feature: FeatureId) -> Result<Vec<FaceCandidate>> {
        let exposed = self.feature(feature)?.exposed.clone();
        let mut candidates = Vec::with_capacity(exposed.len());
        for face in exposed {
            let area = FaceArea::new(face).execute(&self.store)?;
            candidates.push(FaceCandidate {
                face: self.face_ref(face),
                area,
            });
        }
        Ok(candidates)
    }

    fn face_edges(&mut self, face: FaceRef) -> Result<Vec<EdgeCandidate>> {
        let face = self.face_id(face)?;
        let data = self.store.face(face)?;
        let mut edge_ids = Vec::new();
        for &wire in std::iter::once(&data.outer_wire).chain(&data.inner_wires) {
            edge_ids.extend(self.store.wire(wire)?.edges.iter().map(|oe| oe.edge));
        }
        let mut candidates = Vec::with_capacity(edge_ids.len());
        for edge in edge_ids {
            let length = Length::new(edge).execute(&self.store)?;
            candidates.push(EdgeCandidate {
                edge: self.edge_ref(edge),
                length,
            });
        }
        Ok(candidates)
    }

    fn offset_edge_on_face(
        &mut self,
        sketch: SketchId,
        face: FaceRef,
        edge: EdgeRef,
        distance: f64,
    ) -> Result<PathId> {
        self.sketch(sketch)?;
        let face = self.face_id(face)?;
        let edge = self
            .edges
            .get(edge)
            .copied()
            .ok_or(KernelError::UnknownHandle { kind: "edge" })?;

        let data = self.store.face(face)?;
        let outer = self.store.wire_points(data.outer_wire)?;
        let bounds_face = std::iter::once(&data.outer_wire)
            .chain(&data.inner_wires)
            .map(|&w| self.store.wire(w))
            .collect::<std::result::Result<Vec<_>, _>>()?
            .iter()
            .any(|w| w.edges.iter().any(|oe| oe.edge == edge));
        if !bounds_face {
            return Err(KernelError::Failed("edge does not bound the face".into()).into());
        }

        let edge_data = self.store.edge(edge)?;
        let start = self.store.vertex(edge_data.start)?.point;
        let end = self.store.vertex(edge_data.end)?.point;
        let along = (end - start).normalize();
        let mut across = data.surface.normal().cross(&along);
        let centroid = polygon_centroid_3d(&outer);
        if across.dot(&(centroid - start)) < 0.0 {
            across = -across;
        }
        let shift = across * distance;
        Ok(self.paths.insert(PathData {
            sketch,
            start: start + shift,
            end: end + shift,
        }))
    }

    fn text_along_path(&mut self, sketch: SketchId, path: PathId, spec: &TextSpec) -> Result<TextId> {
        let normal = *self.sketch_plane(sketch)?.normal();
        let path_data = self
            .paths
            .get(path)
            .ok_or(KernelError::UnknownHandle { kind: "path" })?;
        if spec.text.is_empty() {
            return Err(KernelError::Failed("text is empty".into()).into());
        }
        if !(spec.height.is_finite() && spec.height > 0.0) {
            return Err(KernelError::Failed(format!(
                "text height must be positive, got {}",
                spec.height
            ))
            .into());
        }

        let (mut start, mut end) = (path_data.start, path_data.end);
        if spec.flip_horizontal {
            std::mem::swap(&mut start, &mut end);
        }
        let along = (end - start).normalize();
        let mut up = normal.cross(&along);
        if spec.flip_vertical {
            up = -up;
        }
        #[allow(clippy::cast_precision_loss)]
        let width = spec.text.chars().count() as f64 * spec.height * GLYPH_ASPECT;
        let anchor = if spec.centered {
            Point3::from((start.coords + end.coords) * 0.5) - along * (width * 0.5)
        } else {
            start
        };
        let outline = vec![
            anchor,
            anchor + along * width,
            anchor + along * width + up * spec.height,
            anchor + up * spec.height,
        ];

        Ok(self.texts.insert(TextData {
            sketch,
            path,
            spec: spec.clone(),
            outline,
        }))
    }

    fn extrude_text(
        &mut self,
        component: ComponentId,
        text: TextId,
        distance: f64,
        direction: ExtentDirection,
        operation: FeatureOperation,
    ) -> Result<FeatureId> {
        let data = self.text(text)?;
        let outline = data.outline.clone();
        let normal = *self.sketch_plane(data.sketch)?.normal();
        let face = make_planar_face(&mut self.store, &outline, &[])?;
        let feature = self.extrude_face(component, face, normal, distance, direction, operation);
        // The solid copies the outline; the sketch face is not needed afterwards.
        self.store.remove_face(face);
        feature
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn triangle_at(z: f64, scale: f64) -> Vec<Point3> {
        vec![p(-scale, -scale, z), p(scale, -scale, z), p(0.0, scale, z)]
    }

    /// Component with a sketch on the `z = height` plane.
    fn sketch_at(kernel: &mut ModelKernel, component: ComponentId, z: f64) -> SketchId {
        let plane = kernel
            .create_plane_from_three_points(component, p(0.0, 0.0, z), p(1.0, 0.0, z), p(0.0, 1.0, z))
            .unwrap();
        kernel.create_sketch_on_plane(component, plane).unwrap()
    }

    fn lofted_body(kernel: &mut ModelKernel) -> (ComponentId, FeatureId) {
        let c = kernel.create_component(None, "Body").unwrap();
        let s0 = sketch_at(kernel, c, 0.0);
        let s1 = sketch_at(kernel, c, 10.0);
        let a = kernel.add_profile(s0, &triangle_at(0.0, 6.0)).unwrap();
        let b = kernel.add_profile(s1, &triangle_at(10.0, 6.0)).unwrap();
        let loft = kernel.loft(c, a, b, FeatureOperation::NewBody).unwrap();
        (c, loft)
    }

    #[test]
    fn profile_off_plane_is_rejected() {
        let mut kernel = ModelKernel::new();
        let c = kernel.create_component(None, "C").unwrap();
        let s = sketch_at(&mut kernel, c, 0.0);
        let result = kernel.add_profile(s, &triangle_at(0.5, 1.0));
        assert!(result.is_err());
    }

    #[test]
    fn annular_profile_has_two_loops() {
        let mut kernel = ModelKernel::new();
        let c = kernel.create_component(None, "C").unwrap();
        let s = sketch_at(&mut kernel, c, 0.0);
        let single = kernel.add_profile(s, &triangle_at(0.0, 4.0)).unwrap();
        let annulus = kernel
            .add_annular_profile(s, &triangle_at(0.0, 4.0), &triangle_at(0.0, 1.0))
            .unwrap();
        assert_eq!(kernel.profile_loop_count(single).unwrap(), 1);
        assert_eq!(kernel.profile_loop_count(annulus).unwrap(), 2);
    }

    #[test]
    fn cut_without_body_fails() {
        let mut kernel = ModelKernel::new();
        let c = kernel.create_component(None, "C").unwrap();
        let s = sketch_at(&mut kernel, c, 0.0);
        let profile = kernel.add_profile(s, &triangle_at(0.0, 1.0)).unwrap();
        let result = kernel.extrude(c, profile, 1.0, ExtentDirection::Positive, FeatureOperation::Cut);
        assert!(result.is_err());
    }

    #[test]
    fn cut_targets_first_new_body() {
        let mut kernel = ModelKernel::new();
        let (c, loft) = lofted_body(&mut kernel);
        let s = sketch_at(&mut kernel, c, 10.0);
        let profile = kernel.add_profile(s, &triangle_at(10.0, 2.0)).unwrap();
        let cut = kernel
            .extrude(c, profile, 1.5, ExtentDirection::Negative, FeatureOperation::Cut)
            .unwrap();
        assert_eq!(kernel.feature(cut).unwrap().target, Some(loft));
        assert_eq!(kernel.component(c).unwrap().body, Some(loft));
    }

    #[test]
    fn extrude_direction_follows_sketch_normal() {
        let mut kernel = ModelKernel::new();
        let (c, _) = lofted_body(&mut kernel);
        let s = sketch_at(&mut kernel, c, 10.0);
        let profile = kernel.add_profile(s, &triangle_at(10.0, 2.0)).unwrap();
        let cut = kernel
            .extrude(c, profile, 1.5, ExtentDirection::Negative, FeatureOperation::Cut)
            .unwrap();
        let solid = kernel.feature(cut).unwrap().solid;
        let faces = kernel.store().solid_faces(solid).unwrap();
        // Second cap is the translated profile.
        let cap = kernel.store().face(faces[1]).unwrap();
        let points = kernel.store().wire_points(cap.outer_wire).unwrap();
        assert_abs_diff_eq!(points[0].z, 8.5, epsilon = 1e-12);
    }

    #[test]
    fn cut_loft_exposes_only_lateral_faces() {
        let mut kernel = ModelKernel::new();
        let (c, loft) = lofted_body(&mut kernel);
        assert_eq!(kernel.feature_faces(loft).unwrap().len(), 5);

        let s0 = sketch_at(&mut kernel, c, 0.0);
        let s1 = sketch_at(&mut kernel, c, 10.0);
        let a = kernel.add_profile(s0, &triangle_at(0.0, 3.0)).unwrap();
        let b = kernel.add_profile(s1, &triangle_at(10.0, 3.0)).unwrap();
        let hollow = kernel.loft(c, a, b, FeatureOperation::Cut).unwrap();
        let faces = kernel.feature_faces(hollow).unwrap();
        assert_eq!(faces.len(), 3);
        // Bottom wall of the triangle prism: 6 wide, 10 long.
        assert_abs_diff_eq!(faces[0].area, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn sketch_on_cut_face_faces_the_removed_material() {
        let mut kernel = ModelKernel::new();
        let (c, loft) = lofted_body(&mut kernel);
        let s0 = sketch_at(&mut kernel, c, 0.0);
        let s1 = sketch_at(&mut kernel, c, 10.0);
        let a = kernel.add_profile(s0, &triangle_at(0.0, 3.0)).unwrap();
        let b = kernel.add_profile(s1, &triangle_at(10.0, 3.0)).unwrap();
        let hollow = kernel.loft(c, a, b, FeatureOperation::Cut).unwrap();

        // Bottom wall of the cavity sits at y = -3; the body is below it.
        let wall = kernel.feature_faces(hollow).unwrap()[0].face;
        let sketch = kernel.create_sketch_on_face(c, wall).unwrap();
        let normal = *kernel.sketch(sketch).unwrap().plane.normal();
        assert_abs_diff_eq!(normal.y, 1.0, epsilon = 1e-9);

        let outside = kernel.feature_faces(loft).unwrap()[2].face;
        let sketch = kernel.create_sketch_on_face(c, outside).unwrap();
        let normal = *kernel.sketch(sketch).unwrap().plane.normal();
        assert_abs_diff_eq!(normal.y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn removing_a_component_frees_its_topology() {
        let mut kernel = ModelKernel::new();
        let (c, loft) = lofted_body(&mut kernel);
        let face = kernel.feature_faces(loft).unwrap()[2].face;
        kernel.face_edges(face).unwrap();
        let s = sketch_at(&mut kernel, c, 10.0);
        let profile = kernel.add_profile(s, &triangle_at(10.0, 2.0)).unwrap();
        kernel
            .extrude(c, profile, 1.5, ExtentDirection::Negative, FeatureOperation::Cut)
            .unwrap();
        assert_eq!(kernel.store().solid_count(), 2);

        kernel.remove_component("Body").unwrap();
        assert_eq!(kernel.store().solid_count(), 0);
        assert_eq!(kernel.store().face_count(), 0);
        assert_eq!(kernel.store().vertex_count(), 0);
        assert!(kernel.faces.is_empty() && kernel.face_refs.is_empty());
        assert!(kernel.edges.is_empty() && kernel.edge_refs.is_empty());
    }

    #[test]
    fn face_handles_are_stable() {
        let mut kernel = ModelKernel::new();
        let (_, loft) = lofted_body(&mut kernel);
        let first = kernel.feature_faces(loft).unwrap();
        let second = kernel.feature_faces(loft).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn face_edges_report_lengths() {
        let mut kernel = ModelKernel::new();
        let (_, loft) = lofted_body(&mut kernel);
        let faces = kernel.feature_faces(loft).unwrap();
        let edges = kernel.face_edges(faces[2].face).unwrap();
        assert_eq!(edges.len(), 4);
        let longest = edges.iter().map(|e| e.length).fold(0.0, f64::max);
        assert_abs_diff_eq!(longest, 12.0, epsilon = 1e-9);
    }

    #[test]
    fn offset_edge_moves_toward_face_centroid() {
        let mut kernel = ModelKernel::new();
        let (c, loft) = lofted_body(&mut kernel);
        let faces = kernel.feature_faces(loft).unwrap();
        let face = faces[2].face;
        let edges = kernel.face_edges(face).unwrap();
        let sketch = kernel.create_sketch_on_face(c, face).unwrap();
        let path = kernel
            .offset_edge_on_face(sketch, face, edges[0].edge, 1.0)
            .unwrap();
        let data = &kernel.paths[path];
        let plane = &kernel.sketch(sketch).unwrap().plane;
        assert_abs_diff_eq!(plane.signed_distance(&data.start), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(plane.signed_distance(&data.end), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!((data.end - data.start).norm(), edges[0].length, epsilon = 1e-9);
    }

    #[test]
    fn text_extrudes_into_body() {
        let mut kernel = ModelKernel::new();
        let (c, loft) = lofted_body(&mut kernel);
        let faces = kernel.feature_faces(loft).unwrap();
        let face = faces[2].face;
        let edges = kernel.face_edges(face).unwrap();
        let sketch = kernel.create_sketch_on_face(c, face).unwrap();
        let path = kernel
            .offset_edge_on_face(sketch, face, edges[0].edge, 1.0)
            .unwrap();
        let spec = TextSpec {
            text: "12".into(),
            height: 2.0,
            centered: true,
            flip_horizontal: true,
            flip_vertical: true,
        };
        let text = kernel.text_along_path(sketch, path, &spec).unwrap();
        assert_eq!(kernel.text(text).unwrap().outline.len(), 4);
        let cut = kernel
            .extrude_text(c, text, 0.2, ExtentDirection::Negative, FeatureOperation::Cut)
            .unwrap();
        assert_eq!(kernel.feature(cut).unwrap().target, Some(loft));
    }

    #[test]
    fn empty_text_is_rejected() {
        let mut kernel = ModelKernel::new();
        let (c, loft) = lofted_body(&mut kernel);
        let face = kernel.feature_faces(loft).unwrap()[2].face;
        let edge = kernel.face_edges(face).unwrap()[0].edge;
        let sketch = kernel.create_sketch_on_face(c, face).unwrap();
        let path = kernel.offset_edge_on_face(sketch, face, edge, 1.0).unwrap();
        let spec = TextSpec {
            text: String::new(),
            height: 2.0,
            centered: true,
            flip_horizontal: false,
            flip_vertical: false,
        };
        assert!(kernel.text_along_path(sketch, path, &spec).is_err());
    }

    #[test]
    fn remove_component_drops_subtree() {
        let mut kernel = ModelKernel::new();
        let root = kernel.create_component(None, "Arch").unwrap();
        let child = kernel.create_component(Some(root), "Section 1").unwrap();
        kernel.create_component(Some(child), "Detail").unwrap();
        let other = kernel.create_component(None, "Other").unwrap();
        sketch_at(&mut kernel, child, 0.0);

        assert_eq!(kernel.remove_component("Arch").unwrap(), 1);
        assert_eq!(kernel.component_count(), 1);
        assert!(kernel.component(other).is_ok());
        assert!(kernel.sketches.is_empty());
        assert_eq!(kernel.remove_component("Arch").unwrap(), 0);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut kernel = ModelKernel::new();
        let root = kernel.create_component(None, "Arch").unwrap();
        kernel.remove_component("Arch").unwrap();
        assert!(kernel.create_component(Some(root), "Section 1").is_err());
    }
}
