//! The solid-modeling surface the arch assembler drives.
//!
//! Every operation returns a handle to what it created, so callers never
//! search the model by identity.

pub mod model;

pub use model::ModelKernel;

use serde::Serialize;

use crate::error::Result;
use crate::math::Point3;

slotmap::new_key_type! {
    /// A named node in the component tree.
    pub struct ComponentId;
    /// A construction plane.
    pub struct PlaneId;
    /// A sketch on a plane or on a model face.
    pub struct SketchId;
    /// A closed profile in a sketch, one or more loops.
    pub struct ProfileId;
    /// The result of a loft or extrude.
    pub struct FeatureId;
    /// A face exposed by a feature.
    pub struct FaceRef;
    /// An edge bounding a face.
    pub struct EdgeRef;
    /// An open sketch path.
    pub struct PathId;
    /// A text element placed along a path.
    pub struct TextId;
}

/// How a feature's solid combines with the component's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeatureOperation {
    NewBody,
    Cut,
    Join,
}

/// Extrusion side relative to the sketch plane normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExtentDirection {
    Positive,
    Negative,
}

impl ExtentDirection {
    /// `1.0` for `Positive`, `-1.0` for `Negative`.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// A face handle with its area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCandidate {
    pub face: FaceRef,
    pub area: f64,
}

/// An edge handle with its length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCandidate {
    pub edge: EdgeRef,
    pub length: f64,
}

/// Text placed along a sketch path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSpec {
    pub text: String,
    pub height: f64,
    pub centered: bool,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

/// Operations a solid modeler must provide to build the arch.
pub trait GeometryKernel {
    /// Removes every top-level component called `name`, with its subtree.
    ///
    /// Returns how many components were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails to delete a component.
    fn remove_component(&mut self, name: &str) -> Result<usize>;

    /// Creates a component under `parent`, or at the top level for `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is not a live component.
    fn create_component(&mut self, parent: Option<ComponentId>, name: &str) -> Result<ComponentId>;

    /// Creates the plane through three points. The normal follows
    /// `(p2 - p1) × (p3 - p1)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are collinear or the component is unknown.
    fn create_plane_from_three_points(
        &mut self,
        component: ComponentId,
        p1: Point3,
        p2: Point3,
        p3: Point3,
    ) -> Result<PlaneId>;

    /// # Errors
    ///
    /// Returns an error if a handle is unknown.
    fn create_sketch_on_plane(&mut self, component: ComponentId, plane: PlaneId) -> Result<SketchId>;

    /// Creates a sketch on a model face; its normal points out of the body.
    ///
    /// For a face left by a `Cut` that is into the removed material, so a
    /// `Negative` extent goes into the remaining wall.
    ///
    /// # Errors
    ///
    /// Returns an error if a handle is unknown.
    fn create_sketch_on_face(&mut self, component: ComponentId, face: FaceRef) -> Result<SketchId>;

    /// Adds a single-loop profile bounded by the closed polygon `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points do not lie on the sketch or are degenerate.
    fn add_profile(&mut self, sketch: SketchId, points: &[Point3]) -> Result<ProfileId>;

    /// Adds the two-loop profile between `outer` and `inner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the loops do not lie on the sketch or are degenerate.
    fn add_annular_profile(
        &mut self,
        sketch: SketchId,
        outer: &[Point3],
        inner: &[Point3],
    ) -> Result<ProfileId>;

    /// Number of boundary loops of a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is unknown.
    fn profile_loop_count(&self, profile: ProfileId) -> Result<usize>;

    /// Lofts between two profiles with matching loops.
    ///
    /// # Errors
    ///
    /// Returns an error if the profiles are incompatible or a `Cut`/`Join`
    /// has no body to act on.
    fn loft(
        &mut self,
        component: ComponentId,
        from: ProfileId,
        to: ProfileId,
        operation: FeatureOperation,
    ) -> Result<FeatureId>;

    /// Extrudes a profile `distance` along its sketch normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the distance is not positive or a `Cut`/`Join`
    /// has no body to act on.
    fn extrude(
        &mut self,
        component: ComponentId,
        profile: ProfileId,
        distance: f64,
        direction: ExtentDirection,
        operation: FeatureOperation,
    ) -> Result<FeatureId>;

    /// Faces a feature exposed in the model, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the feature is unknown.
    fn feature_faces(&mut self, feature: FeatureId) -> Result<Vec<FaceCandidate>>;

    /// Edges bounding a face, in boundary order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is unknown.
    fn face_edges(&mut self, face: FaceRef) -> Result<Vec<EdgeCandidate>>;

    /// Offsets `edge` by `distance` within `face`, toward the face centroid.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge does not bound the face.
    fn offset_edge_on_face(
        &mut self,
        sketch: SketchId,
        face: FaceRef,
        edge: EdgeRef,
        distance: f64,
    ) -> Result<PathId>;

    /// Places text along a sketch path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is unknown or the text is empty.
    fn text_along_path(&mut self, sketch: SketchId, path: PathId, spec: &TextSpec) -> Result<TextId>;

    /// Extrudes placed text along its sketch normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is unknown or the operation has no body.
    fn extrude_text(
        &mut self,
        component: ComponentId,
        text: TextId,
        distance: f64,
        direction: ExtentDirection,
        operation: FeatureOperation,
    ) -> Result<FeatureId>;
}
