use serde::Serialize;
use tracing::{debug, info_span};

use super::contours::{build_contours, OffsetContourSet, OffsetMargins};
use super::select::{select_largest_face, select_longest_edge};
use super::solver::StationSample;
use crate::config::FeatureSettings;
use crate::error::{KernelError, Result};
use crate::kernel::{
    ComponentId, ExtentDirection, FeatureId, FeatureOperation, GeometryKernel, PlaneId, ProfileId,
    SketchId, TextSpec,
};

/// Side each section's lip is extruded to.
///
/// Section 1 seats its lip against the apex cap, whose sketch faces the other
/// way from every later station, so only that joint extrudes negatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LipDirection {
    AgainstApex,
    AgainstPrevious,
}

impl LipDirection {
    #[must_use]
    pub fn for_index(index: usize) -> Self {
        if index == 1 {
            Self::AgainstApex
        } else {
            Self::AgainstPrevious
        }
    }

    #[must_use]
    pub fn extent(self) -> ExtentDirection {
        match self {
            Self::AgainstApex => ExtentDirection::Negative,
            Self::AgainstPrevious => ExtentDirection::Positive,
        }
    }
}

/// A solved station with its contours sketched into the kernel.
///
/// This is the state handed from one section to the next.
#[derive(Debug, Clone)]
pub struct StationProfiles {
    pub sample: StationSample,
    pub contours: OffsetContourSet,
    pub plane: PlaneId,
    pub sketch: SketchId,
    /// Raw triangle, one loop.
    pub outer: ProfileId,
    /// Registration groove, one loop.
    pub notch: ProfileId,
    /// Lip band, two loops.
    pub lip: ProfileId,
    /// Interior cavity, one loop.
    pub hollow: ProfileId,
}

/// Features created for one section of the arch.
#[derive(Debug, Clone)]
pub struct ArchSegment {
    /// 1-based station index; the section spans stations `index - 1` and `index`.
    pub index: usize,
    pub name: String,
    pub component: ComponentId,
    pub loft: FeatureId,
    pub notch: FeatureId,
    pub hollow: FeatureId,
    pub label: FeatureId,
    pub label_text: String,
    pub lip: FeatureId,
    pub lip_direction: ExtentDirection,
}

/// Sketches a station's section plane and its four profiles.
///
/// The apex plane is built with its exterior pair swapped so that its normal
/// points toward positive x; every other station uses sketch order.
///
/// # Errors
///
/// Returns an error if the contours cannot be built or a profile does not
/// come back with the expected number of loops.
pub fn sketch_station<K: GeometryKernel>(
    kernel: &mut K,
    component: ComponentId,
    sample: StationSample,
    margins: &OffsetMargins,
    apex: bool,
) -> Result<StationProfiles> {
    let contours = build_contours(&sample.triangle, margins)?;
    let [negative, positive, interior] = sample.triangle.vertices();
    let plane = if apex {
        kernel.create_plane_from_three_points(component, positive, negative, interior)?
    } else {
        kernel.create_plane_from_three_points(component, negative, positive, interior)?
    };
    let sketch = kernel.create_sketch_on_plane(component, plane)?;

    let outer = kernel.add_profile(sketch, &contours.outer)?;
    let notch = kernel.add_profile(sketch, &contours.notch)?;
    let lip = kernel.add_annular_profile(sketch, &contours.lip.outer, &contours.lip.inner)?;
    let hollow = kernel.add_profile(sketch, &contours.hollow)?;

    for (profile, expected) in [(outer, 1), (notch, 1), (lip, 2), (hollow, 1)] {
        let found = kernel.profile_loop_count(profile)?;
        if found != expected {
            return Err(KernelError::LoopCount { expected, found }.into());
        }
    }

    debug!(
        x = sample.x,
        elevation = sample.elevation,
        tangent_angle = sample.tangent_angle,
        size = sample.cross_section_size,
        "sketched station"
    );

    Ok(StationProfiles {
        sample,
        contours,
        plane,
        sketch,
        outer,
        notch,
        lip,
        hollow,
    })
}

/// Builds the section between `prev` and `curr` as a child of `parent`.
///
/// Order matters: the loft creates the body every later cut and join acts on,
/// and the label is placed on a face of the hollow cut.
///
/// # Errors
///
/// Returns the first kernel error; nothing is retried.
pub fn assemble_segment<K: GeometryKernel>(
    kernel: &mut K,
    parent: ComponentId,
    prev: &StationProfiles,
    curr: &StationProfiles,
    index: usize,
    features: &FeatureSettings,
) -> Result<ArchSegment> {
    let _span = info_span!("section", index).entered();
    let name = format!("Section {index}");
    let component = kernel.create_component(Some(parent), &name)?;

    let loft = kernel.loft(component, prev.outer, curr.outer, FeatureOperation::NewBody)?;
    let notch = kernel.extrude(
        component,
        curr.notch,
        features.notch_depth,
        ExtentDirection::Positive,
        FeatureOperation::Cut,
    )?;
    let hollow = kernel.loft(component, prev.hollow, curr.hollow, FeatureOperation::Cut)?;

    let label_text = index.to_string();
    let label = carve_label(kernel, component, hollow, &label_text, features)?;

    let lip_direction = LipDirection::for_index(index).extent();
    let lip = kernel.extrude(
        component,
        prev.lip,
        features.lip_depth,
        lip_direction,
        FeatureOperation::Join,
    )?;

    debug!(?lip_direction, "section assembled");

    Ok(ArchSegment {
        index,
        name,
        component,
        loft,
        notch,
        hollow,
        label,
        label_text,
        lip,
        lip_direction,
    })
}

/// Cuts `text` into the largest wall the hollow exposed, along its longest edge.
fn carve_label<K: GeometryKernel>(
    kernel: &mut K,
    component: ComponentId,
    hollow: FeatureId,
    text: &str,
    features: &FeatureSettings,
) -> Result<FeatureId> {
    let faces = kernel.feature_faces(hollow)?;
    let face = select_largest_face(&faces)
        .ok_or(KernelError::NoCandidates("label face"))?
        .face;
    let edges = kernel.face_edges(face)?;
    let edge = select_longest_edge(&edges)
        .ok_or(KernelError::NoCandidates("label edge"))?
        .edge;

    let sketch = kernel.create_sketch_on_face(component, face)?;
    let path = kernel.offset_edge_on_face(sketch, face, edge, features.label_inset)?;
    let spec = TextSpec {
        text: text.to_owned(),
        height: features.label_height,
        centered: true,
        flip_horizontal: true,
        flip_vertical: true,
    };
    let placed = kernel.text_along_path(sketch, path, &spec)?;
    kernel.extrude_text(
        component,
        placed,
        features.label_depth,
        ExtentDirection::Negative,
        FeatureOperation::Cut,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::arch::constants::ArchPhysicalConstants;
    use crate::arch::solver::{solve_apex, solve_station};
    use crate::kernel::ModelKernel;
    use crate::math::polygon_3d::polygon_centroid_3d;
    use crate::math::Point3;
    use approx::assert_abs_diff_eq;

    fn apex_and_first(kernel: &mut ModelKernel, arch: ComponentId) -> (StationProfiles, StationProfiles) {
        let c = ArchPhysicalConstants::gateway();
        let margins = OffsetMargins::default();
        let apex = sketch_station(kernel, arch, solve_apex(&c), &margins, true).unwrap();
        let first = sketch_station(kernel, arch, solve_station(7.736, &c), &margins, false).unwrap();
        (apex, first)
    }

    #[test]
    fn lip_direction_is_negative_only_for_first_section() {
        assert_eq!(LipDirection::for_index(1).extent(), ExtentDirection::Negative);
        for index in [2, 3, 40, 71] {
            assert_eq!(LipDirection::for_index(index).extent(), ExtentDirection::Positive);
        }
    }

    #[test]
    fn apex_sketch_faces_positive_x() {
        let mut kernel = ModelKernel::new();
        let arch = kernel.create_component(None, "Arch").unwrap();
        let (apex, first) = apex_and_first(&mut kernel, arch);
        let apex_normal = *kernel.sketch(apex.sketch).unwrap().plane.normal();
        assert_abs_diff_eq!(apex_normal.x, 1.0, epsilon = 1e-9);
        let first_normal = *kernel.sketch(first.sketch).unwrap().plane.normal();
        assert!(first_normal.x < 0.0);
    }

    #[test]
    fn station_profiles_have_expected_loops() {
        let mut kernel = ModelKernel::new();
        let arch = kernel.create_component(None, "Arch").unwrap();
        let (apex, _) = apex_and_first(&mut kernel, arch);
        assert_eq!(kernel.profile_loops(apex.outer).unwrap().len(), 1);
        assert_eq!(kernel.profile_loops(apex.lip).unwrap().len(), 2);
        assert_eq!(kernel.profile_loops(apex.hollow).unwrap().len(), 1);
        assert_eq!(kernel.profile_loops(apex.notch).unwrap().len(), 1);
    }

    #[test]
    fn segment_builds_features_in_order() {
        let mut kernel = ModelKernel::new();
        let arch = kernel.create_component(None, "Arch").unwrap();
        let (apex, first) = apex_and_first(&mut kernel, arch);
        let segment =
            assemble_segment(&mut kernel, arch, &apex, &first, 1, &FeatureSettings::default())
                .unwrap();

        assert_eq!(segment.name, "Section 1");
        assert_eq!(segment.label_text, "1");
        assert_eq!(segment.lip_direction, ExtentDirection::Negative);
        assert_eq!(kernel.component(segment.component).unwrap().parent, Some(arch));

        let loft = kernel.feature(segment.loft).unwrap();
        assert_eq!(loft.operation, FeatureOperation::NewBody);
        for (feature, operation) in [
            (segment.notch, FeatureOperation::Cut),
            (segment.hollow, FeatureOperation::Cut),
            (segment.label, FeatureOperation::Cut),
            (segment.lip, FeatureOperation::Join),
        ] {
            let data = kernel.feature(feature).unwrap();
            assert_eq!(data.operation, operation);
            assert_eq!(data.target, Some(segment.loft));
        }
    }

    #[test]
    fn label_text_is_the_index() {
        let mut kernel = ModelKernel::new();
        let arch = kernel.create_component(None, "Arch").unwrap();
        let c = ArchPhysicalConstants::gateway();
        let margins = OffsetMargins::default();
        let prev = sketch_station(&mut kernel, arch, solve_station(100.0101, &c), &margins, false)
            .unwrap();
        let curr = sketch_station(&mut kernel, arch, solve_station(106.098, &c), &margins, false)
            .unwrap();
        let segment =
            assemble_segment(&mut kernel, arch, &prev, &curr, 15, &FeatureSettings::default())
                .unwrap();
        assert_eq!(segment.label_text, "15");
        assert_eq!(segment.lip_direction, ExtentDirection::Positive);
    }

    #[test]
    fn label_is_carved_into_the_wall() {
        let mut kernel = ModelKernel::new();
        let arch = kernel.create_component(None, "Arch").unwrap();
        let c = ArchPhysicalConstants::gateway();
        let margins = OffsetMargins::default();
        let prev = sketch_station(&mut kernel, arch, solve_station(100.0101, &c), &margins, false)
            .unwrap();
        let curr = sketch_station(&mut kernel, arch, solve_station(106.098, &c), &margins, false)
            .unwrap();
        let segment =
            assemble_segment(&mut kernel, arch, &prev, &curr, 15, &FeatureSettings::default())
                .unwrap();

        let cavity = Point3::from((prev.contours.origin.coords + curr.contours.origin.coords) * 0.5);
        let solid = kernel.feature(segment.label).unwrap().solid;
        let faces = kernel.store().solid_faces(solid).unwrap();
        let cap_centroid = |face| {
            let data = kernel.store().face(face).unwrap();
            polygon_centroid_3d(&kernel.store().wire_points(data.outer_wire).unwrap())
        };
        // Base cap lies on the hollow's wall, the far cap is the carved depth.
        let base = (cap_centroid(faces[0]) - cavity).norm();
        let tip = (cap_centroid(faces[1]) - cavity).norm();
        assert!(tip > base, "label runs into the cavity: base {base}, tip {tip}");
        assert_abs_diff_eq!(tip - base, 0.2, epsilon = 0.05);
    }
}
