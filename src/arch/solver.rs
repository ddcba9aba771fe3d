use std::f64::consts::{FRAC_PI_2, PI};

use rayon::prelude::*;
use serde::Serialize;

use super::constants::ArchPhysicalConstants;
use crate::error::Result;
use crate::geometry::Plane;
use crate::math::{Point3, Vector3};

/// Triangular cross-section of one arch leg at a station.
///
/// The two exterior vertices mirror each other across the `y = 0` symmetry
/// plane and form the outer face of the leg; the interior vertex lies on that
/// plane, on the inside of the arch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Triangle3D {
    pub exterior_negative: Point3,
    pub exterior_positive: Point3,
    pub interior: Point3,
}

impl Triangle3D {
    /// Vertices in sketch order: exterior negative, exterior positive, interior.
    #[must_use]
    pub fn vertices(&self) -> [Point3; 3] {
        [self.exterior_negative, self.exterior_positive, self.interior]
    }

    #[must_use]
    pub fn centroid(&self) -> Point3 {
        Point3::from(
            (self.exterior_negative.coords + self.exterior_positive.coords + self.interior.coords)
                / 3.0,
        )
    }

    /// Plane through the vertices in sketch order.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangle is degenerate.
    pub fn plane(&self) -> Result<Plane> {
        Plane::from_three_points(self.exterior_negative, self.exterior_positive, self.interior)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * (self.exterior_positive - self.exterior_negative)
            .cross(&(self.interior - self.exterior_negative))
            .norm()
    }

    /// Radius of the inscribed circle, `area / semi-perimeter`.
    #[must_use]
    pub fn inradius(&self) -> f64 {
        let [a, b, c] = self.vertices();
        let semi_perimeter = ((b - a).norm() + (c - b).norm() + (a - c).norm()) * 0.5;
        if semi_perimeter <= 0.0 {
            return 0.0;
        }
        self.area() / semi_perimeter
    }
}

/// One solved point of the arch spine with its cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationSample {
    /// Horizontal offset from the centerline.
    pub x: f64,
    /// Height dropped from the apex (`y` of the catenary).
    pub drop: f64,
    /// Height of the section centroid above the ground.
    pub elevation: f64,
    /// Inclination of the section's radial axis from horizontal, perpendicular
    /// to the spine. `π/2` at the apex, where the spine is level.
    pub tangent_angle: f64,
    /// Interpolated section area.
    pub cross_section_size: f64,
    /// Distance from the exterior face to the interior vertex.
    pub leg_half_height: f64,
    /// Half the exterior face width.
    pub half_width: f64,
    pub triangle: Triangle3D,
}

/// Solves the spine and cross-section at horizontal offset `x`.
///
/// The section centroid sits on the spine; the exterior edge is `H/3` outward
/// and the interior vertex `2H/3` inward along the section's radial axis,
/// which is perpendicular to the spine tangent.
#[must_use]
pub fn solve_station(x: f64, constants: &ArchPhysicalConstants) -> StationSample {
    let scale = constants.scale_constant();
    let growth = constants.growth_constant();
    let span = constants.span_feet();
    let height = constants.height_feet();

    let drop = scale * ((growth * x.abs() / span).cosh() - 1.0);
    let elevation = height - drop;

    let slope_term = (2.0 * scale * drop + drop * drop).sqrt();
    let mut tangent_angle = if slope_term > 0.0 {
        ((span / growth) * (1.0 / slope_term)).atan()
    } else {
        FRAC_PI_2
    };
    if x < 0.0 {
        tangent_angle = PI - tangent_angle;
    }

    let cross_section_size =
        ((constants.base_area() - constants.top_area()) / height) * drop + constants.top_area();
    let (leg_half_height, half_width) = section_dimensions(cross_section_size);

    let exterior_offset = leg_half_height / 3.0;
    let interior_offset = leg_half_height * 2.0 / 3.0;
    let radial = Vector3::new(tangent_angle.cos(), 0.0, tangent_angle.sin());
    let centroid = Point3::new(x, 0.0, elevation);
    let exterior = centroid + radial * exterior_offset;
    let interior = centroid - radial * interior_offset;

    StationSample {
        x,
        drop,
        elevation,
        tangent_angle,
        cross_section_size,
        leg_half_height,
        half_width,
        triangle: Triangle3D {
            exterior_negative: Point3::new(exterior.x, -half_width, exterior.z),
            exterior_positive: Point3::new(exterior.x, half_width, exterior.z),
            interior,
        },
    }
}

/// The apex cap: `x = 0`, top area, section in the vertical `x = 0` plane.
#[must_use]
pub fn solve_apex(constants: &ArchPhysicalConstants) -> StationSample {
    solve_station(0.0, constants)
}

/// Solves every station of a table in parallel, preserving table order.
#[must_use]
pub fn solve_stations(stations: &[f64], constants: &ArchPhysicalConstants) -> Vec<StationSample> {
    stations
        .par_iter()
        .map(|&x| solve_station(x, constants))
        .collect()
}

/// Triangle height and half-width for a section of the given area.
///
/// With half-width `H·tan 30°` the area is `H²·tan 30°`, so `H = sqrt(A·cot 30°)`.
fn section_dimensions(area: f64) -> (f64, f64) {
    let tan_30 = 30f64.to_radians().tan();
    let leg_half_height = (area / tan_30).sqrt();
    (leg_half_height, leg_half_height * tan_30)
}
