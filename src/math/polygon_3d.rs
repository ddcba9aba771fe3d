use super::{Point3, Vector3, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the unit normal of a planar polygon using Newell's method.
///
/// The normal follows the right-hand rule with respect to the vertex order.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the polygon has no area.
pub fn newell_normal(points: &[Point3]) -> Result<Vector3> {
    let n = points.len();
    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    for i in 0..n {
        let curr = &points[i];
        let next = &points[(i + 1) % n];
        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }
    let len = normal.norm();
    if len < TOLERANCE {
        return Err(
            GeometryError::Degenerate("polygon has no area, cannot compute normal".into()).into(),
        );
    }
    Ok(normal / len)
}

/// Compute the area of a 3D polygon (coplanar points).
///
/// Uses the cross-product summation method projected along the polygon normal.
#[must_use]
pub fn polygon_area_3d(points: &[Point3], normal: &Vector3) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let mut cross_sum = Vector3::new(0.0, 0.0, 0.0);
    let o = &points[0];
    for i in 1..n {
        let a = points[i] - o;
        let b = points[(i + 1) % n] - o;
        cross_sum += a.cross(&b);
    }
    0.5 * cross_sum.dot(normal).abs()
}

/// Area-weighted centroid of a planar polygon.
///
/// Falls back to the vertex average when the polygon has no area.
#[must_use]
pub fn polygon_centroid_3d(points: &[Point3]) -> Point3 {
    let n = points.len();
    if n == 0 {
        return Point3::origin();
    }
    let average = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / n as f64;
    if n < 3 {
        return Point3::from(average);
    }

    // Fan triangulation from the first vertex.
    let o = points[0];
    let mut weighted = Vector3::zeros();
    let mut total = 0.0;
    let reference = match newell_normal(points) {
        Ok(normal) => normal,
        Err(_) => return Point3::from(average),
    };
    for i in 1..n - 1 {
        let a = points[i];
        let b = points[i + 1];
        let area = 0.5 * (a - o).cross(&(b - o)).dot(&reference);
        weighted += (o.coords + a.coords + b.coords) / 3.0 * area;
        total += area;
    }
    if total.abs() < TOLERANCE {
        return Point3::from(average);
    }
    Point3::from(weighted / total)
}
