use crate::error::{GeometryError, OperationError, Result};
use crate::math::polygon_2d::{
    left_normal, line_line_intersect_2d, segment_direction, side_of_line, signed_area_2d,
};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Maximum miter distance as a multiple of `|distance|`. When the miter
/// extends further than this, a bevel (two points) is used instead.
const MITER_LIMIT: f64 = 4.0;

/// Which side of a closed polygon an offset moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetSide {
    /// Toward the interior (the reference point is inside the polygon).
    Inward,
    /// Away from the interior.
    Outward,
}

/// Offsets a closed 2D polygon toward a reference point.
///
/// Every edge is pushed `distance` toward the side of the polygon that holds
/// `toward`, and consecutive offset lines are intersected to form the corners.
/// A reference point inside the polygon therefore shrinks it, a point outside
/// grows it.
///
/// # Algorithm
///
/// 1. **Phase A**: Offset each edge perpendicular to its direction
/// 2. **Phase B**: Intersect consecutive offset lines (miter), beveling
///    corners whose miter would exceed [`MITER_LIMIT`]
/// 3. **Phase C**: Reject results whose winding flipped, whose area did not
///    shrink on an inward offset, or where an offset edge runs against its
///    source edge (the offset passed through the polygon)
#[derive(Debug)]
pub struct PolygonOffset2D {
    points: Vec<Point2>,
    toward: Point2,
    distance: f64,
}

impl PolygonOffset2D {
    /// Creates a new polygon offset operation.
    #[must_use]
    pub fn new(points: Vec<Point2>, toward: Point2, distance: f64) -> Self {
        Self {
            points,
            toward,
            distance,
        }
    }

    /// The side the offset moves to, given the reference point.
    #[must_use]
    pub fn side(&self) -> OffsetSide {
        if winding_number(&self.toward, &self.points) == 0 {
            OffsetSide::Outward
        } else {
            OffsetSide::Inward
        }
    }

    /// Executes the offset, returning one vertex per corner (more where beveled).
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if fewer than 3 points are given, the
    ///   distance is negative or not finite, or an edge has zero length
    /// - `GeometryError::Degenerate` if the polygon has no area or the offset collapses
    pub fn execute(&self) -> Result<Vec<Point2>> {
        let n = self.points.len();
        if n < 3 {
            return Err(OperationError::InvalidInput(
                "at least 3 points are required for a polygon offset".to_owned(),
            )
            .into());
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "offset distance must be finite and non-negative, got {}",
                self.distance
            ))
            .into());
        }

        let input_area = signed_area_2d(&self.points);
        if input_area.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("polygon has no area".to_owned()).into());
        }
        if self.distance < TOLERANCE {
            return Ok(self.points.clone());
        }

        // Interior is on the left of a counter-clockwise polygon.
        let side = self.side();
        let winding = input_area.signum();
        let sign = match side {
            OffsetSide::Inward => winding,
            OffsetSide::Outward => -winding,
        };
        let signed_distance = self.distance * sign;

        // Phase A: offset each edge.
        let mut offset_segments: Vec<(Point2, Point2)> = Vec::with_capacity(n);
        let mut directions: Vec<Vector2> = Vec::with_capacity(n);
        for i in 0..n {
            let j = (i + 1) % n;
            let dir = segment_direction(&self.points[i], &self.points[j])?;
            let offset = left_normal(dir) * signed_distance;
            offset_segments.push((self.points[i] + offset, self.points[j] + offset));
            directions.push(dir);
        }

        // Phase B: corner i joins edge i-1 and edge i.
        let mut raw = Vec::with_capacity(n * 2);
        for i in 0..n {
            let prev = if i == 0 { n - 1 } else { i - 1 };
            push_corner(
                &mut raw,
                &offset_segments[prev],
                &offset_segments[i],
                &directions[prev],
                &directions[i],
                &self.points[i],
                signed_distance,
            );
        }

        // Phase C: collapse detection.
        let result_area = signed_area_2d(&raw);
        if result_area.signum() != winding || result_area.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "offset of {} collapsed the polygon (winding flipped)",
                self.distance
            ))
            .into());
        }
        if side == OffsetSide::Inward && result_area.abs() >= input_area.abs() {
            return Err(GeometryError::Degenerate(format!(
                "inward offset of {} did not shrink the polygon",
                self.distance
            ))
            .into());
        }
        // Without bevels, corners i and i+1 bound offset edge i. Insetting a
        // convex polygon past its inradius keeps the winding but turns every
        // edge around.
        if raw.len() == n {
            let reversed = (0..n).find(|&i| {
                let j = (i + 1) % n;
                (raw[j] - raw[i]).dot(&directions[i]) <= 0.0
            });
            if let Some(edge) = reversed {
                return Err(GeometryError::Degenerate(format!(
                    "offset of {} reversed edge {edge}",
                    self.distance
                ))
                .into());
            }
        }

        Ok(raw)
    }
}

/// Appends the offset corner between two consecutive offset segments.
fn push_corner(
    raw: &mut Vec<Point2>,
    seg_prev: &(Point2, Point2),
    seg_next: &(Point2, Point2),
    dir_prev: &Vector2,
    dir_next: &Vector2,
    input_corner: &Point2,
    distance: f64,
) {
    let Some(corner) = line_line_intersect_2d(&seg_prev.1, dir_prev, &seg_next.0, dir_next) else {
        // Collinear edges: the offset lines coincide.
        raw.push(seg_next.0);
        return;
    };

    let limit = MITER_LIMIT * distance.abs();
    if (corner - input_corner).norm_squared() > limit * limit {
        raw.push(seg_prev.1);
        raw.push(seg_next.0);
    } else {
        raw.push(corner);
    }
}

/// Winding number of `p` with respect to polygon `verts`.
///
/// Non-zero => inside, zero => outside.
fn winding_number(p: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = &verts[i];
        let b = &verts[(i + 1) % n];
        if a.y <= p.y {
            if b.y > p.y && side_of_line(a, b, p) > 0.0 {
                winding += 1;
            }
        } else if b.y <= p.y && side_of_line(a, b, p) < 0.0 {
            winding -= 1;
        }
    }
    winding
}
