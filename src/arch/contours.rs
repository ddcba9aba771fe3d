use serde::{Deserialize, Serialize};
use tracing::warn;

use super::solver::Triangle3D;
use crate::error::{ConfigError, Result};
use crate::math::{Point2, Point3};
use crate::operations::offset::PolygonOffset2D;

/// Offset distances, in feet, from a section's outer triangle toward its centroid.
///
/// The notch is the shallowest offset, the lip contour sits just inside it, and
/// the hollow contour is the deepest. The lip profile is the band between the
/// lip and hollow contours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OffsetMargins {
    pub notch: f64,
    pub lip: f64,
    pub hollow: f64,
    /// Fraction of a section's inradius the deepest offset may reach.
    pub safety_factor: f64,
}

impl Default for OffsetMargins {
    fn default() -> Self {
        Self {
            notch: 1.4,
            lip: 1.5,
            hollow: 3.0,
            safety_factor: 0.9,
        }
    }
}

impl OffsetMargins {
    /// Checks `0 < notch < lip < hollow` and `0 < safety_factor < 1`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Margins` when the ordering or ranges are violated.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let finite = [self.notch, self.lip, self.hollow, self.safety_factor]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(ConfigError::Margins("margins must be finite".into()));
        }
        if !(self.notch > 0.0 && self.notch < self.lip && self.lip < self.hollow) {
            return Err(ConfigError::Margins(format!(
                "expected 0 < notch < lip < hollow, got notch={} lip={} hollow={}",
                self.notch, self.lip, self.hollow
            )));
        }
        if !(self.safety_factor > 0.0 && self.safety_factor < 1.0) {
            return Err(ConfigError::Margins(format!(
                "safety_factor must lie in (0, 1), got {}",
                self.safety_factor
            )));
        }
        Ok(())
    }

    /// Scale factor that keeps the hollow offset within `inradius * safety_factor`.
    ///
    /// Returns 1.0 when no clamping is needed.
    #[must_use]
    pub fn clamp_scale(&self, inradius: f64) -> f64 {
        let limit = inradius * self.safety_factor;
        if self.hollow > limit {
            limit / self.hollow
        } else {
            1.0
        }
    }
}

/// A two-loop profile: the region between `outer` and `inner`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnularContour {
    pub outer: Vec<Point3>,
    pub inner: Vec<Point3>,
}

/// Contours derived from one section triangle, all in the triangle's plane.
///
/// Each contour keeps the triangle's vertex order, so vertex `i` of a contour
/// corresponds to vertex `i` of the same contour at the neighbouring station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffsetContourSet {
    /// Offset origin: the triangle centroid.
    pub origin: Point3,
    /// The raw section triangle.
    pub outer: Vec<Point3>,
    /// Band between the lip and hollow contours.
    pub lip: AnnularContour,
    /// Registration groove boundary.
    pub notch: Vec<Point3>,
    /// Interior cavity boundary.
    pub hollow: Vec<Point3>,
    /// Factor applied to the margins; below 1.0 when they were clamped.
    pub applied_scale: f64,
}

/// Builds the notch, lip, and hollow contours of a section triangle.
///
/// Margins are scaled down together when the hollow offset would come closer
/// than `safety_factor` to the triangle's inradius.
///
/// # Errors
///
/// Returns `ConfigError::Margins` for invalid margins, or an error if the
/// triangle is degenerate or an offset collapses.
pub fn build_contours(triangle: &Triangle3D, margins: &OffsetMargins) -> Result<OffsetContourSet> {
    margins.validate()?;
    let plane = triangle.plane()?;
    let origin = triangle.centroid();
    let outer = triangle.vertices().to_vec();

    let scale = margins.clamp_scale(triangle.inradius());
    if scale < 1.0 {
        warn!(
            inradius = triangle.inradius(),
            hollow = margins.hollow,
            scale,
            "offset margins exceed the section's safe inset, clamping"
        );
    }

    let flat: Vec<Point2> = outer.iter().map(|p| plane.project(p)).collect();
    let toward = plane.project(&origin);
    let inset = |distance: f64| -> Result<Vec<Point3>> {
        let ring = PolygonOffset2D::new(flat.clone(), toward, distance * scale).execute()?;
        Ok(ring.iter().map(|uv| plane.evaluate(uv)).collect())
    };

    let notch = inset(margins.notch)?;
    let lip_outer = inset(margins.lip)?;
    let hollow = inset(margins.hollow)?;

    Ok(OffsetContourSet {
        origin,
        outer,
        lip: AnnularContour {
            outer: lip_outer,
            inner: hollow.clone(),
        },
        notch,
        hollow,
        applied_scale: scale,
    })
}
