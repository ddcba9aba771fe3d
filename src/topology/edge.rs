use crate::geometry::Line;

use super::vertex::VertexId;

slotmap::new_key_type! {
    pub struct EdgeId;
}

/// A straight edge between two vertices.
///
/// The carrying line is parameterized by arc length, so `|t_end - t_start|`
/// is the edge length.
#[derive(Debug, Clone)]
pub struct EdgeData {
    pub start: VertexId,
    pub end: VertexId,
    pub curve: Line,
    pub t_start: f64,
    pub t_end: f64,
}
