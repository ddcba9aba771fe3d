use super::edge::EdgeId;

slotmap::new_key_type! {
    pub struct WireId;
}

/// Edge reference inside a wire; `forward == false` walks it end to start.
#[derive(Debug, Clone, Copy)]
pub struct OrientedEdge {
    pub edge: EdgeId,
    pub forward: bool,
}

impl OrientedEdge {
    #[must_use]
    pub fn new(edge: EdgeId, forward: bool) -> Self {
        Self { edge, forward }
    }
}

/// A chain of edges. Profile loops and face boundaries are always closed;
/// open wires only appear as construction paths.
#[derive(Debug, Clone)]
pub struct WireData {
    pub edges: Vec<OrientedEdge>,
    pub is_closed: bool,
}
