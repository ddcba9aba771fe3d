use crate::error::Result;
use crate::topology::{EdgeId, TopologyStore};

/// Computes the length of a straight edge.
pub struct Length {
    edge: EdgeId,
}

impl Length {
    /// Creates a new `Length` query.
    #[must_use]
    pub fn new(edge: EdgeId) -> Self {
        Self { edge }
    }

    /// Executes the query, returning the edge length.
    ///
    /// Lines are parameterized by arc length, so this is `|t_end - t_start|`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found.
    pub fn execute(&self, store: &TopologyStore) -> Result<f64> {
        let edge = store.edge(self.edge)?;
        Ok((edge.t_end - edge.t_start).abs())
    }
}
