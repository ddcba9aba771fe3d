//! Picks the label face and path edge from kernel query results.
//!
//! Both selectors compare with strict greater-than, so the first candidate
//! wins a tie.

use crate::kernel::{EdgeCandidate, FaceCandidate};

/// The face with the largest area, or `None` for an empty slice.
#[must_use]
pub fn select_largest_face(candidates: &[FaceCandidate]) -> Option<&FaceCandidate> {
    first_max_by(candidates, |c| c.area)
}

/// The edge with the greatest length, or `None` for an empty slice.
#[must_use]
pub fn select_longest_edge(candidates: &[EdgeCandidate]) -> Option<&EdgeCandidate> {
    first_max_by(candidates, |c| c.length)
}

fn first_max_by<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<(&T, f64)> = None;
    for item in items {
        let value = key(item);
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((item, value)),
        }
    }
    best.map(|(item, _)| item)
}
