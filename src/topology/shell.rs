use super::face::FaceId;

slotmap::new_key_type! {
    pub struct ShellId;
}

/// Faces bounding one side of a solid, caps first for lofts and extrusions.
#[derive(Debug, Clone)]
pub struct ShellData {
    pub faces: Vec<FaceId>,
    /// `true` when every edge is shared by exactly two faces.
    pub is_closed: bool,
}
