use super::shell::ShellId;

slotmap::new_key_type! {
    pub struct SolidId;
}

/// A closed volume: one boundary shell plus any void shells.
///
/// Lofted and extruded section solids only ever have an outer shell.
#[derive(Debug, Clone)]
pub struct SolidData {
    pub outer_shell: ShellId,
    pub inner_shells: Vec<ShellId>,
}
