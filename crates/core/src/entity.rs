//! Records that keep their identity while their attributes change.

/// A stored record addressed by a typed identifier.
///
/// Cookbooks are entities: renaming one changes its slug but never its id.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
