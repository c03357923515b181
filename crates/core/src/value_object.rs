//! Value objects: compared by value, never by identity.

/// Marker trait for immutable values that are equal when their contents are equal.
///
/// A value object is rebuilt rather than mutated. `Slug` is the canonical
/// example: two slugs with the same text are the same slug, and a new name
/// produces a new slug instead of editing the old one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Position(i32);
///
/// impl ValueObject for Position {}
///
/// assert_eq!(Position(1), Position(1));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
