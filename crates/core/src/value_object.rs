//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity of their own: two values with the same
/// attributes are the same value. A part's storage location is the typical
/// example in this workspace.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
