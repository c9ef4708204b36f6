//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable domain objects compared entirely by their
/// attribute values. Two value objects with the same values are equal; there
/// is no identity and no lifecycle. To "modify" one, build a new one.
/// `Sku` in the catalog crate is the canonical example in this workspace.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
