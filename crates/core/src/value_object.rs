//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new value (e.g. a seat's `reserved()` copy) and swap it in.
///
/// The trait requires `Clone`, `PartialEq` and `Debug` so values can be copied
/// into new snapshots, compared in tests, and logged.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
