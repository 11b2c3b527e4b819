//! Compile-time type descriptors for expected-type reporting.
//!
//! A `TypeDescriptor` records the identity of the type a request value was
//! supposed to convert into. The raw type name is suitable for server logs
//! only; the classifier maps descriptors onto a small client-safe vocabulary
//! before anything reaches an API consumer.

use std::any::{type_name, TypeId};
use std::fmt;

/// Identity of a required (expected) type, captured at failure-construction
/// time.
///
/// Wraps [`TypeId`] for exact identity checks plus the full
/// [`type_name`] string for diagnostics. The name is an internal detail and
/// must never be surfaced to clients verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    /// Capture the descriptor for type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parapet::failure::TypeDescriptor;
    ///
    /// let descriptor = TypeDescriptor::of::<i32>();
    /// assert!(descriptor.is::<i32>());
    /// assert!(!descriptor.is::<i64>());
    /// ```
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns true if this descriptor refers to exactly `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// The full internal type name (e.g. `alloc::string::String`).
    ///
    /// Server-log-only; client-facing output goes through the classifier's
    /// safe-name resolution instead.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
