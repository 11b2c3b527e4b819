//! Request-failure taxonomy.
//!
//! This module defines the input side of classification: a closed sum type
//! over the recognized categories of request-handling failures, plus the
//! type descriptors used to report expected-type information without leaking
//! internal type names.

pub mod descriptor;
pub mod kind;

// Re-export main types for convenient access
pub use descriptor::TypeDescriptor;
pub use kind::{Failure, FailureKind, TypeConversionDetails};
