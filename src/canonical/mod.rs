//! Client-facing canonical error model.
//!
//! A canonical error is a stable, registry-defined identity (code, HTTP
//! status, default message) independent of whatever exception the serving
//! framework actually threw. Classification decisions produce a
//! deduplicated, deterministically ordered [`ErrorSet`] of canonical errors,
//! optionally decorated with client-safe metadata.

pub mod error;
pub mod set;

// Re-export main types for convenient access
pub use error::{CanonicalError, ErrorWithContext};
pub use set::ErrorSet;
