//! Parapet - request-failure classification for API error pipelines
//!
//! When a web request fails, the serving framework produces some internal
//! exception value. Echoing that value to API consumers couples the client
//! contract to framework internals and can leak internal type names. Parapet
//! translates those failures into a stable set of canonical error codes with
//! client-safe metadata, keeping everything else in server-only log details.
//!
//! ```
//! use std::sync::Arc;
//!
//! use parapet::classify::{FailureListener, HandlerUtils, RequestFailureClassifier};
//! use parapet::failure::{Failure, TypeDescriptor};
//! use parapet::registry::StaticProjectErrors;
//!
//! let classifier = RequestFailureClassifier::new(
//!     Arc::new(StaticProjectErrors::default()),
//!     HandlerUtils,
//! );
//!
//! let failure = Failure::type_conversion("Failed to convert value of field 'age'")
//!     .with_property_name("age")
//!     .with_raw_value("twelve")
//!     .with_required_type(TypeDescriptor::of::<i32>());
//!
//! let outcome = classifier.classify(&failure);
//! let errors = outcome.errors().unwrap();
//! assert_eq!(errors.codes(), vec!["TYPE_CONVERSION_ERROR"]);
//! ```

pub mod canonical;
pub mod classify;
pub mod failure;
pub mod registry;
