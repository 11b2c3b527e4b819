//! Failure classification.
//!
//! This module provides the classification stage itself: the
//! [`FailureListener`] seam the enclosing error pipeline calls, the
//! [`ClassificationOutcome`] it produces, the server-only [`LogDetails`]
//! accumulator, and [`RequestFailureClassifier`], which maps the recognized
//! framework-failure categories onto canonical registry errors.

pub mod framework;
pub mod outcome;

// Re-export main types for convenient access
pub use framework::{
    RequestFailureClassifier, BAD_PROPERTY_NAME_KEY, BAD_PROPERTY_VALUE_KEY, COMPLEX_TYPE_NAME,
    REQUIRED_TYPE_KEY,
};
pub use outcome::{
    ClassificationOutcome, FailureListener, HandlerUtils, LogDetails, FAILURE_MESSAGE_KEY,
};
