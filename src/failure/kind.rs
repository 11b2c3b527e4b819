//! The closed taxonomy of request failures this crate classifies.
//!
//! Serving frameworks produce an open-ended zoo of exception types when a
//! request cannot be handled. `Failure` collapses that zoo into a closed sum
//! type at the point where the framework error is caught, so the classifier
//! can match exhaustively and new categories cannot fall through silently.

use std::error::Error;
use std::fmt;

use super::descriptor::TypeDescriptor;

/// The category of a [`Failure`], with category-specific payload where one
/// exists.
#[derive(Debug)]
pub enum FailureKind {
    /// A request value could not be converted to the expected parameter or
    /// property type.
    TypeConversion(TypeConversionDetails),
    /// The request could not be bound to its expected parameters (missing
    /// required parameter, cookie, header, and similar).
    RequestBinding,
    /// The request body could not be read or parsed.
    MessageConversion,
    /// None of the response representations the client will accept can be
    /// produced.
    NotAcceptable,
    /// The request body's content type is not supported.
    UnsupportedMediaType,
    /// The HTTP method is not supported for the resource.
    MethodNotAllowed,
    /// A failure outside the recognized taxonomy. Always classified as
    /// not-handled so the next pipeline stage can take over.
    Other,
}

impl FailureKind {
    /// Short machine-readable category label, used in log output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypeConversion(_) => "type_conversion",
            Self::RequestBinding => "request_binding",
            Self::MessageConversion => "message_conversion",
            Self::NotAcceptable => "not_acceptable",
            Self::UnsupportedMediaType => "unsupported_media_type",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Other => "other",
        }
    }
}

/// Payload carried by [`FailureKind::TypeConversion`].
///
/// All fields are optional: only some framework failures name the offending
/// property, the raw value is absent when the original value was itself
/// absent, and expected-type information is not always available.
#[derive(Debug, Default)]
pub struct TypeConversionDetails {
    /// Name of the property whose value failed to convert, when the
    /// originating failure carried one.
    pub property_name: Option<String>,
    /// String rendering of the offending raw value.
    pub raw_value: Option<String>,
    /// Descriptor of the type the value was expected to convert into.
    pub required_type: Option<TypeDescriptor>,
}

/// A request failure handed to the classification pipeline.
///
/// Carries a human-readable message, an optional one-level nested cause, and
/// a [`FailureKind`] fixed at construction. Construct via the per-category
/// constructors:
///
/// ```
/// use parapet::failure::{Failure, FailureKind, TypeDescriptor};
///
/// let failure = Failure::type_conversion("Failed to convert value")
///     .with_property_name("age")
///     .with_raw_value("twelve")
///     .with_required_type(TypeDescriptor::of::<i32>());
///
/// assert!(matches!(failure.kind(), FailureKind::TypeConversion(_)));
/// ```
#[derive(Debug)]
pub struct Failure {
    kind: FailureKind,
    message: String,
    cause: Option<Box<dyn Error + Send + Sync>>,
}

impl Failure {
    fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// A value could not be converted to its expected type.
    pub fn type_conversion(message: impl Into<String>) -> Self {
        Self::new(
            FailureKind::TypeConversion(TypeConversionDetails::default()),
            message,
        )
    }

    /// The request could not be bound to expected parameters.
    pub fn request_binding(message: impl Into<String>) -> Self {
        Self::new(FailureKind::RequestBinding, message)
    }

    /// The request body could not be read or parsed.
    pub fn message_conversion(message: impl Into<String>) -> Self {
        Self::new(FailureKind::MessageConversion, message)
    }

    /// No acceptable response representation can be produced.
    pub fn not_acceptable(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NotAcceptable, message)
    }

    /// The request body's content type is not supported.
    pub fn unsupported_media_type(message: impl Into<String>) -> Self {
        Self::new(FailureKind::UnsupportedMediaType, message)
    }

    /// The HTTP method is not supported for the resource.
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::MethodNotAllowed, message)
    }

    /// A failure outside the recognized taxonomy.
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Other, message)
    }

    /// Attach the underlying cause. Only one level of nesting is inspected
    /// during classification.
    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Record the name of the property that failed conversion.
    ///
    /// Has no effect on failure kinds other than type-conversion.
    pub fn with_property_name(mut self, name: impl Into<String>) -> Self {
        if let FailureKind::TypeConversion(details) = &mut self.kind {
            details.property_name = Some(name.into());
        }
        self
    }

    /// Record the string rendering of the offending raw value.
    ///
    /// Has no effect on failure kinds other than type-conversion.
    pub fn with_raw_value(mut self, value: impl Into<String>) -> Self {
        if let FailureKind::TypeConversion(details) = &mut self.kind {
            details.raw_value = Some(value.into());
        }
        self
    }

    /// Record the type the value was expected to convert into.
    ///
    /// Has no effect on failure kinds other than type-conversion.
    pub fn with_required_type(mut self, descriptor: TypeDescriptor) -> Self {
        if let FailureKind::TypeConversion(details) = &mut self.kind {
            details.required_type = Some(descriptor);
        }
        self
    }

    /// The failure category.
    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    /// The failure's human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The nested cause, if one was attached.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync)> {
        self.cause.as_deref()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|c| c.as_ref() as &(dyn Error + 'static))
    }
}
