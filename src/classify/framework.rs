//! The framework-failure classifier.
//!
//! Maps each recognized [`FailureKind`] onto a canonical error from the
//! project registry, extracting only client-safe metadata. The raw failure
//! message and raw expected-type name go into [`LogDetails`]; the client
//! never sees either verbatim.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::canonical::{CanonicalError, ErrorSet, ErrorWithContext};
use crate::classify::outcome::{
    ClassificationOutcome, FailureListener, HandlerUtils, LogDetails,
};
use crate::failure::{Failure, FailureKind, TypeConversionDetails, TypeDescriptor};
use crate::registry::ProjectErrors;

/// Metadata and log-detail key for the property that failed conversion.
pub const BAD_PROPERTY_NAME_KEY: &str = "bad_property_name";

/// Metadata and log-detail key for the offending raw value.
pub const BAD_PROPERTY_VALUE_KEY: &str = "bad_property_value";

/// Metadata and log-detail key for the expected type.
pub const REQUIRED_TYPE_KEY: &str = "required_type";

/// Client-safe placeholder for any required type outside the primitive
/// whitelist.
pub const COMPLEX_TYPE_NAME: &str = "[complex type]";

/// Log-detail value recorded when a type-conversion field was absent.
const ABSENT_VALUE: &str = "null";

/// Marker prefix some body-reading layers put on their own message when the
/// request body was absent entirely.
const MISSING_BODY_PREFIX: &str = "Required request body is missing";

/// Marker substring older body parsers put on the nested cause's message for
/// the same condition.
const END_OF_INPUT_MARKER: &str = "No content to map due to end-of-input";

/// Classifier for the framework-level request failures that no more specific
/// pipeline stage claims.
///
/// Holds only immutable configuration; one instance classifies failures from
/// any number of request threads concurrently.
///
/// ```
/// use std::sync::Arc;
/// use parapet::classify::{FailureListener, HandlerUtils, RequestFailureClassifier};
/// use parapet::failure::Failure;
/// use parapet::registry::StaticProjectErrors;
///
/// let classifier = RequestFailureClassifier::new(
///     Arc::new(StaticProjectErrors::default()),
///     HandlerUtils,
/// );
/// let outcome = classifier.classify(&Failure::method_not_allowed("TRACE not supported"));
/// assert!(outcome.is_handled());
/// ```
pub struct RequestFailureClassifier {
    registry: Arc<dyn ProjectErrors>,
    utils: HandlerUtils,
}

impl RequestFailureClassifier {
    /// Create a classifier over the given registry and logging utilities.
    pub fn new(registry: Arc<dyn ProjectErrors>, utils: HandlerUtils) -> Self {
        Self { registry, utils }
    }

    fn classify_type_conversion(
        &self,
        failure: &Failure,
        details: &TypeConversionDetails,
    ) -> ClassificationOutcome {
        let log_details = self
            .utils
            .append_base_failure_message(failure, LogDetails::new())
            .push(
                BAD_PROPERTY_NAME_KEY,
                details.property_name.as_deref().unwrap_or(ABSENT_VALUE),
            )
            .push(
                BAD_PROPERTY_VALUE_KEY,
                details.raw_value.as_deref().unwrap_or(ABSENT_VALUE),
            )
            // Log details get the raw internal type name; client metadata
            // gets the whitelisted name only.
            .push(
                REQUIRED_TYPE_KEY,
                details
                    .required_type
                    .as_ref()
                    .map_or(ABSENT_VALUE, TypeDescriptor::name),
            );

        let mut entry = ErrorWithContext::from(self.registry.type_conversion_error().clone());
        if let Some(name) = &details.property_name {
            entry = entry.with_metadata(BAD_PROPERTY_NAME_KEY, name);
        }
        if let Some(value) = &details.raw_value {
            entry = entry.with_metadata(BAD_PROPERTY_VALUE_KEY, value);
        }
        if let Some(descriptor) = &details.required_type {
            entry = entry.with_metadata(REQUIRED_TYPE_KEY, safe_required_type_name(descriptor));
        }

        ClassificationOutcome::handled(ErrorSet::singleton(entry), log_details)
    }

    fn classify_message_conversion(&self, failure: &Failure) -> ClassificationOutcome {
        // Nested parser errors are not structured uniformly across parser
        // versions, so this rule only distinguishes absent-body from
        // malformed-body and stays coarse otherwise.
        let error = if is_missing_body_case(failure) {
            self.registry.missing_expected_content_error()
        } else {
            self.registry.malformed_request_error()
        };
        self.handled_with_message(failure, error)
    }

    /// Handled outcome carrying the failure message in log details.
    /// Malformed requests are hard to track down without it.
    fn handled_with_message(
        &self,
        failure: &Failure,
        error: &CanonicalError,
    ) -> ClassificationOutcome {
        let log_details = self
            .utils
            .append_base_failure_message(failure, LogDetails::new());
        ClassificationOutcome::handled(ErrorSet::singleton(error.clone()), log_details)
    }

    /// Handled outcome with no metadata and no log details.
    fn handled_plain(error: &CanonicalError) -> ClassificationOutcome {
        ClassificationOutcome::handled(ErrorSet::singleton(error.clone()), LogDetails::new())
    }
}

impl FailureListener for RequestFailureClassifier {
    fn classify(&self, failure: &Failure) -> ClassificationOutcome {
        let outcome = match failure.kind() {
            FailureKind::TypeConversion(details) => {
                self.classify_type_conversion(failure, details)
            }
            FailureKind::RequestBinding => {
                self.handled_with_message(failure, self.registry.malformed_request_error())
            }
            FailureKind::MessageConversion => self.classify_message_conversion(failure),
            FailureKind::NotAcceptable => {
                Self::handled_plain(self.registry.no_acceptable_representation_error())
            }
            FailureKind::UnsupportedMediaType => {
                Self::handled_plain(self.registry.unsupported_media_type_error())
            }
            FailureKind::MethodNotAllowed => {
                Self::handled_plain(self.registry.method_not_allowed_error())
            }
            FailureKind::Other => ClassificationOutcome::not_handled(),
        };

        match &outcome {
            ClassificationOutcome::Handled { errors, .. } => {
                debug!(
                    category = failure.kind().name(),
                    codes = ?errors.codes(),
                    "classified request failure"
                );
            }
            ClassificationOutcome::NotHandled => {
                trace!(
                    category = failure.kind().name(),
                    "failure not recognized, deferring to next stage"
                );
            }
        }

        outcome
    }
}

/// Returns true when a message-conversion failure means the request body was
/// absent rather than present-but-malformed.
///
/// Deliberately narrow and version-coupled: body-parsing layers phrase this
/// condition in exactly two known ways, matched here as the failure's own
/// message prefix or the nested cause's message substring. Every other
/// message shape classifies as the generic malformed-request category.
fn is_missing_body_case(failure: &Failure) -> bool {
    if failure.message().starts_with(MISSING_BODY_PREFIX) {
        return true;
    }
    if let Some(cause) = failure.cause() {
        if cause.to_string().contains(END_OF_INPUT_MARKER) {
            return true;
        }
    }
    false
}

/// Resolve a required-type descriptor to a client-safe name.
///
/// Only a closed vocabulary of primitive names ever reaches the client;
/// everything else collapses to [`COMPLEX_TYPE_NAME`] so internal data-model
/// type names cannot leak through error responses. Checks run in fixed
/// order, first match wins.
fn safe_required_type_name(descriptor: &TypeDescriptor) -> &'static str {
    if descriptor.is::<i8>() || descriptor.is::<u8>() {
        return "byte";
    }
    if descriptor.is::<i16>() || descriptor.is::<u16>() {
        return "short";
    }
    if descriptor.is::<i32>() || descriptor.is::<u32>() {
        return "int";
    }
    if descriptor.is::<i64>()
        || descriptor.is::<u64>()
        || descriptor.is::<isize>()
        || descriptor.is::<usize>()
    {
        return "long";
    }
    if descriptor.is::<f32>() {
        return "float";
    }
    if descriptor.is::<f64>() {
        return "double";
    }
    if descriptor.is::<bool>() {
        return "boolean";
    }
    if descriptor.is::<char>() {
        return "char";
    }
    if descriptor.is::<String>()
        || descriptor.is::<&'static str>()
        || descriptor.is::<str>()
        || descriptor.is::<Cow<'static, str>>()
    {
        return "string";
    }
    COMPLEX_TYPE_NAME
}
