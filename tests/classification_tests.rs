//! Integration tests for the failure-classification pipeline stage.
//!
//! Drives the public API end-to-end: rule outcomes per failure category,
//! safe-type-name resolution, the missing-body heuristic, idempotence,
//! registry loading from TOML, and cross-thread sharing of one classifier.

use std::fmt;
use std::sync::Arc;
use std::thread;

use parapet::classify::{
    ClassificationOutcome, FailureListener, HandlerUtils, RequestFailureClassifier,
    BAD_PROPERTY_NAME_KEY, BAD_PROPERTY_VALUE_KEY, COMPLEX_TYPE_NAME, FAILURE_MESSAGE_KEY,
    REQUIRED_TYPE_KEY,
};
use parapet::failure::{Failure, TypeDescriptor};
use parapet::registry::{ProjectErrors, StaticProjectErrors};

#[derive(Debug)]
struct ParseCause(String);

impl ParseCause {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ParseCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParseCause {}

fn default_classifier() -> RequestFailureClassifier {
    RequestFailureClassifier::new(Arc::new(StaticProjectErrors::default()), HandlerUtils)
}

// ============================================================================
// Unrecognized Failures
// ============================================================================

#[test]
fn test_unrecognized_failure_is_not_handled_with_no_log_details() {
    let classifier = default_classifier();
    let outcome = classifier.classify(&Failure::other("thread pool exhausted"));

    assert_eq!(outcome, ClassificationOutcome::NotHandled);
    assert!(outcome.errors().is_none());
    assert!(outcome.log_details().is_none());
}

// ============================================================================
// Type-Conversion Failures
// ============================================================================

#[test]
fn test_type_conversion_full_example() {
    // A request field "age" with value "twelve" failed to parse as i32.
    let classifier = default_classifier();
    let failure = Failure::type_conversion(
        "Failed to convert value of type 'String' to required type 'i32'",
    )
    .with_property_name("age")
    .with_raw_value("twelve")
    .with_required_type(TypeDescriptor::of::<i32>());

    let outcome = classifier.classify(&failure);
    let errors = outcome.errors().expect("should be handled");
    assert_eq!(errors.len(), 1);

    let entry = &errors.entries()[0];
    assert_eq!(entry.code(), "TYPE_CONVERSION_ERROR");
    assert_eq!(
        entry.metadata()[BAD_PROPERTY_NAME_KEY],
        serde_json::json!("age")
    );
    assert_eq!(
        entry.metadata()[BAD_PROPERTY_VALUE_KEY],
        serde_json::json!("twelve")
    );
    assert_eq!(entry.metadata()[REQUIRED_TYPE_KEY], serde_json::json!("int"));

    let details = outcome.log_details().expect("should carry log details");
    assert_eq!(details.len(), 4);
    assert_eq!(
        details.get(FAILURE_MESSAGE_KEY),
        Some("Failed to convert value of type 'String' to required type 'i32'")
    );
    assert_eq!(details.get(BAD_PROPERTY_NAME_KEY), Some("age"));
    assert_eq!(details.get(BAD_PROPERTY_VALUE_KEY), Some("twelve"));
    assert_eq!(details.get(REQUIRED_TYPE_KEY), Some("i32"));
}

#[test]
fn test_type_conversion_complex_type_collapses_in_metadata_only() {
    struct AccountSettings;

    let classifier = default_classifier();
    let failure = Failure::type_conversion("cannot bind nested object")
        .with_property_name("settings")
        .with_raw_value("{}")
        .with_required_type(TypeDescriptor::of::<AccountSettings>());

    let outcome = classifier.classify(&failure);
    let entry = &outcome.errors().unwrap().entries()[0];
    assert_eq!(
        entry.metadata()[REQUIRED_TYPE_KEY],
        serde_json::json!(COMPLEX_TYPE_NAME)
    );

    // The internal type name still reaches the server log.
    let logged = outcome.log_details().unwrap().get(REQUIRED_TYPE_KEY).unwrap();
    assert!(logged.contains("AccountSettings"));
    assert_ne!(logged, COMPLEX_TYPE_NAME);
}

#[test]
fn test_type_conversion_without_type_info_omits_metadata_key_but_logs_null() {
    let classifier = default_classifier();
    let failure = Failure::type_conversion("conversion failed")
        .with_property_name("age")
        .with_raw_value("twelve");

    let outcome = classifier.classify(&failure);
    let entry = &outcome.errors().unwrap().entries()[0];
    assert!(!entry.metadata().contains_key(REQUIRED_TYPE_KEY));

    let details = outcome.log_details().unwrap();
    assert_eq!(details.get(REQUIRED_TYPE_KEY), Some("null"));
}

#[test]
fn test_type_conversion_unnamed_property_omitted_from_metadata() {
    // Only some framework failures carry the offending property's name.
    let classifier = default_classifier();
    let failure = Failure::type_conversion("conversion failed")
        .with_raw_value("twelve")
        .with_required_type(TypeDescriptor::of::<i64>());

    let outcome = classifier.classify(&failure);
    let entry = &outcome.errors().unwrap().entries()[0];
    assert!(!entry.metadata().contains_key(BAD_PROPERTY_NAME_KEY));
    assert_eq!(entry.metadata()[REQUIRED_TYPE_KEY], serde_json::json!("long"));

    let details = outcome.log_details().unwrap();
    assert_eq!(details.get(BAD_PROPERTY_NAME_KEY), Some("null"));
}

// ============================================================================
// Request-Binding Failures
// ============================================================================

#[test]
fn test_request_binding_maps_to_malformed_request() {
    let classifier = default_classifier();
    let failure = Failure::request_binding("Missing required parameter 'accountId'");

    let outcome = classifier.classify(&failure);
    let errors = outcome.errors().unwrap();
    assert_eq!(errors.codes(), vec!["MALFORMED_REQUEST"]);
    assert!(errors.entries()[0].metadata().is_empty());
    assert_eq!(
        outcome.log_details().unwrap().get(FAILURE_MESSAGE_KEY),
        Some("Missing required parameter 'accountId'")
    );
}

// ============================================================================
// Message-Conversion Failures and the Missing-Body Heuristic
// ============================================================================

#[test]
fn test_missing_body_prefix_classifies_as_missing_expected_content() {
    let classifier = default_classifier();
    let failure = Failure::message_conversion(
        "Required request body is missing: public Response create(Payload)",
    );

    let outcome = classifier.classify(&failure);
    assert_eq!(
        outcome.errors().unwrap().codes(),
        vec!["MISSING_EXPECTED_CONTENT"]
    );
}

#[test]
fn test_end_of_input_cause_classifies_as_missing_expected_content() {
    let classifier = default_classifier();
    let failure = Failure::message_conversion("Could not read document").with_cause(
        ParseCause::new("No content to map due to end-of-input\n at [Source: (empty); line: 1]"),
    );

    let outcome = classifier.classify(&failure);
    assert_eq!(
        outcome.errors().unwrap().codes(),
        vec!["MISSING_EXPECTED_CONTENT"]
    );
    assert_eq!(
        outcome.log_details().unwrap().get(FAILURE_MESSAGE_KEY),
        Some("Could not read document")
    );
}

#[test]
fn test_malformed_body_classifies_as_malformed_request() {
    let classifier = default_classifier();
    let failure = Failure::message_conversion("Could not read document")
        .with_cause(ParseCause::new("Unexpected character '}' at line 3"));

    let outcome = classifier.classify(&failure);
    assert_eq!(outcome.errors().unwrap().codes(), vec!["MALFORMED_REQUEST"]);
}

#[test]
fn test_malformed_body_without_cause_classifies_as_malformed_request() {
    let classifier = default_classifier();
    let failure = Failure::message_conversion("JSON parse error: unexpected token");

    let outcome = classifier.classify(&failure);
    assert_eq!(outcome.errors().unwrap().codes(), vec!["MALFORMED_REQUEST"]);
}

// ============================================================================
// Content-Negotiation and Method Failures
// ============================================================================

#[test]
fn test_not_acceptable_maps_with_no_extras() {
    let classifier = default_classifier();
    let outcome = classifier.classify(&Failure::not_acceptable(
        "Could not find acceptable representation",
    ));

    let errors = outcome.errors().unwrap();
    assert_eq!(errors.codes(), vec!["NO_ACCEPTABLE_REPRESENTATION"]);
    assert!(errors.entries()[0].metadata().is_empty());
    assert!(outcome.log_details().unwrap().is_empty());
}

#[test]
fn test_unsupported_media_type_maps_with_no_extras() {
    let classifier = default_classifier();
    let outcome = classifier.classify(&Failure::unsupported_media_type(
        "Content type 'text/csv' not supported",
    ));

    assert_eq!(
        outcome.errors().unwrap().codes(),
        vec!["UNSUPPORTED_MEDIA_TYPE"]
    );
    assert!(outcome.log_details().unwrap().is_empty());
}

#[test]
fn test_method_not_allowed_example() {
    let classifier = default_classifier();
    let outcome = classifier.classify(&Failure::method_not_allowed(
        "Request method 'TRACE' not supported",
    ));

    let errors = outcome.errors().unwrap();
    assert_eq!(errors.codes(), vec!["METHOD_NOT_ALLOWED"]);
    assert!(errors.entries()[0].metadata().is_empty());
    assert!(outcome.log_details().unwrap().is_empty());
}

// ============================================================================
// Determinism and Idempotence
// ============================================================================

#[test]
fn test_classifying_twice_yields_equal_outcomes() {
    let classifier = default_classifier();
    let build = || {
        Failure::type_conversion("Failed to convert")
            .with_property_name("age")
            .with_raw_value("twelve")
            .with_required_type(TypeDescriptor::of::<i32>())
    };

    let first = classifier.classify(&build());
    let second = classifier.classify(&build());
    assert_eq!(first, second);

    // Order within log details is part of the contract.
    assert_eq!(
        first.log_details().unwrap().entries(),
        second.log_details().unwrap().entries()
    );
}

#[test]
fn test_rendered_client_body_is_reproducible() {
    let classifier = default_classifier();
    let failure = || {
        Failure::type_conversion("bad field")
            .with_property_name("count")
            .with_raw_value("many")
            .with_required_type(TypeDescriptor::of::<u32>())
    };

    let first = serde_json::to_string(classifier.classify(&failure()).errors().unwrap()).unwrap();
    let second = serde_json::to_string(classifier.classify(&failure()).errors().unwrap()).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Custom Registries
// ============================================================================

#[test]
fn test_toml_registry_drives_classification() {
    let registry = StaticProjectErrors::from_toml_str(
        r#"
        [type_conversion]
        code = "ACME-4001"
        status = 400
        message = "Bad field value"

        [malformed_request]
        code = "ACME-4000"
        status = 400
        message = "Bad request"

        [missing_expected_content]
        code = "ACME-4002"
        status = 400
        message = "Body required"

        [no_acceptable_representation]
        code = "ACME-4060"
        status = 406
        message = "Cannot satisfy Accept header"

        [unsupported_media_type]
        code = "ACME-4150"
        status = 415
        message = "Unsupported content type"

        [method_not_allowed]
        code = "ACME-4050"
        status = 405
        message = "Method not allowed"
        "#,
    )
    .expect("registry should load");

    let classifier = RequestFailureClassifier::new(Arc::new(registry), HandlerUtils);

    let outcome = classifier.classify(&Failure::unsupported_media_type("text/csv"));
    let entry = &outcome.errors().unwrap().entries()[0];
    assert_eq!(entry.code(), "ACME-4150");
    assert_eq!(entry.status().as_u16(), 415);
}

#[test]
fn test_registry_lookups_cover_all_six_categories() {
    let registry = StaticProjectErrors::default();
    let codes = [
        registry.type_conversion_error().code(),
        registry.malformed_request_error().code(),
        registry.missing_expected_content_error().code(),
        registry.no_acceptable_representation_error().code(),
        registry.unsupported_media_type_error().code(),
        registry.method_not_allowed_error().code(),
    ];
    let unique: std::collections::HashSet<&str> = codes.into_iter().collect();
    assert_eq!(unique.len(), 6);
}

// ============================================================================
// Concurrent Use
// ============================================================================

#[test]
fn test_one_classifier_instance_shared_across_threads() {
    let classifier = Arc::new(default_classifier());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let classifier = Arc::clone(&classifier);
            thread::spawn(move || {
                let failure = Failure::type_conversion(format!("bad value in request {i}"))
                    .with_property_name("age")
                    .with_raw_value(i.to_string())
                    .with_required_type(TypeDescriptor::of::<i32>());
                classifier.classify(&failure)
            })
        })
        .collect();

    for handle in handles {
        let outcome = handle.join().expect("classification thread panicked");
        assert_eq!(
            outcome.errors().unwrap().codes(),
            vec!["TYPE_CONVERSION_ERROR"]
        );
    }
}
