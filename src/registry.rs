//! Project error registries.
//!
//! A registry supplies the canonical errors the classifier maps failures
//! onto. Which codes, statuses, and messages a deployment uses is a
//! configuration concern: the classifier only depends on the
//! [`ProjectErrors`] lookup trait, and [`StaticProjectErrors`] provides a
//! conventional default plus TOML loading with verification at startup.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canonical::CanonicalError;

/// Errors raised while loading or verifying a registry.
///
/// Registry configuration problems are fatal at startup; nothing here can
/// occur during request-time classification.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry document failed to parse.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A canonical error entry has an empty code.
    #[error("registry entry `{entry}` has an empty code")]
    EmptyCode {
        /// The registry field whose code was empty.
        entry: &'static str,
    },

    /// A canonical error entry carries a non-error HTTP status.
    #[error("registry entry `{entry}` has non-error status {status}")]
    NonErrorStatus {
        /// The registry field with the bad status.
        entry: &'static str,
        /// The offending status value.
        status: u16,
    },
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Lookup interface for the canonical errors classification needs.
///
/// One lookup per recognized failure category. Implementations must be
/// immutable after construction so a classifier holding a registry can be
/// shared across request-handling threads.
pub trait ProjectErrors: Send + Sync {
    /// Canonical error for values that failed type conversion.
    fn type_conversion_error(&self) -> &CanonicalError;

    /// Canonical error for generically malformed requests.
    fn malformed_request_error(&self) -> &CanonicalError;

    /// Canonical error for requests missing expected body content.
    fn missing_expected_content_error(&self) -> &CanonicalError;

    /// Canonical error for unsatisfiable `Accept` negotiation.
    fn no_acceptable_representation_error(&self) -> &CanonicalError;

    /// Canonical error for unsupported request media types.
    fn unsupported_media_type_error(&self) -> &CanonicalError;

    /// Canonical error for HTTP methods not supported by the resource.
    fn method_not_allowed_error(&self) -> &CanonicalError;
}

/// A [`ProjectErrors`] implementation backed by six fixed entries.
///
/// `Default` supplies conventional codes and statuses; deployments that need
/// their own contract load one from TOML:
///
/// ```
/// use parapet::registry::StaticProjectErrors;
///
/// let registry = StaticProjectErrors::from_toml_str(r#"
///     [type_conversion]
///     code = "TYPE_CONVERSION_ERROR"
///     status = 400
///     message = "Invalid value for request field"
///
///     [malformed_request]
///     code = "MALFORMED_REQUEST"
///     status = 400
///     message = "Malformed request"
///
///     [missing_expected_content]
///     code = "MISSING_EXPECTED_CONTENT"
///     status = 400
///     message = "Expected request content is missing"
///
///     [no_acceptable_representation]
///     code = "NO_ACCEPTABLE_REPRESENTATION"
///     status = 406
///     message = "No acceptable representation available"
///
///     [unsupported_media_type]
///     code = "UNSUPPORTED_MEDIA_TYPE"
///     status = 415
///     message = "Unsupported media type"
///
///     [method_not_allowed]
///     code = "METHOD_NOT_ALLOWED"
///     status = 405
///     message = "HTTP method not allowed"
/// "#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticProjectErrors {
    type_conversion: CanonicalError,
    malformed_request: CanonicalError,
    missing_expected_content: CanonicalError,
    no_acceptable_representation: CanonicalError,
    unsupported_media_type: CanonicalError,
    method_not_allowed: CanonicalError,
}

impl StaticProjectErrors {
    /// Build a registry from six explicit entries.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry has an empty code or a status outside
    /// the 4xx/5xx range.
    pub fn new(
        type_conversion: CanonicalError,
        malformed_request: CanonicalError,
        missing_expected_content: CanonicalError,
        no_acceptable_representation: CanonicalError,
        unsupported_media_type: CanonicalError,
        method_not_allowed: CanonicalError,
    ) -> RegistryResult<Self> {
        let registry = Self {
            type_conversion,
            malformed_request,
            missing_expected_content,
            no_acceptable_representation,
            unsupported_media_type,
            method_not_allowed,
        };
        registry.verify()?;
        Ok(registry)
    }

    /// Load and verify a registry from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or an entry fails
    /// verification.
    pub fn from_toml_str(document: &str) -> RegistryResult<Self> {
        let registry: Self = toml::from_str(document)?;
        registry.verify()?;
        Ok(registry)
    }

    fn verify(&self) -> RegistryResult<()> {
        for (entry, error) in self.entries() {
            if error.code().is_empty() {
                return Err(RegistryError::EmptyCode { entry });
            }
            let status = error.status();
            if !(status.is_client_error() || status.is_server_error()) {
                return Err(RegistryError::NonErrorStatus {
                    entry,
                    status: status.as_u16(),
                });
            }
        }
        Ok(())
    }

    fn entries(&self) -> [(&'static str, &CanonicalError); 6] {
        [
            ("type_conversion", &self.type_conversion),
            ("malformed_request", &self.malformed_request),
            ("missing_expected_content", &self.missing_expected_content),
            (
                "no_acceptable_representation",
                &self.no_acceptable_representation,
            ),
            ("unsupported_media_type", &self.unsupported_media_type),
            ("method_not_allowed", &self.method_not_allowed),
        ]
    }
}

impl Default for StaticProjectErrors {
    fn default() -> Self {
        Self {
            type_conversion: CanonicalError::new(
                "TYPE_CONVERSION_ERROR",
                StatusCode::BAD_REQUEST,
                "Invalid value for request field",
            ),
            malformed_request: CanonicalError::new(
                "MALFORMED_REQUEST",
                StatusCode::BAD_REQUEST,
                "Malformed request",
            ),
            missing_expected_content: CanonicalError::new(
                "MISSING_EXPECTED_CONTENT",
                StatusCode::BAD_REQUEST,
                "Expected request content is missing",
            ),
            no_acceptable_representation: CanonicalError::new(
                "NO_ACCEPTABLE_REPRESENTATION",
                StatusCode::NOT_ACCEPTABLE,
                "No acceptable representation available",
            ),
            unsupported_media_type: CanonicalError::new(
                "UNSUPPORTED_MEDIA_TYPE",
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported media type",
            ),
            method_not_allowed: CanonicalError::new(
                "METHOD_NOT_ALLOWED",
                StatusCode::METHOD_NOT_ALLOWED,
                "HTTP method not allowed",
            ),
        }
    }
}

impl ProjectErrors for StaticProjectErrors {
    fn type_conversion_error(&self) -> &CanonicalError {
        &self.type_conversion
    }

    fn malformed_request_error(&self) -> &CanonicalError {
        &self.malformed_request
    }

    fn missing_expected_content_error(&self) -> &CanonicalError {
        &self.missing_expected_content
    }

    fn no_acceptable_representation_error(&self) -> &CanonicalError {
        &self.no_acceptable_representation
    }

    fn unsupported_media_type_error(&self) -> &CanonicalError {
        &self.unsupported_media_type
    }

    fn method_not_allowed_error(&self) -> &CanonicalError {
        &self.method_not_allowed
    }
}
