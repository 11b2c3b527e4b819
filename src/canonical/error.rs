//! Canonical error entries and their client-safe decorations.

use http::StatusCode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A stable, registry-defined error identity.
///
/// Canonical errors decouple the client-facing error contract from the
/// serving framework's internal exception taxonomy: the code never changes
/// when the framework renames or subclasses its exceptions. Instances are
/// owned by a [`ProjectErrors`](crate::registry::ProjectErrors) registry and
/// treated as immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalError {
    code: String,
    #[serde(with = "http_status")]
    status: StatusCode,
    message: String,
}

impl CanonicalError {
    /// Create a canonical error with a stable code, HTTP status, and default
    /// client message.
    pub fn new(code: impl Into<String>, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            status,
            message: message.into(),
        }
    }

    /// The stable machine-readable code (e.g. `TYPE_CONVERSION_ERROR`).
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The HTTP status the enclosing handler should respond with.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The default client-safe message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CanonicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// A [`CanonicalError`] decorated with client-safe structured metadata.
///
/// The decoration is additive: the underlying canonical error is never
/// mutated, and an undecorated error converts via `From` with empty
/// metadata. Metadata values must already be safe for client exposure —
/// anything internal belongs in
/// [`LogDetails`](crate::classify::LogDetails) instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorWithContext {
    #[serde(flatten)]
    error: CanonicalError,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    metadata: IndexMap<String, Value>,
}

impl ErrorWithContext {
    /// Decorate `error` with a pre-built metadata map.
    pub fn new(error: CanonicalError, metadata: IndexMap<String, Value>) -> Self {
        Self { error, metadata }
    }

    /// Attach a key-value pair to the client-facing metadata.
    ///
    /// The value is converted via [`serde_json::to_value`]; if conversion
    /// fails, the entry is silently skipped.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), v);
        }
        self
    }

    /// The underlying canonical error.
    pub fn error(&self) -> &CanonicalError {
        &self.error
    }

    /// Shorthand for `self.error().code()`.
    pub fn code(&self) -> &str {
        self.error.code()
    }

    /// Shorthand for `self.error().status()`.
    pub fn status(&self) -> StatusCode {
        self.error.status()
    }

    /// The client-facing metadata, in insertion order.
    pub fn metadata(&self) -> &IndexMap<String, Value> {
        &self.metadata
    }
}

impl From<CanonicalError> for ErrorWithContext {
    fn from(error: CanonicalError) -> Self {
        Self {
            error,
            metadata: IndexMap::new(),
        }
    }
}

/// Serde helpers for `http::StatusCode` as a bare `u16`.
mod http_status {
    use http::StatusCode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(status.as_u16())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StatusCode, D::Error> {
        let raw = u16::deserialize(deserializer)?;
        StatusCode::from_u16(raw).map_err(serde::de::Error::custom)
    }
}
