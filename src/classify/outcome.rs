//! Classification outcomes and server-side log details.

use crate::canonical::ErrorSet;
use crate::failure::Failure;

/// Log-detail key for the classified failure's own message.
pub const FAILURE_MESSAGE_KEY: &str = "failure_message";

/// An ordered sequence of key/value diagnostic pairs destined for server
/// logs only.
///
/// Values may contain raw internal strings (full failure messages, internal
/// type names) that must never appear in client-facing metadata. `push`
/// returns the updated value rather than mutating a caller-held list, so no
/// caller state is aliased during classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogDetails {
    entries: Vec<(String, String)>,
}

impl LogDetails {
    /// Create an empty detail list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key/value pair, returning the extended list.
    #[must_use]
    pub fn push(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// The entries in append order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries have been appended.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The value of the first entry with the given key, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over entries in append order.
    pub fn iter(&self) -> std::slice::Iter<'_, (String, String)> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a LogDetails {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Shared formatting helpers injected into classifier stages.
///
/// Keeps log-detail construction consistent across stages: every stage that
/// records the base failure message does so under the same key.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlerUtils;

impl HandlerUtils {
    /// Append the failure's own message under [`FAILURE_MESSAGE_KEY`].
    #[must_use]
    pub fn append_base_failure_message(&self, failure: &Failure, details: LogDetails) -> LogDetails {
        details.push(FAILURE_MESSAGE_KEY, failure.message())
    }
}

/// The terminal result of one classification call.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationOutcome {
    /// The failure was recognized: respond with `errors`, record
    /// `log_details` server-side.
    Handled {
        /// Canonical errors to render to the client. Never empty.
        errors: ErrorSet,
        /// Server-only diagnostics accumulated while classifying.
        log_details: LogDetails,
    },
    /// The failure is outside this stage's taxonomy; the enclosing chain
    /// should ask the next stage.
    NotHandled,
}

impl ClassificationOutcome {
    /// Build a handled outcome. `errors` must not be empty.
    pub fn handled(errors: ErrorSet, log_details: LogDetails) -> Self {
        debug_assert!(
            !errors.is_empty(),
            "a handled outcome must carry at least one error"
        );
        Self::Handled {
            errors,
            log_details,
        }
    }

    /// Build a not-handled outcome.
    pub fn not_handled() -> Self {
        Self::NotHandled
    }

    /// Returns true if the failure was recognized.
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled { .. })
    }

    /// The error set, when handled.
    pub fn errors(&self) -> Option<&ErrorSet> {
        match self {
            Self::Handled { errors, .. } => Some(errors),
            Self::NotHandled => None,
        }
    }

    /// The log details, when handled.
    pub fn log_details(&self) -> Option<&LogDetails> {
        match self {
            Self::Handled { log_details, .. } => Some(log_details),
            Self::NotHandled => None,
        }
    }
}

/// A single stage in the failure-classification chain.
///
/// The enclosing dispatcher (not part of this crate) walks its stages in
/// order and stops at the first `Handled` outcome. Implementations must be
/// stateless across calls so one instance can serve concurrent requests.
pub trait FailureListener: Send + Sync {
    /// Classify one failure. Never fails; unrecognized input yields
    /// [`ClassificationOutcome::NotHandled`].
    fn classify(&self, failure: &Failure) -> ClassificationOutcome;
}
