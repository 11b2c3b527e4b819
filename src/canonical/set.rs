//! Deduplicated, deterministically ordered error collections.

use serde::Serialize;

use super::error::ErrorWithContext;

/// The set of errors produced by a single classification decision.
///
/// Entries are kept sorted by canonical-error code so rendered client
/// responses are reproducible across runs; equal entries inserted twice are
/// dropped. Entries sharing a code but differing in metadata are both kept,
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorSet {
    entries: Vec<ErrorWithContext>,
}

impl ErrorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set containing exactly one entry — the dominant case for
    /// classification outcomes.
    pub fn singleton(entry: impl Into<ErrorWithContext>) -> Self {
        let mut set = Self::new();
        set.insert(entry);
        set
    }

    /// Insert an entry, keeping code order and dropping exact duplicates.
    ///
    /// Returns false if an equal entry was already present.
    pub fn insert(&mut self, entry: impl Into<ErrorWithContext>) -> bool {
        let entry = entry.into();
        if self.entries.contains(&entry) {
            return false;
        }
        let position = self
            .entries
            .iter()
            .position(|existing| existing.code() > entry.code())
            .unwrap_or(self.entries.len());
        self.entries.insert(position, entry);
        true
    }

    /// Number of entries in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in code order.
    pub fn iter(&self) -> std::slice::Iter<'_, ErrorWithContext> {
        self.entries.iter()
    }

    /// The entries as a slice, in code order.
    pub fn entries(&self) -> &[ErrorWithContext] {
        &self.entries
    }

    /// The canonical codes present in the set, in order.
    pub fn codes(&self) -> Vec<&str> {
        self.entries.iter().map(ErrorWithContext::code).collect()
    }
}

impl<'a> IntoIterator for &'a ErrorSet {
    type Item = &'a ErrorWithContext;
    type IntoIter = std::slice::Iter<'a, ErrorWithContext>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<E: Into<ErrorWithContext>> FromIterator<E> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}
