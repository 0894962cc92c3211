//! Draft Tracker
//!
//! Owns the dream text being written, keeps its word count current and
//! mirrors every change into the key-value store.

use crate::state::store::{KeyValueStore, DRAFT_KEY};

/// Count of pieces produced by splitting on a single space.
///
/// Runs of spaces and other whitespace are not collapsed, and the empty
/// string counts as one word.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// The current dream text and its derived word count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    text: String,
    word_count: usize,
}

impl Draft {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let word_count = word_count(&text);
        Self { text, word_count }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Keeps a [`Draft`] in sync with its persisted copy.
pub struct DraftTracker {
    draft: Draft,
    store: Box<dyn KeyValueStore>,
}

impl DraftTracker {
    /// Build the session's draft from the store.
    ///
    /// This is the only read from the store for the lifetime of the tracker.
    /// An unreadable value starts the session with an empty draft.
    pub fn load_initial(store: Box<dyn KeyValueStore>) -> Self {
        let draft = match store.get(DRAFT_KEY) {
            Ok(Some(text)) => Draft::new(text),
            Ok(None) => Draft::new(""),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read saved draft, starting empty");
                Draft::new("")
            }
        };

        tracing::debug!(words = draft.word_count(), "Loaded draft");
        Self { draft, store }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Replace the text and persist it.
    ///
    /// A failed write is logged; the in-memory draft is updated regardless.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft = Draft::new(text);

        if let Err(e) = self.store.set(DRAFT_KEY, &self.draft.text) {
            tracing::warn!(
                error = %e,
                code = e.error_code(),
                "Failed to persist draft"
            );
        }
    }
}
