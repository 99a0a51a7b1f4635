// Phrase store - the editable, orderable quickphrase table
// Row and dirty-state logic lives here; async file load/save is in pipeline.rs.

mod pipeline;

pub use pipeline::{Completion, SaveError};

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::codec;
use crate::entry::PhraseEntry;
use crate::events::StoreObserver;
use crate::paths::FileResolver;
use pipeline::TaskResult;

/// Column index of the keyword field.
pub const COL_KEYWORD: usize = 0;
/// Column index of the phrase field.
pub const COL_PHRASE: usize = 1;
/// Number of columns the table exposes.
pub const COLUMN_COUNT: usize = 2;

/// Header label for a column, or `None` for an unknown column.
pub fn header_label(column: usize) -> Option<&'static str> {
    match column {
        COL_KEYWORD => Some("Keyword"),
        COL_PHRASE => Some("Phrase"),
        _ => None,
    }
}

/// An ordered, editable sequence of quickphrase entries with dirty-state
/// tracking, change notification and async file load/save.
///
/// A store instance is owned by one interactive context (typically the UI
/// thread of the editor). Mutation methods are synchronous and notify
/// subscribed [`StoreObserver`]s before returning. [`load`](PhraseStore::load)
/// and [`save`](PhraseStore::save) never block: they hand the file work to
/// the tokio runtime, and the owning context folds the results back in via
/// [`next_completion`](PhraseStore::next_completion) or
/// [`poll_completions`](PhraseStore::poll_completions). Background tasks
/// never touch store state directly.
pub struct PhraseStore {
    entries: Vec<PhraseEntry>,
    dirty: bool,
    /// Bumped on every change to `entries`. A save completion carrying an
    /// older revision must not clear the dirty flag.
    revision: u64,
    load_pending: bool,
    saves_pending: usize,
    next_ticket: u64,
    resolver: Arc<dyn FileResolver>,
    observers: Vec<Arc<dyn StoreObserver>>,
    completion_tx: mpsc::UnboundedSender<TaskResult>,
    completion_rx: mpsc::UnboundedReceiver<TaskResult>,
}

impl PhraseStore {
    /// Create an empty store bound to the given path resolver.
    pub fn new(resolver: Arc<dyn FileResolver>) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            entries: Vec::new(),
            dirty: false,
            revision: 0,
            load_pending: false,
            saves_pending: 0,
            next_ticket: 0,
            resolver,
            observers: Vec::new(),
            completion_tx,
            completion_rx,
        }
    }

    /// Subscribe an observer to change notifications.
    pub fn subscribe(&mut self, observer: Arc<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    /// Number of entries currently in the table.
    pub fn row_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the in-memory sequence may differ from the last successfully
    /// persisted file content.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Cell value at `row`/`column`, or `None` when either is out of range.
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        let entry = self.entries.get(row)?;
        match column {
            COL_KEYWORD => Some(entry.keyword.as_str()),
            COL_PHRASE => Some(entry.phrase.as_str()),
            _ => None,
        }
    }

    /// The current entries, in row order.
    pub fn entries(&self) -> &[PhraseEntry] {
        &self.entries
    }

    /// Overwrite one cell. Returns false (and changes nothing) for an
    /// unknown column or an out-of-range row; otherwise marks the store
    /// dirty and fires `row_changed`. No emptiness validation happens here;
    /// that is the codec boundary's job.
    pub fn set_field(&mut self, row: usize, column: usize, value: impl Into<String>) -> bool {
        if column >= COLUMN_COUNT {
            return false;
        }
        let Some(entry) = self.entries.get_mut(row) else {
            return false;
        };
        let value = value.into();
        if column == COL_KEYWORD {
            entry.keyword = value;
        } else {
            entry.phrase = value;
        }
        self.revision += 1;
        self.notify(|o| o.row_changed(row));
        self.set_dirty(true);
        true
    }

    /// Append a new entry at the end of the table.
    pub fn add_entry(&mut self, keyword: impl Into<String>, phrase: impl Into<String>) {
        let row = self.entries.len();
        self.entries.push(PhraseEntry::new(keyword, phrase));
        self.revision += 1;
        self.notify(|o| o.rows_inserted(row, row));
        self.set_dirty(true);
    }

    /// Remove the entry at `row`. Out-of-range rows are a no-op.
    pub fn delete_entry(&mut self, row: usize) {
        if row >= self.entries.len() {
            return;
        }
        self.entries.remove(row);
        self.revision += 1;
        self.notify(|o| o.rows_removed(row, row));
        self.set_dirty(true);
    }

    /// Remove all entries. Only marks the store dirty if it held anything;
    /// the reset notification fires either way.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.revision += 1;
            self.set_dirty(true);
        }
        self.notify(|o| o.reset());
    }

    /// Replace the table contents from already-loaded text: the synchronous
    /// counterpart of [`load`](PhraseStore::load), for data that arrived on
    /// an open stream. The result counts as unsaved state.
    pub fn load_from_str(&mut self, text: &str) {
        self.entries = codec::parse(text);
        self.revision += 1;
        self.set_dirty(true);
        self.notify(|o| o.reset());
    }

    /// Serialize the current table contents to quickphrase file text.
    pub fn dump(&self) -> String {
        codec::serialize(&self.entries)
    }

    fn set_dirty(&mut self, dirty: bool) {
        if self.dirty != dirty {
            self.dirty = dirty;
            self.notify(|o| o.dirty_changed(dirty));
        }
    }

    fn notify(&self, event: impl Fn(&dyn StoreObserver)) {
        for observer in &self.observers {
            event(observer.as_ref());
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
