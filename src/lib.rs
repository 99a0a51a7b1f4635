// quickphrase - data-management core for a quickphrase editor
//
// Maintains an editable, orderable table of keyword/phrase entries backed by
// a line-oriented text file. The table is owned by a single interactive
// context; file reads and writes run on the tokio runtime and report back
// through completions, so the interactive path never blocks on I/O.

pub mod codec;
pub mod entry;
pub mod events;
pub mod paths;
pub mod store;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use entry::PhraseEntry;
pub use events::StoreObserver;
pub use paths::{DataDirs, FileResolver};
pub use store::{
    header_label, Completion, PhraseStore, SaveError, COLUMN_COUNT, COL_KEYWORD, COL_PHRASE,
};
