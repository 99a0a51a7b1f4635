// Quickphrase entry - the value type the editor manages

use serde::{Deserialize, Serialize};

/// One quickphrase entry: a short keyword mapped to its expansion phrase.
///
/// Duplicate keywords are permitted and kept in order; the store never merges
/// or reorders entries on its own. Empty fields are allowed while an entry is
/// being edited in memory and are dropped at the codec boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseEntry {
    /// Trigger keyword (e.g. "brb")
    pub keyword: String,
    /// Expansion phrase (e.g. "be right back")
    pub phrase: String,
}

impl PhraseEntry {
    pub fn new(keyword: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            phrase: phrase.into(),
        }
    }
}
