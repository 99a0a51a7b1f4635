// Async load/save pipelines for the phrase store
//
// Background work runs on the tokio runtime and never touches store state;
// results come back over an unbounded channel as TaskResults that the owning
// context applies, mirroring completion delivery onto a UI thread.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncWriteExt;

use super::PhraseStore;
use crate::codec;
use crate::entry::PhraseEntry;

/// Error from a failed save. Carried in [`Completion::Save`] for the UI to
/// surface; the store itself only keeps the dirty flag set.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("Failed to replace {path:?}: {source}")]
    Replace { path: PathBuf, source: io::Error },
}

/// A finished background operation, already folded into the store by the
/// time the owning context sees it.
#[derive(Debug)]
pub enum Completion {
    /// A load finished; `appended` entries were added to the table (zero
    /// when the source file was missing or unreadable).
    Load { appended: usize },
    /// A save finished. `ticket` is the value the `save` call returned.
    Save {
        ticket: u64,
        result: Result<(), SaveError>,
    },
}

/// Raw result sent back from a background task.
pub(crate) enum TaskResult {
    Load {
        entries: Vec<PhraseEntry>,
    },
    Save {
        ticket: u64,
        revision: u64,
        result: Result<(), SaveError>,
    },
}

impl PhraseStore {
    /// Begin loading `file_id` in the background.
    ///
    /// With `append == false` the table is cleared (and the dirty flag
    /// dropped) immediately, before the file is read, so the view empties
    /// while the load runs; the parsed entries land once the completion is
    /// applied. With `append == true` the store is marked dirty right away
    /// and the parsed entries land after the existing rows.
    ///
    /// At most one load may be in flight per store; calls made while one is
    /// pending are silently ignored. Either way the table ends up dirty once
    /// a load completes. Must be called within a tokio runtime.
    pub fn load(&mut self, file_id: &str, append: bool) {
        if self.load_pending {
            crate::debug!("Load of {:?} ignored, another load is pending", file_id);
            return;
        }
        if append {
            self.set_dirty(true);
        } else {
            if !self.entries.is_empty() {
                self.entries.clear();
                self.revision += 1;
            }
            self.set_dirty(false);
            self.notify(|o| o.reset());
        }
        self.load_pending = true;

        // Path resolution stats the filesystem, so it belongs to the
        // background phase along with the read itself.
        let resolver = Arc::clone(&self.resolver);
        let file_id = file_id.to_string();
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let source = resolver.locate(&file_id);
            crate::debug!("Loading quickphrase file {:?} from {:?}", file_id, source);
            let entries = read_entries(source.as_deref()).await;
            // The owning context may drop the store before the task ends.
            let _ = tx.send(TaskResult::Load { entries });
        });
    }

    /// Begin saving the table contents to `file_id` in the background.
    /// Returns a ticket identifying this save in the eventual
    /// [`Completion::Save`].
    ///
    /// The entries are snapshotted now: edits made while the write runs do
    /// not leak into the file, and a save whose snapshot predates later
    /// edits never clears the dirty flag. Any number of saves may be in
    /// flight at once; each writes its own temp file and atomically renames
    /// it over the destination. Must be called within a tokio runtime.
    pub fn save(&mut self, file_id: &str) -> u64 {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let snapshot = self.entries.clone();
        let revision = self.revision;
        let target = self.resolver.write_target(file_id);
        crate::debug!(
            "Saving {} entries to {:?} (ticket {})",
            snapshot.len(),
            target,
            ticket
        );
        self.saves_pending += 1;
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = write_entries(&target, ticket, &snapshot).await;
            let _ = tx.send(TaskResult::Save {
                ticket,
                revision,
                result,
            });
        });
        ticket
    }

    /// Whether any background load or save is still in flight.
    pub fn has_pending(&self) -> bool {
        self.load_pending || self.saves_pending > 0
    }

    /// Wait for the next background completion and fold it into the store.
    /// Returns `None` immediately when nothing is pending.
    pub async fn next_completion(&mut self) -> Option<Completion> {
        if !self.has_pending() {
            return None;
        }
        // The store owns a sender, so recv() cannot yield None here.
        let result = self.completion_rx.recv().await?;
        Some(self.apply(result))
    }

    /// Apply every already-delivered completion without blocking and return
    /// them, so a polling caller sees save failures too. Suited to an
    /// immediate-mode UI tick.
    pub fn poll_completions(&mut self) -> Vec<Completion> {
        let mut applied = Vec::new();
        while let Ok(result) = self.completion_rx.try_recv() {
            applied.push(self.apply(result));
        }
        applied
    }

    fn apply(&mut self, result: TaskResult) -> Completion {
        match result {
            TaskResult::Load { entries } => {
                let appended = entries.len();
                crate::info!("Loaded {} quickphrase entries", appended);
                self.entries.extend(entries);
                self.revision += 1;
                self.load_pending = false;
                // A freshly loaded table counts as unsaved output of a
                // background op, replace case included.
                self.set_dirty(true);
                self.notify(|o| o.reset());
                Completion::Load { appended }
            }
            TaskResult::Save {
                ticket,
                revision,
                result,
            } => {
                self.saves_pending -= 1;
                match &result {
                    Ok(()) => {
                        if revision == self.revision {
                            self.set_dirty(false);
                        } else {
                            crate::debug!(
                                "Save ticket {} finished against a stale snapshot, keeping dirty flag",
                                ticket
                            );
                        }
                    }
                    Err(e) => {
                        crate::warn!("Save ticket {} failed: {}", ticket, e);
                    }
                }
                Completion::Save { ticket, result }
            }
        }
    }
}

/// Background half of a load: read and parse the resolved file. A missing or
/// unreadable source is "nothing to load", not an error.
async fn read_entries(source: Option<&Path>) -> Vec<PhraseEntry> {
    let Some(path) = source else {
        return Vec::new();
    };
    match tokio::fs::read(path).await {
        Ok(bytes) => codec::parse(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            crate::debug!("Could not read {:?}: {}, treating as empty", path, e);
            Vec::new()
        }
    }
}

/// Background half of a save: serialize the snapshot and write it with the
/// temp-file-then-rename discipline, so a half-written file is never visible
/// at the destination. The ticket keeps concurrent saves on separate temp
/// files.
async fn write_entries(
    target: &Path,
    ticket: u64,
    entries: &[PhraseEntry],
) -> Result<(), SaveError> {
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| SaveError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let content = codec::serialize(entries);
    let temp = temp_path(target, ticket);

    let write = async {
        let mut file = tokio::fs::File::create(&temp).await?;
        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        Ok::<_, io::Error>(())
    };
    if let Err(source) = write.await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(SaveError::Write { path: temp, source });
    }

    if let Err(source) = tokio::fs::rename(&temp, target).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(SaveError::Replace {
            path: target.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn temp_path(target: &Path, ticket: u64) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.tmp", ticket));
    target.with_file_name(name)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
