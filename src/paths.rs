// Storage-path resolution for quickphrase files
//
// The store only knows logical file identifiers; this boundary maps them to
// real paths. Reads search the user directory first, then any system
// directories; writes always go to the user directory.

use std::path::{Path, PathBuf};

/// Resolves logical quickphrase file identifiers to filesystem paths.
pub trait FileResolver: Send + Sync {
    /// Path of an existing readable copy of `file_id`, or `None` when there
    /// is nothing to load. A missing file is not an error; the store treats
    /// it as empty content.
    fn locate(&self, file_id: &str) -> Option<PathBuf>;

    /// Path a save of `file_id` should be written to. The save pipeline
    /// creates missing parent directories itself.
    fn write_target(&self, file_id: &str) -> PathBuf;
}

/// Default resolver: one writable user directory plus ordered read-only
/// system directories.
#[derive(Debug, Clone)]
pub struct DataDirs {
    user: PathBuf,
    system: Vec<PathBuf>,
}

impl DataDirs {
    pub fn new(user: PathBuf, system: Vec<PathBuf>) -> Self {
        Self { user, system }
    }

    /// Resolver rooted at `{platform data dir}/{app}` with no system
    /// fallbacks. Returns `None` when the platform data directory cannot be
    /// determined.
    pub fn user_default(app: &str) -> Option<Self> {
        let user = dirs::data_dir()?.join(app);
        Some(Self::new(user, Vec::new()))
    }

    /// The writable user directory.
    pub fn user_dir(&self) -> &Path {
        &self.user
    }
}

impl FileResolver for DataDirs {
    fn locate(&self, file_id: &str) -> Option<PathBuf> {
        std::iter::once(&self.user)
            .chain(self.system.iter())
            .map(|dir| dir.join(file_id))
            .find(|path| path.is_file())
    }

    fn write_target(&self, file_id: &str) -> PathBuf {
        self.user.join(file_id)
    }
}

#[cfg(test)]
#[path = "paths_test.rs"]
mod tests;
