// Tests for DataDirs path resolution
// Test cases:
// - locate searches the user directory before system directories
// - locate falls back to system directories, or None when nowhere
// - write_target always points into the user directory

use super::*;
use tempfile::TempDir;

const FILE_ID: &str = "QuickPhrase.mb";

#[test]
fn test_locate_prefers_user_dir() {
    let user = TempDir::new().unwrap();
    let system = TempDir::new().unwrap();
    std::fs::write(user.path().join(FILE_ID), "u\tuser\n").unwrap();
    std::fs::write(system.path().join(FILE_ID), "s\tsystem\n").unwrap();

    let dirs = DataDirs::new(user.path().into(), vec![system.path().into()]);
    assert_eq!(dirs.locate(FILE_ID), Some(user.path().join(FILE_ID)));
}

#[test]
fn test_locate_falls_back_to_system_dirs() {
    let user = TempDir::new().unwrap();
    let system = TempDir::new().unwrap();
    std::fs::write(system.path().join(FILE_ID), "s\tsystem\n").unwrap();

    let dirs = DataDirs::new(user.path().into(), vec![system.path().into()]);
    assert_eq!(dirs.locate(FILE_ID), Some(system.path().join(FILE_ID)));
}

#[test]
fn test_locate_missing_everywhere() {
    let user = TempDir::new().unwrap();
    let dirs = DataDirs::new(user.path().into(), Vec::new());
    assert_eq!(dirs.locate(FILE_ID), None);
}

#[test]
fn test_write_target_is_user_local() {
    let user = TempDir::new().unwrap();
    let system = TempDir::new().unwrap();
    // Even when only a system copy exists, saves go to the user directory.
    std::fs::write(system.path().join(FILE_ID), "s\tsystem\n").unwrap();

    let dirs = DataDirs::new(user.path().into(), vec![system.path().into()]);
    assert_eq!(dirs.write_target(FILE_ID), user.path().join(FILE_ID));
}
