#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use filetime::{set_file_mtime, FileTime};
use fprune::FileRecord;

pub const DAY: Duration = Duration::from_secs(86_400);

pub fn days_ago(now: SystemTime, days: u64) -> SystemTime {
    now - DAY * days as u32
}

/// Write `contents` to `dir/name` and backdate its modification time.
pub fn write_aged(dir: &Path, name: &str, contents: &str, modified: SystemTime) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    set_file_mtime(&path, FileTime::from_system_time(modified)).unwrap();
    path
}

/// An in-memory record, for tests that never touch the filesystem.
pub fn record(name: &str, size: u64, modified: SystemTime) -> FileRecord {
    FileRecord {
        path: PathBuf::from("/virtual").join(name),
        name: name.to_string(),
        size,
        modified,
        is_dir: false,
    }
}

/// Files left under `root`, as sorted `/`-separated relative paths.
pub fn remaining_files(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    names.sort();
    names
}

pub fn names(records: &[FileRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

/// Whether the tests run with root privileges, which bypass permission bits.
#[cfg(unix)]
pub fn running_as_root() -> bool {
    use std::os::unix::fs::MetadataExt;

    let dir = tempfile::tempdir().unwrap();
    fs::metadata(dir.path()).unwrap().uid() == 0
}

/// Sets a directory's mode and restores `0o755` on drop so the temp dir can
/// be cleaned up.
#[cfg(unix)]
pub struct ModeGuard(PathBuf);

#[cfg(unix)]
impl ModeGuard {
    pub fn set(path: &Path, mode: u32) -> Self {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
        Self(path.to_path_buf())
    }
}

#[cfg(unix)]
impl Drop for ModeGuard {
    fn drop(&mut self) {
        use std::os::unix::fs::PermissionsExt;

        let _ = fs::set_permissions(&self.0, fs::Permissions::from_mode(0o755));
    }
}
