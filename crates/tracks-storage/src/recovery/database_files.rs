//! Delete a database and its WAL sidecar files so it can be recreated.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracks_core::errors::TracksResult;

use crate::to_storage_err;

/// The database file plus its `-wal` and `-shm` companions.
pub fn database_files(path: &Path) -> [PathBuf; 3] {
    let with_suffix = |suffix: &str| {
        let mut os: OsString = path.as_os_str().to_owned();
        os.push(suffix);
        PathBuf::from(os)
    };
    [path.to_path_buf(), with_suffix("-wal"), with_suffix("-shm")]
}

/// Remove every file that makes up the database. Missing files are fine.
/// Returns how many files were deleted.
pub fn remove_database_files(path: &Path) -> TracksResult<usize> {
    let mut removed = 0;
    for file in database_files(path) {
        match std::fs::remove_file(&file) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(to_storage_err(format!(
                    "remove {}: {e}",
                    file.display()
                )))
            }
        }
    }
    Ok(removed)
}
