//! Duplicate detection against files already in the target directory.
//!
//! There is no persisted index: every check takes a fresh snapshot of the
//! directory and fingerprints candidate files, so cost grows with the
//! directory. Files whose length differs from the payload are never hashed.

use crate::checksum::{sha256_bytes, sha256_path};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Regular files directly inside a directory at one moment, in name order.
///
/// Not refreshed: files added after `scan` are not seen.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    files: Vec<PathBuf>,
}

impl DirectorySnapshot {
    /// Lists regular files (non-recursive). Entries that cannot be inspected are skipped.
    pub fn scan(dir: &Path) -> io::Result<Self> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                path.is_file().then_some(path)
            })
            .collect();
        files.sort();
        Ok(Self { files })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Returns the name of the first file whose content equals `content`.
    pub fn find_duplicate(&self, content: &[u8]) -> Option<String> {
        let wanted = sha256_bytes(content);
        let wanted_len = content.len() as u64;

        for path in &self.files {
            match fs::metadata(path) {
                Ok(meta) if meta.len() != wanted_len => continue,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
                    continue;
                }
            }
            match sha256_path(path) {
                Ok(digest) if digest == wanted => {
                    return path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned());
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
                }
            }
        }
        None
    }
}

/// Scans `dir` and looks for a file with content identical to `content`.
pub fn find_duplicate(content: &[u8], dir: &Path) -> io::Result<Option<String>> {
    Ok(DirectorySnapshot::scan(dir)?.find_duplicate(content))
}
