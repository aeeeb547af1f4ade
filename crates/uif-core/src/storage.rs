//! Writing fetched images under collision-free names.
//!
//! A name is claimed with an exclusive create, so an existing file is never
//! overwritten: a taken `name.ext` moves on to `name_1.ext`, `name_2.ext`, ...

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A newly created, still empty file that owns its unique name.
#[derive(Debug)]
pub struct ClaimedFile {
    file: File,
    path: PathBuf,
}

impl ClaimedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Writes the whole payload and flushes it to disk. On failure the partial
    /// file is removed so the name does not linger with truncated content.
    pub fn write_all(mut self, data: &[u8]) -> io::Result<PathBuf> {
        let written = self.file.write_all(data).and_then(|()| self.file.sync_all());
        if let Err(e) = written {
            drop(self.file);
            if let Err(rm) = std::fs::remove_file(&self.path) {
                tracing::warn!(path = %self.path.display(), error = %rm, "failed to remove partial file");
            }
            return Err(e);
        }
        Ok(self.path)
    }
}

/// `name.ext` with `_<n>` inserted before the extension (`n = 0` keeps the name).
pub fn suffixed_name(file_name: &str, n: u32) -> String {
    if n == 0 {
        return file_name.to_string();
    }
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, n, ext.to_string_lossy()),
        None => format!("{}_{}", stem, n),
    }
}

/// Creates `dir/file_name`, or the first free `_<n>` variant of it.
pub fn create_unique(dir: &Path, file_name: &str) -> io::Result<ClaimedFile> {
    let mut n = 0u32;
    loop {
        let path = dir.join(suffixed_name(file_name, n));
        match File::options().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok(ClaimedFile { file, path }),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                n = n.checked_add(1).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::Other, "no free filename left")
                })?;
            }
            Err(e) => return Err(e),
        }
    }
}
