//! File and directory helpers.
//!
//! Thin wrappers over `std::fs` and `fs_extra` that attach the offending path
//! to every error. Directory listings are returned sorted.

pub mod file {
    use std::path::Path;

    use anyhow::{Context, Result};
    use fs_extra::file::CopyOptions;

    pub fn exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().is_file()
    }

    /// Remove a file. Returns `false` if there was nothing to remove.
    pub fn delete(path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        if !exists(path) {
            return Ok(false);
        }
        std::fs::remove_file(path).with_context(|| format!("failed to delete {}", path.display()))?;
        Ok(true)
    }

    fn options(overwrite: bool) -> CopyOptions {
        let mut options = CopyOptions::new();
        options.overwrite = overwrite;
        options
    }

    /// Copy `src` to `dst`. Fails if `dst` exists and `overwrite` is false.
    pub fn copy(src: impl AsRef<Path>, dst: impl AsRef<Path>, overwrite: bool) -> Result<u64> {
        let (src, dst) = (src.as_ref(), dst.as_ref());
        fs_extra::file::copy(src, dst, &options(overwrite))
            .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))
    }

    /// Move `src` to `dst`, replacing an existing destination only when `overwrite` is set.
    pub fn move_to(src: impl AsRef<Path>, dst: impl AsRef<Path>, overwrite: bool) -> Result<()> {
        let (src, dst) = (src.as_ref(), dst.as_ref());
        if overwrite && exists(dst) {
            delete(dst)?;
        }
        fs_extra::file::move_file(src, dst, &options(overwrite))
            .with_context(|| format!("failed to move {} to {}", src.display(), dst.display()))?;
        Ok(())
    }
}

pub mod directory {
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};

    pub fn exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().is_dir()
    }

    /// Create a directory and any missing parents. Returns `false` if it was already there.
    pub fn create(path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        if exists(path) {
            return Ok(false);
        }
        std::fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory {}", path.display()))?;
        Ok(true)
    }

    /// Remove an empty directory. Returns `false` if it did not exist.
    pub fn delete(path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        if !exists(path) {
            return Ok(false);
        }
        std::fs::remove_dir(path)
            .with_context(|| format!("failed to delete directory {}", path.display()))?;
        Ok(true)
    }

    fn entries(path: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
        let read = std::fs::read_dir(path)
            .with_context(|| format!("failed to read directory {}", path.display()))?;
        let mut found = Vec::new();
        for entry in read {
            let entry = entry.with_context(|| format!("failed to read entry in {}", path.display()))?;
            let entry_path = entry.path();
            if keep(&entry_path) {
                found.push(entry_path);
            }
        }
        found.sort();
        Ok(found)
    }

    /// Regular files directly inside `path`.
    pub fn files(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        entries(path.as_ref(), Path::is_file)
    }

    /// Subdirectories directly inside `path`.
    pub fn directories(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        entries(path.as_ref(), Path::is_dir)
    }

    /// Files whose extension matches `ext` case-insensitively. `ext` may start with a dot.
    pub fn files_with_extension(path: impl AsRef<Path>, ext: &str) -> Result<Vec<PathBuf>> {
        let wanted = ext.trim_start_matches('.');
        entries(path.as_ref(), |p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
        })
    }
}
