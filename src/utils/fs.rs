//! File system utilities for layer folder construction
//!
//! All operations in this module are synchronous and blocking; layer folders
//! are built one function at a time inside the orchestrator's single pass, so
//! there is no concurrent access to coordinate. Errors carry enough context
//! to identify the offending path and are never swallowed.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

#[cfg(unix)]
use crate::constants::BUILD_DIR_PERMISSIONS;

/// Creates a build output directory with standard build permissions,
/// recursively creating parent path segments.
///
/// On Unix the directory (and any created parents) get mode 0o755. On other
/// platforms the default permissions apply.
pub fn create_build_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(BUILD_DIR_PERMISSIONS);
    }
    builder
        .create(path)
        .with_context(|| format!("Failed to create build directory: {}", path.display()))
}

/// Recursively removes a directory tree if it exists.
///
/// A missing directory is not an error; removal failures (permissions, busy
/// mounts) propagate.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Whether a directory exists and contains at least one entry.
pub fn dir_has_entries(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    let mut entries = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory: {}", path.display()))?;
    Ok(entries.next().is_some())
}

/// Recursively copies the contents of `src` into `dst`, preserving relative
/// structure.
///
/// Regular files and directories are copied; symlinks and other special file
/// types are skipped. Existing files in the destination are overwritten.
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    create_build_dir(dst)?;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry =
            entry.with_context(|| format!("Failed to walk directory: {}", src.display()))?;
        let relative = entry.path().strip_prefix(src).with_context(|| {
            format!(
                "Failed to resolve {} relative to {}",
                entry.path().display(),
                src.display()
            )
        })?;
        let target = dst.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            create_build_dir(&target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy file from {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
        // Symlinks and special files are skipped.
    }

    Ok(())
}

/// Writes bytes to a file atomically.
///
/// The content is written to a temporary file in the same directory and
/// renamed into place, so the destination never holds a partial write.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    std::io::Write::write_all(&mut temp, content)
        .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    temp.persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;
    Ok(())
}

/// Writes a string to a file atomically. See [`atomic_write`].
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}
