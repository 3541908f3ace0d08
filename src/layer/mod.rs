//! Layer folder construction
//!
//! A layer folder is the on-disk content of one generated dependency layer:
//!
//! ```text
//! <build_dir>/<layer_logical_id>/
//! ├── <runtime subfolder>/   # copied dependency contents
//! └── LAYERLIFT_README       # marker naming the owning function
//! ```
//!
//! Construction is destroy-and-recreate: any previous folder under the same
//! logical id is removed first, so stale content from an earlier run never
//! leaks into a rebuilt layer. Regeneration is idempotent but not
//! incremental.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::LAYER_README_FILE_NAME;
use crate::core::LayerliftError;
use crate::runtime::RuntimeFamily;
use crate::utils::fs::{copy_dir, create_build_dir, remove_dir_all_if_exists, safe_write};

/// Removes a partially built layer folder unless disarmed.
///
/// The folder builder deletes any pre-existing layer folder before it starts,
/// so on failure there is nothing valid to fall back to; the guard makes sure
/// a half-populated folder is not mistaken for a complete layer on the next
/// run that does not rebuild it.
struct PartialLayerCleanup<'a> {
    layer_root: &'a Path,
    armed: bool,
}

impl<'a> PartialLayerCleanup<'a> {
    fn new(layer_root: &'a Path) -> Self {
        Self {
            layer_root,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PartialLayerCleanup<'_> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(error) = remove_dir_all_if_exists(self.layer_root) {
                debug!(
                    layer_root = %self.layer_root.display(),
                    %error,
                    "failed to clean up partially built layer folder"
                );
            }
        }
    }
}

/// Builds the layer folder for one function, returning the layer root path.
///
/// Any existing folder under `build_dir/layer_logical_id` is removed first.
/// The runtime-specific subfolder is created with build permissions, the
/// contents of `dependencies_dir` are copied into it when that directory
/// exists, and the marker file is written at the layer root regardless of
/// whether any dependencies were found.
///
/// # Errors
///
/// - [`LayerliftError::MissingRuntime`] when `runtime` is `None`; the layout
///   subfolder cannot be chosen without it.
/// - [`LayerliftError::UnsupportedRuntime`] when the runtime is outside the
///   supported families, which callers are expected to have filtered out.
/// - Filesystem errors propagate unchanged; whatever was built so far is
///   removed before returning.
pub fn update_layer_folder(
    build_dir: &Path,
    dependencies_dir: &Path,
    layer_logical_id: &str,
    function_logical_id: &str,
    runtime: Option<&str>,
) -> Result<PathBuf> {
    let runtime = runtime.ok_or_else(|| LayerliftError::MissingRuntime {
        function: function_logical_id.to_string(),
    })?;
    let family =
        RuntimeFamily::from_runtime(runtime).ok_or_else(|| LayerliftError::UnsupportedRuntime {
            function: function_logical_id.to_string(),
            runtime: runtime.to_string(),
        })?;

    let layer_root = build_dir.join(layer_logical_id);
    remove_dir_all_if_exists(&layer_root)?;

    let cleanup = PartialLayerCleanup::new(&layer_root);
    let contents_dir = layer_root.join(family.layer_subfolder());
    create_build_dir(&contents_dir)?;
    if dependencies_dir.is_dir() {
        copy_dir(dependencies_dir, &contents_dir)?;
    }
    write_layer_readme(&layer_root, function_logical_id)?;
    cleanup.disarm();

    debug!(
        function = function_logical_id,
        layer_root = %layer_root.display(),
        "built dependency layer folder"
    );
    Ok(layer_root)
}

/// Writes the discoverability marker at the layer root.
fn write_layer_readme(layer_root: &Path, function_logical_id: &str) -> Result<()> {
    let content = format!(
        "This layer contains dependencies of function {function_logical_id} \
         and was automatically created by layerlift"
    );
    safe_write(&layer_root.join(LAYER_README_FILE_NAME), &content)
}
