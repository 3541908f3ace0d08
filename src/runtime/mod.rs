//! Runtime layout policy
//!
//! Lambda layers are mounted under `/opt`, and each language family expects
//! its libraries in a fixed subfolder of the layer archive. This module maps
//! runtime identifiers to those subfolders and defines the closed set of
//! families for which extraction is supported.

use tracing::debug;

/// Language families for which dependency layers can be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeFamily {
    /// `python*` runtimes
    Python,
    /// `nodejs*` runtimes
    NodeJs,
    /// `java*` runtimes
    Java,
}

impl RuntimeFamily {
    /// Matches a runtime identifier against the supported family prefixes.
    ///
    /// Returns `None` for runtimes outside the closed set, e.g. `ruby3.2`
    /// or `go1.x`.
    pub fn from_runtime(runtime: &str) -> Option<Self> {
        if runtime.starts_with("python") {
            Some(Self::Python)
        } else if runtime.starts_with("nodejs") {
            Some(Self::NodeJs)
        } else if runtime.starts_with("java") {
            Some(Self::Java)
        } else {
            None
        }
    }

    /// Relative subfolder of the layer root that dependency contents must
    /// live under for this family.
    pub const fn layer_subfolder(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::NodeJs => "nodejs/node_modules",
            Self::Java => "java/lib",
        }
    }
}

/// Whether a runtime qualifies for dependency layer creation.
///
/// Absent or out-of-family runtimes are not an error here; the function logs
/// the decision and returns `false` so the caller can skip the function.
pub fn is_runtime_supported(runtime: Option<&str>) -> bool {
    match runtime {
        Some(runtime) if RuntimeFamily::from_runtime(runtime).is_some() => true,
        _ => {
            debug!(
                runtime = runtime.unwrap_or("<none>"),
                "runtime is not supported for dependency layer creation"
            );
            false
        }
    }
}
