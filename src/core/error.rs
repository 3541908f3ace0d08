//! Error handling for layerlift
//!
//! The error surface is intentionally small. Extraction distinguishes two
//! kinds of failure:
//!
//! - **Configuration errors** abort the whole run. The only one reachable
//!   through the orchestrator is [`LayerliftError::MissingRuntime`]: a layer
//!   folder cannot be laid out without knowing which runtime subfolder its
//!   contents belong under.
//! - **Filesystem and serialization errors** also abort the run. A half-built
//!   layer folder with no function referencing it is worse than a clean
//!   failure, so these are never swallowed.
//!
//! Everything else (function not built, unsupported runtime family, missing
//! dependency directory) is a skip condition handled inside the eligibility
//! step and never surfaces as an error.

use thiserror::Error;

/// The main error type for layerlift operations.
#[derive(Error, Debug)]
pub enum LayerliftError {
    /// A function reached the layer-build step without a runtime definition.
    ///
    /// The eligibility filter normally rejects functions without a supported
    /// runtime, so hitting this error indicates inconsistent upstream state
    /// (for example an inventory entry whose runtime was dropped after
    /// eligibility was decided).
    #[error("Function '{function}' has no runtime defined, cannot determine dependency layer layout")]
    MissingRuntime {
        /// Logical id of the function missing a runtime
        function: String,
    },

    /// A function reached the layer-build step with a runtime outside the
    /// supported families.
    ///
    /// Callers are expected to consult the eligibility filter first; this
    /// variant surfaces the broken precondition instead of panicking.
    #[error("Runtime '{runtime}' of function '{function}' is not supported for dependency layers")]
    UnsupportedRuntime {
        /// Logical id of the offending function
        function: String,
        /// The unsupported runtime identifier
        runtime: String,
    },

    /// A resolved function has no matching resource in the template.
    ///
    /// The inventory is resolved from the template by an external
    /// collaborator, so a miss here means the inventory and the template
    /// disagree.
    #[error("Function '{function}' not found in template resources")]
    FunctionResourceNotFound {
        /// Logical id of the function absent from the template
        function: String,
    },

    /// Serializing the nested stack template failed.
    #[error("Failed to serialize nested stack template")]
    TemplateSerialize(#[from] serde_yaml::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
