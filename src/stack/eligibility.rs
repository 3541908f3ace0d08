//! Eligibility predicates for dependency extraction
//!
//! Each predicate is independently testable and logs its skip decision at
//! debug level. None of them fail; ineligibility is a local outcome, not an
//! error.

use tracing::debug;

use crate::constants::SUPPORTED_RESOURCE_TYPES;
use crate::models::{ApplicationBuildResult, BuildArtifacts, Function};
use crate::runtime::is_runtime_supported;

/// Whether the resource type participates in dependency extraction.
pub fn is_extractable_resource_type(resource_type: &str) -> bool {
    SUPPORTED_RESOURCE_TYPES.contains(&resource_type)
}

/// Whether the function was built in this session.
pub fn is_function_built(function: &Function, artifacts: &BuildArtifacts) -> bool {
    if artifacts.contains(&function.logical_id) {
        return true;
    }
    debug!(
        function = %function.logical_id,
        "function was not built in this session, skipping dependency layer creation"
    );
    false
}

/// Whether the function qualifies for dependency layer creation.
///
/// Requires the function to have been built in this session and to run on a
/// supported runtime family. Packaging format and resource type are expected
/// to be restricted by the caller before this predicate is consulted; the
/// dependency directory check happens afterwards against the build graph.
pub fn is_function_supported(function: &Function, build_result: &ApplicationBuildResult) -> bool {
    is_function_built(function, &build_result.artifacts)
        && is_runtime_supported(function.runtime.as_deref())
}
