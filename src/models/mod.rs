//! Shared data models consumed from build and resolution collaborators
//!
//! layerlift does not resolve functions from templates and does not run
//! builds. The records in this module are the hand-off points: a resolver
//! produces the [`Function`] inventory, and the build orchestrator produces
//! an [`ApplicationBuildResult`] describing what was built and where each
//! function's dependencies were staged. All of them are read-only to this
//! crate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Packaging format of a function.
///
/// Only [`PackageType::Zip`] functions are candidates for dependency
/// extraction; image-packaged functions carry their dependencies inside the
/// image and are never eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageType {
    /// Archive packaging, deployed from a zip artifact
    Zip,
    /// Container image packaging
    Image,
}

/// A single resolved function from the template.
///
/// Produced by a template-to-function resolver. `logical_id` doubles as the
/// key into [`BuildArtifacts`] and [`BuildGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Logical id of the function resource in the template
    pub logical_id: String,
    /// CloudFormation resource type, e.g. `AWS::Serverless::Function`
    pub resource_type: String,
    /// Packaging format
    pub package_type: PackageType,
    /// Runtime identifier, e.g. `python3.11`. Absent when the template does
    /// not pin one (which makes the function ineligible for extraction).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

impl Function {
    /// Convenience constructor for an archive-packaged function.
    pub fn zip(
        logical_id: impl Into<String>,
        resource_type: impl Into<String>,
        runtime: Option<&str>,
    ) -> Self {
        Self {
            logical_id: logical_id.into(),
            resource_type: resource_type.into(),
            package_type: PackageType::Zip,
            runtime: runtime.map(str::to_string),
        }
    }
}

/// The artifact set of a build session.
///
/// Maps function logical ids to the directory their built artifact landed in.
/// Membership is what matters for eligibility: a function absent from the set
/// was not built in this session and is skipped.
#[derive(Debug, Clone, Default)]
pub struct BuildArtifacts {
    artifacts: HashMap<String, PathBuf>,
}

impl BuildArtifacts {
    /// Creates an empty artifact set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the artifact location of a built function.
    pub fn insert(&mut self, logical_id: impl Into<String>, artifact_dir: impl Into<PathBuf>) {
        self.artifacts.insert(logical_id.into(), artifact_dir.into());
    }

    /// Whether the given function was built in this session.
    pub fn contains(&self, logical_id: &str) -> bool {
        self.artifacts.contains_key(logical_id)
    }

    /// Artifact directory of a built function, if any.
    pub fn artifact_dir(&self, logical_id: &str) -> Option<&Path> {
        self.artifacts.get(logical_id).map(PathBuf::as_path)
    }
}

/// Build definition record for one function.
///
/// Build deduplication may share one definition between several functions;
/// that is an upstream concern. layerlift only reads the dependency staging
/// directory.
#[derive(Debug, Clone, Default)]
pub struct BuildDefinition {
    /// Directory the build staged this function's third-party dependencies
    /// in, when dependency separation was enabled for the build.
    pub dependencies_dir: Option<PathBuf>,
}

impl BuildDefinition {
    /// A definition with a dependency staging directory.
    pub fn with_dependencies_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dependencies_dir: Some(dir.into()),
        }
    }
}

/// Mapping from function logical ids to their build definitions.
#[derive(Debug, Clone, Default)]
pub struct BuildGraph {
    definitions: HashMap<String, BuildDefinition>,
}

impl BuildGraph {
    /// Creates an empty build graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the build definition of a function.
    pub fn insert(&mut self, logical_id: impl Into<String>, definition: BuildDefinition) {
        self.definitions.insert(logical_id.into(), definition);
    }

    /// Dependency staging directory recorded for a function, if any.
    pub fn dependencies_dir_for(&self, logical_id: &str) -> Option<&Path> {
        self.definitions
            .get(logical_id)
            .and_then(|definition| definition.dependencies_dir.as_deref())
    }
}

/// Complete build result handed over by the build orchestrator.
#[derive(Debug, Clone, Default)]
pub struct ApplicationBuildResult {
    /// Which functions were built, and where
    pub artifacts: BuildArtifacts,
    /// Per-function build definitions
    pub build_graph: BuildGraph,
}
