//! layerlift - Automatic dependency layer extraction for serverless templates
//!
//! layerlift takes the output of a serverless application build (built function
//! artifacts plus per-function dependency directories) and restructures it so
//! that each function's third-party dependencies live in a dedicated Lambda
//! layer instead of being bundled with the function code. The original
//! infrastructure template is patched so every extracted function references
//! its layer through a nested stack that layerlift synthesizes.
//!
//! # Architecture Overview
//!
//! The crate is organized around a single-pass pipeline:
//!
//! 1. The caller resolves the function inventory and runs the build
//!    (both are external concerns, see below).
//! 2. [`stack::eligibility`] decides which functions qualify for extraction:
//!    archive packaging, a supported resource type, a supported runtime
//!    family, presence in the build artifact set, and a non-empty dependency
//!    directory in the build graph.
//! 3. [`layer`] physically relocates each qualifying function's dependencies
//!    into a per-function layer folder, laid out under the runtime-specific
//!    subfolder mandated by [`runtime::RuntimeFamily`].
//! 4. [`stack::NestedStackBuilder`] accumulates one layer resource and one
//!    output per qualifying function in an in-memory sub-template.
//! 5. [`stack::NestedStackManager`] ties it all together and returns a
//!    patched deep copy of the input template. The input template is never
//!    mutated.
//!
//! # Core Modules
//!
//! - [`constants`] - Reserved logical ids, file names, and the closed sets of
//!   supported resource types and runtime families
//! - [`models`] - Function inventory and build result records consumed from
//!   collaborators
//! - [`runtime`] - Runtime layout policy mapping a runtime identifier to the
//!   layer subfolder its contents must live under
//! - [`layer`] - Idempotent construction of per-function layer folders
//! - [`template`] - Typed template model with value-returning patch
//!   operations
//! - [`stack`] - Eligibility filter, nested stack assembler, and the
//!   orchestrator
//! - [`utils`] - Filesystem helpers shared by the above
//!
//! # External Collaborators
//!
//! layerlift deliberately does not parse templates, resolve functions from
//! them, execute builds, or resolve npm/pip/maven dependencies. Callers hand
//! in an already-loaded [`template::Template`], a resolved
//! [`models::Function`] inventory, and a [`models::ApplicationBuildResult`].
//! Writing the nested template file goes through the
//! [`template::TemplateRelocator`] seam so that callers with relative-path
//! rewriting needs can substitute their own implementation.
//!
//! # Example
//!
//! ```rust,no_run
//! use layerlift::models::{ApplicationBuildResult, Function};
//! use layerlift::stack::NestedStackManager;
//! use layerlift::template::{Template, YamlTemplateWriter};
//! use std::path::Path;
//!
//! # fn example(
//! #     template: Template,
//! #     functions: Vec<Function>,
//! #     build_result: ApplicationBuildResult,
//! # ) -> anyhow::Result<()> {
//! let manager = NestedStackManager::new(
//!     "my-stack",
//!     Path::new(".aws-sam/build"),
//!     Path::new("template.yaml"),
//!     &template,
//!     &functions,
//!     &build_result,
//! );
//! let patched = manager.generate_auto_dependency_layer_stack(&YamlTemplateWriter)?;
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod core;
pub mod layer;
pub mod models;
pub mod runtime;
pub mod stack;
pub mod template;
pub mod utils;

pub use crate::core::LayerliftError;
pub use crate::stack::{NestedStackBuilder, NestedStackManager};
pub use crate::template::{Template, TemplateRelocator, YamlTemplateWriter};
