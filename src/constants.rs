//! Global constants used throughout the layerlift codebase.
//!
//! This module contains the reserved logical ids, well-known file names, and
//! the closed sets of supported resource types and runtime families. Defining
//! them centrally keeps the eligibility rules checkable in one place.

/// Logical id of the nested stack resource injected into the patched template.
///
/// The back-references appended to each function's `Properties.Layers` address
/// the nested stack through this id, so it is reserved and must not collide
/// with user-defined resources.
pub const NESTED_STACK_LOGICAL_ID: &str = "AwsSamAutoDependencyLayerNestedStack";

/// File name of the serialized nested stack template, written under the
/// build directory.
pub const NESTED_TEMPLATE_FILE_NAME: &str = "nested_template.yaml";

/// Marker file written at the root of every generated layer folder.
///
/// The marker names the owning function so that a human inspecting the build
/// directory can tell where the folder came from.
pub const LAYER_README_FILE_NAME: &str = "LAYERLIFT_README";

/// Directory permissions for build output folders (Unix only).
pub const BUILD_DIR_PERMISSIONS: u32 = 0o755;

/// Resource types for which dependency layers can be created.
pub const SUPPORTED_RESOURCE_TYPES: [&str; 2] =
    ["AWS::Serverless::Function", "AWS::Lambda::Function"];

/// Resource type of the generated layer resources in the nested template.
pub const LAYER_VERSION_RESOURCE_TYPE: &str = "AWS::Serverless::LayerVersion";

/// Resource type of the nested stack reference inserted into the parent
/// template.
pub const SERVERLESS_APPLICATION_RESOURCE_TYPE: &str = "AWS::Serverless::Application";

/// Maximum number of characters of the function logical id kept when deriving
/// a layer logical id.
///
/// CloudFormation logical ids are capped at 255 alphanumeric characters; the
/// truncation leaves room for the `DepLayer` suffix while keeping derived ids
/// stable for realistic function names.
pub const LAYER_LOGICAL_ID_PREFIX_LENGTH: usize = 48;
