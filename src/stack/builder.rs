//! Nested stack assembler
//!
//! [`NestedStackBuilder`] accumulates one layer resource and one matching
//! output per qualifying function. Accumulation is monotonic: entries are
//! appended, never removed, and emptiness is derived from the entry count.
//! Serialization via [`NestedStackBuilder::build_template`] is side-effect
//! free and reflects whatever has been accumulated so far.

use serde_json::json;
use std::path::Path;

use crate::constants::{
    LAYER_LOGICAL_ID_PREFIX_LENGTH, LAYER_VERSION_RESOURCE_TYPE,
    SERVERLESS_APPLICATION_RESOURCE_TYPE,
};
use crate::models::Function;
use crate::template::{Output, Resource, ResourceProperties, Template, reference};

/// One accumulated layer: the resource and the output exporting its
/// reference, both keyed by the layer logical id.
struct LayerEntry {
    logical_id: String,
    resource: Resource,
    output: Output,
}

/// Accumulates the nested sub-template, one call per qualifying function.
#[derive(Default)]
pub struct NestedStackBuilder {
    layers: Vec<LayerEntry>,
}

impl NestedStackBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer logical id derived deterministically from the owning function's
    /// logical id.
    ///
    /// Function ids are truncated before the suffix so the derived id stays
    /// inside CloudFormation's logical id length limit. Distinct function ids
    /// of realistic length yield distinct layer ids.
    pub fn layer_logical_id(function_logical_id: &str) -> String {
        let prefix: String = function_logical_id
            .chars()
            .take(LAYER_LOGICAL_ID_PREFIX_LENGTH)
            .collect();
        format!("{prefix}DepLayer")
    }

    /// Human-readable layer name shown in the deployed stack.
    pub fn layer_name(stack_name: &str, function_logical_id: &str) -> String {
        format!("{stack_name}-{function_logical_id}-DepLayer")
    }

    /// Registers a layer resource and output for `function`, whose layer
    /// contents live at `layer_root`, and returns the output key the caller
    /// wires the back-reference through.
    ///
    /// Append-only: calling this twice for the same function records two
    /// entries. The orchestrator's single pass over the inventory guarantees
    /// at most one call per function per run.
    pub fn add_function(
        &mut self,
        stack_name: &str,
        layer_root: &Path,
        function: &Function,
    ) -> String {
        let logical_id = Self::layer_logical_id(&function.logical_id);
        let compatible_runtimes: Vec<&str> = function.runtime.as_deref().into_iter().collect();

        let resource = Resource::new(
            LAYER_VERSION_RESOURCE_TYPE,
            ResourceProperties::from_entries([
                (
                    "LayerName",
                    json!(Self::layer_name(stack_name, &function.logical_id)),
                ),
                (
                    "Description",
                    json!(format!(
                        "Auto created layer for dependencies of function {}",
                        function.logical_id
                    )),
                ),
                ("ContentUri", json!(layer_root.display().to_string())),
                ("RetentionPolicy", json!("Delete")),
                ("CompatibleRuntimes", json!(compatible_runtimes)),
            ]),
        );
        let output = Output {
            description: Some(format!(
                "Dependency layer of function {}",
                function.logical_id
            )),
            value: reference(&logical_id),
            extra: serde_json::Map::new(),
        };

        self.layers.push(LayerEntry {
            logical_id: logical_id.clone(),
            resource,
            output,
        });
        logical_id
    }

    /// Whether at least one function has been registered.
    pub fn is_any_function_added(&self) -> bool {
        !self.layers.is_empty()
    }

    /// Snapshot of the accumulated nested sub-template.
    pub fn build_template(&self) -> Template {
        let mut template = Template {
            format_version: Some("2010-09-09".to_string()),
            transform: Some(json!("AWS::Serverless-2016-10-31")),
            description: Some(
                "Auto created template which contains generated dependency layers".to_string(),
            ),
            ..Template::default()
        };
        for entry in &self.layers {
            template
                .resources
                .insert(entry.logical_id.clone(), entry.resource.clone());
            template
                .outputs
                .insert(entry.logical_id.clone(), entry.output.clone());
        }
        template
    }

    /// The resource declaration that embeds the nested template into the
    /// parent stack, pointing at its written file location.
    pub fn nested_stack_reference_resource(template_location: &Path) -> Resource {
        Resource::new(
            SERVERLESS_APPLICATION_RESOURCE_TYPE,
            ResourceProperties::from_entries([(
                "Location",
                json!(template_location.display().to_string()),
            )]),
        )
    }
}
