//! Orchestrator for automatic dependency layer extraction
//!
//! [`NestedStackManager`] runs the whole pipeline in one deterministic pass:
//! filter the inventory, build a layer folder per qualifying function, feed
//! the assembler, patch the function's `Layers`, and finally inject the
//! nested stack reference into the patched template if anything qualified.
//! All mutation happens on a private copy of the input template; a run that
//! finds nothing to extract returns that copy unchanged.

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use crate::constants::{NESTED_STACK_LOGICAL_ID, NESTED_TEMPLATE_FILE_NAME};
use crate::layer::update_layer_folder;
use crate::models::{ApplicationBuildResult, Function, PackageType};
use crate::stack::builder::NestedStackBuilder;
use crate::stack::eligibility::{is_extractable_resource_type, is_function_supported};
use crate::template::{AttributeReference, Template, TemplateRelocator};
use crate::utils::fs::dir_has_entries;

/// Drives dependency layer extraction for one stack.
pub struct NestedStackManager<'a> {
    stack_name: &'a str,
    build_dir: &'a Path,
    stack_location: &'a Path,
    current_template: &'a Template,
    functions: &'a [Function],
    build_result: &'a ApplicationBuildResult,
}

impl<'a> NestedStackManager<'a> {
    /// Creates a manager for one extraction run.
    ///
    /// # Arguments
    ///
    /// * `stack_name` - Original stack name, used to derive layer names
    /// * `build_dir` - Build directory the layer folders and the nested
    ///   template file are created under
    /// * `stack_location` - Location of the original template, handed to the
    ///   relocator for resolving location-relative content
    /// * `current_template` - The template to patch; read-only, never mutated
    /// * `functions` - Function inventory resolved from the template by the
    ///   caller
    /// * `build_result` - Artifact set and build graph of the build session
    pub fn new(
        stack_name: &'a str,
        build_dir: &'a Path,
        stack_location: &'a Path,
        current_template: &'a Template,
        functions: &'a [Function],
        build_result: &'a ApplicationBuildResult,
    ) -> Self {
        Self {
            stack_name,
            build_dir,
            stack_location,
            current_template,
            functions,
            build_result,
        }
    }

    /// Runs extraction and returns the patched template.
    ///
    /// Iterates the inventory in order, restricted to archive-packaged
    /// functions of supported resource types. Each qualifying function gets
    /// its dependencies relocated into a layer folder, a layer resource and
    /// output registered in the nested sub-template, and a back-reference
    /// appended to its `Properties.Layers`. When at least one function
    /// qualified, the nested template is written under the build directory
    /// through `relocator` and the nested stack reference resource is
    /// inserted under [`NESTED_STACK_LOGICAL_ID`]; otherwise the unchanged
    /// copy of the input template is returned.
    ///
    /// # Errors
    ///
    /// Configuration errors (a qualifying function without a runtime) and
    /// filesystem or serialization failures propagate unchanged. Skip
    /// conditions never surface as errors.
    pub fn generate_auto_dependency_layer_stack(
        &self,
        relocator: &dyn TemplateRelocator,
    ) -> Result<Template> {
        let mut template = self.current_template.clone();
        let mut builder = NestedStackBuilder::new();

        let zip_functions = self.functions.iter().filter(|function| {
            function.package_type == PackageType::Zip
                && is_extractable_resource_type(&function.resource_type)
        });

        for function in zip_functions {
            if !is_function_supported(function, self.build_result) {
                continue;
            }

            let Some(dependencies_dir) = self
                .build_result
                .build_graph
                .dependencies_dir_for(&function.logical_id)
            else {
                debug!(
                    function = %function.logical_id,
                    "dependency folder can't be found, skipping dependency layer creation"
                );
                continue;
            };
            if !dir_has_entries(dependencies_dir)? {
                debug!(
                    function = %function.logical_id,
                    dependencies_dir = %dependencies_dir.display(),
                    "dependency folder is empty, skipping dependency layer creation"
                );
                continue;
            }

            template = self.add_layer(&mut builder, dependencies_dir, function, &template)?;
        }

        if !builder.is_any_function_added() {
            debug!("no function qualified for dependency layer creation");
            return Ok(template);
        }

        let nested_template_location = self.build_dir.join(NESTED_TEMPLATE_FILE_NAME);
        relocator.relocate(
            self.stack_location,
            &nested_template_location,
            &builder.build_template(),
        )?;

        Ok(template.with_resource(
            NESTED_STACK_LOGICAL_ID,
            NestedStackBuilder::nested_stack_reference_resource(&nested_template_location),
        ))
    }

    /// Builds one function's layer folder, registers it with the assembler,
    /// and returns the template with the back-reference appended.
    fn add_layer(
        &self,
        builder: &mut NestedStackBuilder,
        dependencies_dir: &Path,
        function: &Function,
        template: &Template,
    ) -> Result<Template> {
        let layer_logical_id = NestedStackBuilder::layer_logical_id(&function.logical_id);
        let layer_root = update_layer_folder(
            self.build_dir,
            dependencies_dir,
            &layer_logical_id,
            &function.logical_id,
            function.runtime.as_deref(),
        )?;

        let output_key = builder.add_function(self.stack_name, &layer_root, function);
        let layer_reference =
            AttributeReference::new(NESTED_STACK_LOGICAL_ID, format!("Outputs.{output_key}"));

        Ok(template.with_appended_layer(&function.logical_id, layer_reference.to_value())?)
    }
}
