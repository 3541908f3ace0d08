//! Unit tests for the typed template model and its patch operations.

use anyhow::Result;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

use layerlift::core::LayerliftError;
use layerlift::template::{
    AttributeReference, Template, TemplateRelocator, YamlTemplateWriter, reference,
};

use crate::common::function_template;

#[test]
fn appending_a_layer_leaves_the_input_untouched() -> Result<()> {
    let template = function_template(&[("Fn1", "python3.11")]);
    let before = template.clone();

    let patched = template.with_appended_layer("Fn1", reference("SomeLayer"))?;

    assert_eq!(template, before);
    let layers = patched.resources["Fn1"].properties.layers.as_ref().unwrap();
    assert_eq!(layers.as_slice(), [reference("SomeLayer")]);
    Ok(())
}

#[test]
fn appending_preserves_existing_layers() -> Result<()> {
    let template: Template = serde_json::from_value(json!({
        "Resources": {
            "Fn1": {
                "Type": "AWS::Serverless::Function",
                "Properties": {
                    "Runtime": "python3.11",
                    "Layers": [{ "Ref": "UserLayer" }],
                },
            },
        },
    }))?;

    let patched = template.with_appended_layer("Fn1", reference("GeneratedLayer"))?;

    let layers = patched.resources["Fn1"].properties.layers.as_ref().unwrap();
    assert_eq!(
        layers.as_slice(),
        [reference("UserLayer"), reference("GeneratedLayer")]
    );
    Ok(())
}

#[test]
fn appending_to_a_missing_function_fails() {
    let template = function_template(&[("Fn1", "python3.11")]);

    let error = template
        .with_appended_layer("Ghost", reference("SomeLayer"))
        .expect_err("inventory and template disagree");

    assert!(matches!(
        error,
        LayerliftError::FunctionResourceNotFound { ref function } if function == "Ghost"
    ));
}

#[test]
fn unmodeled_fields_pass_through_patching() -> Result<()> {
    let template: Template = serde_json::from_value(json!({
        "AWSTemplateFormatVersion": "2010-09-09",
        "Parameters": { "Stage": { "Type": "String", "Default": "dev" } },
        "Conditions": { "IsProd": { "Fn::Equals": [{ "Ref": "Stage" }, "prod"] } },
        "Globals": { "Function": { "Timeout": 10 } },
        "Resources": {
            "Fn1": {
                "Type": "AWS::Serverless::Function",
                "Condition": "IsProd",
                "DependsOn": ["Table"],
                "Metadata": { "BuildMethod": "makefile" },
                "Properties": {
                    "Runtime": "python3.11",
                    "Environment": { "Variables": { "TABLE": { "Ref": "Table" } } },
                },
            },
            "Table": { "Type": "AWS::DynamoDB::Table", "Properties": { "BillingMode": "PAY_PER_REQUEST" } },
        },
        "Outputs": {
            "Endpoint": { "Description": "API endpoint", "Value": { "Fn::GetAtt": ["Fn1", "Arn"] } },
        },
    }))?;

    let patched = template.with_appended_layer("Fn1", reference("SomeLayer"))?;

    // Unrelated resources and sections are content-identical.
    assert_eq!(patched.resources["Table"], template.resources["Table"]);
    assert_eq!(patched.extra, template.extra);
    assert_eq!(patched.outputs, template.outputs);

    // The patched function keeps everything except the appended Layers list.
    let function = &patched.resources["Fn1"];
    assert_eq!(function.extra["Condition"], json!("IsProd"));
    assert_eq!(function.extra["DependsOn"], json!(["Table"]));
    assert_eq!(
        function.properties.extra["Environment"],
        template.resources["Fn1"].properties.extra["Environment"]
    );
    Ok(())
}

#[test]
fn attribute_reference_serializes_to_getatt() {
    let layer_ref = AttributeReference::new("NestedStack", "Outputs.Fn1DepLayer");
    assert_eq!(
        layer_ref.to_value(),
        json!({ "Fn::GetAtt": ["NestedStack", "Outputs.Fn1DepLayer"] })
    );
}

#[test]
fn with_resource_adds_exactly_one_top_level_key() {
    let template = function_template(&[("Fn1", "python3.11")]);
    let resource = layerlift::NestedStackBuilder::nested_stack_reference_resource(Path::new(
        "/build/nested_template.yaml",
    ));

    let patched = template.with_resource("NestedStack", resource);

    assert_eq!(patched.resources.len(), template.resources.len() + 1);
    assert!(patched.resources.contains_key("NestedStack"));
}

#[test]
fn yaml_writer_round_trips_the_template() -> Result<()> {
    let temp = TempDir::new()?;
    let destination = temp.path().join("nested_template.yaml");
    let template = function_template(&[("Fn1", "python3.11")]);

    YamlTemplateWriter.relocate(Path::new("template.yaml"), &destination, &template)?;

    let written = std::fs::read_to_string(&destination)?;
    let parsed: Template = serde_yaml::from_str(&written)?;
    assert_eq!(parsed, template);
    Ok(())
}
