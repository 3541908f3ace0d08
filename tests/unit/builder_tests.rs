//! Unit tests for the nested stack assembler.

use serde_json::json;
use std::path::Path;

use layerlift::NestedStackBuilder;

use crate::common::zip_function;

#[test]
fn starts_empty() {
    let builder = NestedStackBuilder::new();
    assert!(!builder.is_any_function_added());

    let template = builder.build_template();
    assert!(template.resources.is_empty());
    assert!(template.outputs.is_empty());
}

#[test]
fn layer_logical_id_is_deterministic() {
    assert_eq!(NestedStackBuilder::layer_logical_id("Fn1"), "Fn1DepLayer");
    assert_eq!(
        NestedStackBuilder::layer_logical_id("Fn1"),
        NestedStackBuilder::layer_logical_id("Fn1")
    );
}

#[test]
fn layer_logical_id_truncates_long_function_ids() {
    let long_id = "A".repeat(100);
    let layer_id = NestedStackBuilder::layer_logical_id(&long_id);
    assert_eq!(layer_id.len(), 48 + "DepLayer".len());
    assert!(layer_id.ends_with("DepLayer"));
}

#[test]
fn add_function_returns_the_output_key() {
    let mut builder = NestedStackBuilder::new();
    let function = zip_function("Fn1", "python3.11");

    let key = builder.add_function("my-stack", Path::new("/build/Fn1DepLayer"), &function);

    assert_eq!(key, "Fn1DepLayer");
    assert!(builder.is_any_function_added());

    let template = builder.build_template();
    assert!(template.outputs.contains_key(&key));
}

#[test]
fn accumulation_is_monotonic() {
    let mut builder = NestedStackBuilder::new();
    let functions = [
        zip_function("Api", "python3.11"),
        zip_function("Worker", "nodejs20.x"),
        zip_function("Indexer", "java17"),
    ];

    for function in &functions {
        builder.add_function("my-stack", Path::new("/build/layer"), function);
    }

    let template = builder.build_template();
    assert_eq!(template.resources.len(), 3);
    assert_eq!(template.outputs.len(), 3);
    for function in &functions {
        let layer_id = NestedStackBuilder::layer_logical_id(&function.logical_id);
        assert!(template.resources.contains_key(&layer_id));
        assert!(template.outputs.contains_key(&layer_id));
    }
}

#[test]
fn layer_resource_carries_content_and_runtime_metadata() {
    let mut builder = NestedStackBuilder::new();
    let function = zip_function("Fn1", "python3.11");

    let key = builder.add_function("my-stack", Path::new("/build/Fn1DepLayer"), &function);
    let template = builder.build_template();

    let layer = &template.resources[&key];
    assert_eq!(layer.resource_type, "AWS::Serverless::LayerVersion");
    assert_eq!(
        layer.properties.extra["ContentUri"],
        json!("/build/Fn1DepLayer")
    );
    assert_eq!(layer.properties.extra["RetentionPolicy"], json!("Delete"));
    assert_eq!(
        layer.properties.extra["CompatibleRuntimes"],
        json!(["python3.11"])
    );
    assert_eq!(
        layer.properties.extra["LayerName"],
        json!("my-stack-Fn1-DepLayer")
    );

    let output = &template.outputs[&key];
    assert_eq!(output.value, json!({ "Ref": key }));
}

#[test]
fn nested_template_carries_serverless_boilerplate() {
    let mut builder = NestedStackBuilder::new();
    builder.add_function(
        "my-stack",
        Path::new("/build/Fn1DepLayer"),
        &zip_function("Fn1", "python3.11"),
    );

    let template = builder.build_template();
    assert_eq!(template.format_version.as_deref(), Some("2010-09-09"));
    assert_eq!(
        template.transform,
        Some(json!("AWS::Serverless-2016-10-31"))
    );
}

#[test]
fn reference_resource_points_at_template_location() {
    let resource = NestedStackBuilder::nested_stack_reference_resource(Path::new(
        "/build/nested_template.yaml",
    ));

    assert_eq!(resource.resource_type, "AWS::Serverless::Application");
    assert_eq!(
        resource.properties.extra["Location"],
        json!("/build/nested_template.yaml")
    );
}

#[test]
fn build_template_is_a_repeatable_snapshot() {
    let mut builder = NestedStackBuilder::new();
    builder.add_function(
        "my-stack",
        Path::new("/build/Fn1DepLayer"),
        &zip_function("Fn1", "python3.11"),
    );

    assert_eq!(builder.build_template(), builder.build_template());
}
