//! Unit tests for the eligibility predicates.

use std::path::Path;

use layerlift::models::ApplicationBuildResult;
use layerlift::stack::eligibility::{
    is_extractable_resource_type, is_function_built, is_function_supported,
};

use crate::common::{build_result_for, zip_function};

#[test]
fn only_function_resource_types_are_extractable() {
    assert!(is_extractable_resource_type("AWS::Serverless::Function"));
    assert!(is_extractable_resource_type("AWS::Lambda::Function"));
    assert!(!is_extractable_resource_type("AWS::Serverless::Api"));
    assert!(!is_extractable_resource_type("AWS::S3::Bucket"));
    assert!(!is_extractable_resource_type(""));
}

#[test]
fn built_membership_is_keyed_by_logical_id() {
    let function = zip_function("Fn1", "python3.11");
    let build_result = build_result_for("Fn1", Path::new("/build/Fn1"), None);

    assert!(is_function_built(&function, &build_result.artifacts));

    let other = zip_function("Fn2", "python3.11");
    assert!(!is_function_built(&other, &build_result.artifacts));
}

#[test]
fn unbuilt_function_is_not_supported() {
    let function = zip_function("Fn1", "python3.11");
    let empty = ApplicationBuildResult::default();

    assert!(!is_function_supported(&function, &empty));
}

#[test]
fn unsupported_runtime_family_is_not_supported() {
    let function = zip_function("Fn1", "ruby3.2");
    let build_result = build_result_for("Fn1", Path::new("/build/Fn1"), None);

    assert!(!is_function_supported(&function, &build_result));
}

#[test]
fn missing_runtime_is_not_supported() {
    let mut function = zip_function("Fn1", "python3.11");
    function.runtime = None;
    let build_result = build_result_for("Fn1", Path::new("/build/Fn1"), None);

    assert!(!is_function_supported(&function, &build_result));
}

#[test]
fn built_function_on_supported_runtime_is_supported() {
    for runtime in ["python3.11", "nodejs20.x", "java17"] {
        let function = zip_function("Fn1", runtime);
        let build_result = build_result_for("Fn1", Path::new("/build/Fn1"), None);
        assert!(
            is_function_supported(&function, &build_result),
            "expected {runtime} to be supported"
        );
    }
}
