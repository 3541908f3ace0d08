//! Typed template model and patch operations
//!
//! Infrastructure templates are nested key-value documents. Instead of
//! mutating a dynamic value tree in place, this module models the handful of
//! shapes layerlift actually touches as typed records and keeps everything
//! else flowing through untouched via flattened passthrough maps. Patch
//! operations return new template values; the caller's template is never
//! aliased or mutated.
//!
//! # Passthrough Fidelity
//!
//! Only two mutations ever happen to a template:
//!
//! 1. appending one entry to a function resource's `Properties.Layers`, and
//! 2. inserting one new top-level resource for the nested stack.
//!
//! Every other field of every other resource round-trips byte-for-byte
//! through the `extra` maps, which makes the "patched template is a
//! structural superset of the input" invariant straightforward to test with
//! plain equality.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::LayerliftError;
use crate::utils::fs::safe_write;

/// An infrastructure template: a `Resources` mapping plus optional
/// boilerplate, with unknown top-level sections preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// `AWSTemplateFormatVersion` header
    #[serde(
        rename = "AWSTemplateFormatVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub format_version: Option<String>,

    /// `Transform` header, either a single transform name or a list
    #[serde(rename = "Transform", skip_serializing_if = "Option::is_none")]
    pub transform: Option<Value>,

    /// Free-form template description
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Logical id to resource declaration mapping
    #[serde(rename = "Resources", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, Resource>,

    /// Logical id to output declaration mapping
    #[serde(rename = "Outputs", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,

    /// Unmodeled top-level sections (`Parameters`, `Conditions`, `Globals`,
    /// ...), passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Template {
    /// Returns a copy of this template with `layer_reference` appended to
    /// the `Properties.Layers` list of the given function resource.
    ///
    /// # Errors
    ///
    /// Fails with [`LayerliftError::FunctionResourceNotFound`] when the
    /// template holds no resource under `function_logical_id`, which means
    /// the resolved inventory and the template disagree.
    pub fn with_appended_layer(
        &self,
        function_logical_id: &str,
        layer_reference: Value,
    ) -> Result<Self, LayerliftError> {
        let mut patched = self.clone();
        let resource = patched.resources.get_mut(function_logical_id).ok_or_else(|| {
            LayerliftError::FunctionResourceNotFound {
                function: function_logical_id.to_string(),
            }
        })?;
        resource
            .properties
            .layers
            .get_or_insert_with(Vec::new)
            .push(layer_reference);
        Ok(patched)
    }

    /// Returns a copy of this template with `resource` inserted under
    /// `logical_id`, replacing any existing resource with that id.
    pub fn with_resource(&self, logical_id: impl Into<String>, resource: Resource) -> Self {
        let mut patched = self.clone();
        patched.resources.insert(logical_id.into(), resource);
        patched
    }
}

/// A single resource declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// CloudFormation resource type
    #[serde(rename = "Type")]
    pub resource_type: String,

    /// Resource properties
    #[serde(
        rename = "Properties",
        default,
        skip_serializing_if = "ResourceProperties::is_empty"
    )]
    pub properties: ResourceProperties,

    /// Unmodeled resource attributes (`DependsOn`, `Condition`, `Metadata`,
    /// ...), passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource {
    /// A resource of the given type with the given property map.
    pub fn new(resource_type: impl Into<String>, properties: ResourceProperties) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties,
            extra: Map::new(),
        }
    }
}

/// Properties of a resource.
///
/// `Layers` is the only property layerlift writes; all other properties pass
/// through the flattened map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceProperties {
    /// `Layers` list of a function resource
    #[serde(rename = "Layers", skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<Value>>,

    /// All remaining properties, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceProperties {
    /// A property map from `(key, value)` pairs, none of them modeled.
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            layers: None,
            extra: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.layers.is_none() && self.extra.is_empty()
    }
}

/// A single output declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// Free-form output description
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Output value, typically a `Ref` or `Fn::GetAtt` expression
    #[serde(rename = "Value")]
    pub value: Value,

    /// Unmodeled output fields (`Export`, ...), passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A `Fn::GetAtt` attribute reference against another resource.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeReference {
    /// Logical id of the referenced resource
    pub logical_id: String,
    /// Attribute path on the referenced resource, e.g. `Outputs.MyKey`
    pub attribute: String,
}

impl AttributeReference {
    /// A reference to `attribute` of the resource under `logical_id`.
    pub fn new(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            logical_id: logical_id.into(),
            attribute: attribute.into(),
        }
    }

    /// The `{"Fn::GetAtt": [logical_id, attribute]}` value form.
    pub fn to_value(&self) -> Value {
        json!({ "Fn::GetAtt": [self.logical_id, self.attribute] })
    }
}

/// A `Ref` expression value for the resource under `logical_id`.
pub fn reference(logical_id: &str) -> Value {
    json!({ "Ref": logical_id })
}

/// Seam for writing a template to its final on-disk location.
///
/// Moving a template can require rewriting relative paths it carries
/// (code URIs, nested locations) against the new file location. That
/// rewriting is a collaborator concern; implementations receive the original
/// stack location so they can resolve relative references against it.
pub trait TemplateRelocator {
    /// Writes `template` to `destination`, adjusting any location-relative
    /// content as needed.
    fn relocate(&self, source_location: &Path, destination: &Path, template: &Template)
    -> Result<()>;
}

/// Plain [`TemplateRelocator`] that serializes the template as YAML.
///
/// Suitable when the template carries only absolute paths, which holds for
/// the nested templates layerlift assembles (layer content URIs are emitted
/// as the layer folder paths the caller passed in).
pub struct YamlTemplateWriter;

impl TemplateRelocator for YamlTemplateWriter {
    fn relocate(
        &self,
        _source_location: &Path,
        destination: &Path,
        template: &Template,
    ) -> Result<()> {
        let rendered =
            serde_yaml::to_string(template).map_err(LayerliftError::TemplateSerialize)?;
        safe_write(destination, &rendered)
    }
}
