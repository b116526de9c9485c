//! Serialized package schema document.
//!
//! These are the raw, unresolved shapes of a package schema exactly as they
//! appear in JSON or YAML. References are still strings; see [`crate::bind`]
//! for the resolved model.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Complete package schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    /// Package name.
    pub name: String,
    /// Package version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Package description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Homepage URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Repository URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// License identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Publisher name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Where the provider plugin can be downloaded from.
    #[serde(
        default,
        rename = "pluginDownloadURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub plugin_download_url: Option<String>,
    /// Package configuration variables.
    #[serde(default, skip_serializing_if = "ConfigSpec::is_empty")]
    pub config: ConfigSpec,
    /// Named complex types (objects and enums), keyed by token.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub types: BTreeMap<String, ComplexTypeSpec>,
    /// Provider resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ResourceSpec>,
    /// Resources, keyed by token.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, ResourceSpec>,
    /// Invoke functions, keyed by token.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub functions: BTreeMap<String, FunctionSpec>,
    /// Language-specific extension blocks, keyed by language name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub language: BTreeMap<String, JsonValue>,
}

/// Package configuration section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSpec {
    /// Configuration variables by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, PropertySpec>,
    /// Names of required variables.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl ConfigSpec {
    /// Returns true if no configuration is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.required.is_empty()
    }
}

/// A reference to a type, or an inline type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeSpec {
    /// Primitive or structural type name.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Reference to a named type.
    #[serde(default, rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Element type of an array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<TypeSpec>>,
    /// Element type of a map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<TypeSpec>>,
    /// Union alternatives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<TypeSpec>>,
    /// Whether the value is never wrapped in an input.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub plain: bool,
}

/// Environment-sourced default information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultInfoSpec {
    /// Environment variables consulted in priority order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<String>,
}

/// A property of an object, resource, function or config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySpec {
    /// The property type.
    #[serde(flatten)]
    pub type_spec: TypeSpec,
    /// Property description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Constant value, if the property is fixed.
    #[serde(default, rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_value: Option<JsonValue>,
    /// Literal default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    /// Non-literal default information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_info: Option<DefaultInfoSpec>,
    /// Deprecation message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    /// Whether the value is secret.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub secret: bool,
    /// Language-specific overrides.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub language: BTreeMap<String, JsonValue>,
}

/// An object type specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectTypeSpec {
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Underlying type (`object`, or a primitive for enums and aliases).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Properties by wire name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertySpec>,
    /// Names of required properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// An enum element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueSpec {
    /// Element name; derived from the value when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Element value.
    pub value: JsonValue,
    /// Deprecation message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
}

/// A named complex type: object, enum or token alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexTypeSpec {
    /// Object part.
    #[serde(flatten)]
    pub object: ObjectTypeSpec,
    /// Enum elements; present only for enums.
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<EnumValueSpec>>,
}

/// A resource alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AliasSpec {
    /// Previous name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Previous project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Previous type token.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_token: Option<String>,
}

/// A resource specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    /// Output properties.
    #[serde(flatten)]
    pub object: ObjectTypeSpec,
    /// Input properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub input_properties: BTreeMap<String, PropertySpec>,
    /// Names of required input properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_inputs: Vec<String>,
    /// State inputs used to look up existing resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_inputs: Option<ObjectTypeSpec>,
    /// Previous identities of the resource.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<AliasSpec>,
    /// Deprecation message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
    /// Whether this is a component resource.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_component: bool,
}

/// An invoke function specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSpec {
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Input arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<ObjectTypeSpec>,
    /// Result object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<ObjectTypeSpec>,
    /// Deprecation message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
}

impl PackageSpec {
    /// Visits every [`TypeSpec`] in the document, including nested element
    /// and union types.
    pub fn visit_type_specs_mut(&mut self, visit: &mut impl FnMut(&mut TypeSpec)) {
        for prop in self.config.variables.values_mut() {
            walk_type_spec(&mut prop.type_spec, visit);
        }
        for spec in self.types.values_mut() {
            walk_properties(&mut spec.object.properties, visit);
        }
        if let Some(provider) = self.provider.as_mut() {
            walk_resource(provider, visit);
        }
        for resource in self.resources.values_mut() {
            walk_resource(resource, visit);
        }
        for function in self.functions.values_mut() {
            if let Some(inputs) = function.inputs.as_mut() {
                walk_properties(&mut inputs.properties, visit);
            }
            if let Some(outputs) = function.outputs.as_mut() {
                walk_properties(&mut outputs.properties, visit);
            }
        }
    }
}

fn walk_resource(resource: &mut ResourceSpec, visit: &mut impl FnMut(&mut TypeSpec)) {
    walk_properties(&mut resource.object.properties, visit);
    walk_properties(&mut resource.input_properties, visit);
    if let Some(state) = resource.state_inputs.as_mut() {
        walk_properties(&mut state.properties, visit);
    }
}

fn walk_properties(
    properties: &mut BTreeMap<String, PropertySpec>,
    visit: &mut impl FnMut(&mut TypeSpec),
) {
    for prop in properties.values_mut() {
        walk_type_spec(&mut prop.type_spec, visit);
    }
}

fn walk_type_spec(spec: &mut TypeSpec, visit: &mut impl FnMut(&mut TypeSpec)) {
    visit(spec);
    if let Some(items) = spec.items.as_mut() {
        walk_type_spec(items, visit);
    }
    if let Some(additional) = spec.additional_properties.as_mut() {
        walk_type_spec(additional, visit);
    }
    if let Some(one_of) = spec.one_of.as_mut() {
        for alternative in one_of {
            walk_type_spec(alternative, visit);
        }
    }
}
