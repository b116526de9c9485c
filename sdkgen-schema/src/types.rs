//! Resolved schema model.
//!
//! This module contains the bound representation of a package: every type
//! reference is resolved to a [`SchemaType`], and named object types are
//! addressed through stable [`ObjectTypeId`] keys into [`Package::types`]
//! rather than by identity.

use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Built-in primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    /// Boolean.
    Bool,
    /// Integer.
    Int,
    /// Floating point number.
    Number,
    /// String.
    String,
    /// Arbitrary JSON.
    Json,
    /// Any value.
    Any,
    /// Asset or archive.
    Asset,
    /// Archive.
    Archive,
}

impl Primitive {
    /// Parses a primitive from its schema type name.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(Self::Bool),
            "integer" => Some(Self::Int),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            _ => None,
        }
    }

    /// Returns the schema type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Json => "pulumi.json#/Json",
            Self::Any => "pulumi.json#/Any",
            Self::Asset => "pulumi.json#/Asset",
            Self::Archive => "pulumi.json#/Archive",
        }
    }
}

/// Stable key of a named object type in one of its two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectTypeId {
    /// Type token.
    pub token: String,
    /// True for the input shape (properties wrapped in inputs).
    pub input_shape: bool,
}

impl ObjectTypeId {
    /// Creates a key for the plain shape of a token.
    #[must_use]
    pub fn plain(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            input_shape: false,
        }
    }

    /// Returns the same token in the requested shape.
    #[must_use]
    pub fn with_input_shape(&self, input_shape: bool) -> Self {
        Self {
            token: self.token.clone(),
            input_shape,
        }
    }
}

/// A resolved schema type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaType {
    /// Built-in primitive.
    Primitive(Primitive),
    /// Array of elements.
    Array(Box<SchemaType>),
    /// String-keyed map of elements.
    Map(Box<SchemaType>),
    /// Named object type.
    Object(ObjectTypeId),
    /// Named enum type.
    Enum {
        /// Enum token.
        token: String,
        /// Primitive type of the element values.
        element_type: Primitive,
    },
    /// Reference to a resource.
    ResourceRef {
        /// Resource token.
        token: String,
    },
    /// Named alias of another type.
    Token {
        /// Alias token.
        token: String,
        /// Aliased type.
        underlying: Box<SchemaType>,
    },
    /// One of several alternatives.
    Union(Vec<SchemaType>),
    /// A value that may be absent.
    Optional(Box<SchemaType>),
    /// A value that may be computed at deploy time.
    Input(Box<SchemaType>),
}

impl SchemaType {
    /// Shorthand for a primitive string.
    pub const STRING: Self = Self::Primitive(Primitive::String);

    /// Wraps a type in `Optional` unless it is already optional.
    #[must_use]
    pub fn optional(self) -> Self {
        match self {
            Self::Optional(_) => self,
            other => Self::Optional(Box::new(other)),
        }
    }

    /// Returns the input shape of this type: every level that a caller may
    /// supply lazily is wrapped in `Input`, and object references point at
    /// their input shape.
    #[must_use]
    pub fn input_shape(&self) -> Self {
        match self {
            Self::Optional(inner) => Self::Optional(Box::new(inner.input_shape())),
            Self::Input(_) => self.clone(),
            other => Self::Input(Box::new(other.input_element())),
        }
    }

    fn input_element(&self) -> Self {
        match self {
            Self::Array(elem) => Self::Array(Box::new(elem.input_shape())),
            Self::Map(elem) => Self::Map(Box::new(elem.input_shape())),
            Self::Object(id) => Self::Object(id.with_input_shape(true)),
            Self::Union(elements) => {
                Self::Union(elements.iter().map(Self::input_element).collect())
            }
            other => other.clone(),
        }
    }

    /// Returns the plain shape of this type, dropping every `Input` and
    /// pointing object references at their plain shape.
    #[must_use]
    pub fn plain_shape(&self) -> Self {
        match self {
            Self::Input(inner) => inner.plain_shape(),
            Self::Optional(inner) => Self::Optional(Box::new(inner.plain_shape())),
            Self::Array(elem) => Self::Array(Box::new(elem.plain_shape())),
            Self::Map(elem) => Self::Map(Box::new(elem.plain_shape())),
            Self::Object(id) => Self::Object(id.with_input_shape(false)),
            Self::Union(elements) => Self::Union(elements.iter().map(Self::plain_shape).collect()),
            other => other.clone(),
        }
    }
}

/// Default value declaration of a property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultValue {
    /// Literal default.
    pub value: Option<JsonValue>,
    /// Environment variables consulted in priority order.
    pub environment: Vec<String>,
}

/// A bound property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Wire name.
    pub name: String,
    /// Language-specific identifier override.
    pub language_name: Option<String>,
    /// Plain type; wrapped in `Optional` when not required.
    pub type_: SchemaType,
    /// Whether the property must be supplied.
    pub required: bool,
    /// Whether the value is secret.
    pub secret: bool,
    /// Whether the value is never wrapped in an input.
    pub plain: bool,
    /// Default value declaration.
    pub default: Option<DefaultValue>,
    /// Constant value.
    pub const_value: Option<JsonValue>,
    /// Description.
    pub description: Option<String>,
    /// Deprecation message.
    pub deprecation_message: Option<String>,
}

impl Property {
    /// Creates a property with the given wire name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, type_: SchemaType, required: bool) -> Self {
        let type_ = if required { type_ } else { type_.optional() };
        Self {
            name: name.into(),
            language_name: None,
            type_,
            required,
            secret: false,
            plain: false,
            default: None,
            const_value: None,
            description: None,
            deprecation_message: None,
        }
    }

    /// Returns the property type in its input shape.
    #[must_use]
    pub fn input_type(&self) -> SchemaType {
        if self.plain {
            self.type_.clone()
        } else {
            self.type_.input_shape()
        }
    }

    /// Returns true if a default value is declared.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// A named object type.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    /// Type token.
    pub token: String,
    /// Description.
    pub description: Option<String>,
    /// Properties sorted by wire name.
    pub properties: Vec<Property>,
}

impl ObjectType {
    /// Returns the properties in the requested shape.
    #[must_use]
    pub fn properties_for(&self, input_shape: bool) -> Vec<Property> {
        if input_shape {
            input_properties(&self.properties)
        } else {
            self.properties.clone()
        }
    }
}

/// Returns `properties` with every type in its input shape.
#[must_use]
pub fn input_properties(properties: &[Property]) -> Vec<Property> {
    properties
        .iter()
        .map(|p| Property {
            type_: p.input_type(),
            ..p.clone()
        })
        .collect()
}

/// An enum element.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumElement {
    /// Declared name.
    pub name: Option<String>,
    /// Element value.
    pub value: JsonValue,
    /// Description.
    pub description: Option<String>,
    /// Deprecation message.
    pub deprecation_message: Option<String>,
}

/// A named enum type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    /// Type token.
    pub token: String,
    /// Description.
    pub description: Option<String>,
    /// Primitive type of the values.
    pub element_type: Primitive,
    /// Elements in declaration order.
    pub elements: Vec<EnumElement>,
}

/// A named type definition.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    /// Object type.
    Object(ObjectType),
    /// Enum type.
    Enum(EnumType),
    /// Alias of another type.
    Alias {
        /// Alias token.
        token: String,
        /// Aliased type.
        underlying: SchemaType,
    },
}

impl TypeDef {
    /// Returns the token of the type.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Object(o) => &o.token,
            Self::Enum(e) => &e.token,
            Self::Alias { token, .. } => token,
        }
    }
}

/// A resource alias.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alias {
    /// Previous name.
    pub name: Option<String>,
    /// Previous project.
    pub project: Option<String>,
    /// Previous type token.
    pub type_token: Option<String>,
}

/// A bound resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Resource token.
    pub token: String,
    /// Description.
    pub description: Option<String>,
    /// Output properties.
    pub properties: Vec<Property>,
    /// Input properties, plain shape.
    pub input_properties: Vec<Property>,
    /// State inputs for looking up existing resources.
    pub state_inputs: Option<Vec<Property>>,
    /// Previous identities.
    pub aliases: Vec<Alias>,
    /// Deprecation message.
    pub deprecation_message: Option<String>,
    /// Whether this is a component resource.
    pub is_component: bool,
    /// Whether this is the package provider.
    pub is_provider: bool,
}

/// A bound invoke function.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function token.
    pub token: String,
    /// Description.
    pub description: Option<String>,
    /// Input arguments, plain shape.
    pub inputs: Option<Vec<Property>>,
    /// Result properties.
    pub outputs: Option<Vec<Property>>,
    /// Deprecation message.
    pub deprecation_message: Option<String>,
}

/// A bound package.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Repository URL.
    pub repository: Option<String>,
    /// License identifier.
    pub license: Option<String>,
    /// Publisher.
    pub publisher: Option<String>,
    /// Plugin download URL.
    pub plugin_download_url: Option<String>,
    /// Named types by token.
    pub types: BTreeMap<String, TypeDef>,
    /// Resources sorted by token.
    pub resources: Vec<Resource>,
    /// Functions sorted by token.
    pub functions: Vec<Function>,
    /// Configuration variables sorted by name.
    pub config: Vec<Property>,
    /// Provider resource.
    pub provider: Option<Resource>,
    /// Language-specific extension blocks.
    pub language: BTreeMap<String, JsonValue>,
}

impl Package {
    /// Creates an empty package.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            description: None,
            homepage: None,
            repository: None,
            license: None,
            publisher: None,
            plugin_download_url: None,
            types: BTreeMap::new(),
            resources: Vec::new(),
            functions: Vec::new(),
            config: Vec::new(),
            provider: None,
            language: BTreeMap::new(),
        }
    }

    /// Looks up an object type by key.
    #[must_use]
    pub fn object(&self, id: &ObjectTypeId) -> Option<&ObjectType> {
        match self.types.get(&id.token) {
            Some(TypeDef::Object(o)) => Some(o),
            _ => None,
        }
    }

    /// Looks up an enum type by token.
    #[must_use]
    pub fn enum_type(&self, token: &str) -> Option<&EnumType> {
        match self.types.get(token) {
            Some(TypeDef::Enum(e)) => Some(e),
            _ => None,
        }
    }

    /// Returns true if the token belongs to this package.
    #[must_use]
    pub fn owns(&self, token: &str) -> bool {
        token
            .split(':')
            .next()
            .is_some_and(|package| package == self.name)
    }
}
