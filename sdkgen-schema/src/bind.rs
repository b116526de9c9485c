//! Binding of a [`PackageSpec`] into the resolved [`Package`] model.
//!
//! Binding resolves every `$ref` string into a [`SchemaType`], wraps
//! non-required properties in `Optional`, and sorts resources, functions and
//! properties so that downstream generation is deterministic.

use crate::document::{ComplexTypeSpec, ObjectTypeSpec, PackageSpec, PropertySpec, TypeSpec};
use crate::error::{ParseError, SchemaError};
use crate::token::Token;
use crate::types::{
    Alias, DefaultValue, EnumElement, EnumType, Function, ObjectType, ObjectTypeId, Package,
    Primitive, Property, Resource, SchemaType, TypeDef,
};
use std::collections::BTreeMap;

const TYPES_REF: &str = "#/types/";
const RESOURCES_REF: &str = "#/resources/";
const PROVIDER_REF: &str = "#/provider";
const BUILTIN_REF: &str = "pulumi.json#/";

/// Binds a parsed document into a resolved package.
///
/// # Errors
/// Returns `SchemaError` if a token is malformed, a reference cannot be
/// resolved, or a type spec is incomplete.
pub fn bind_package(spec: &PackageSpec) -> Result<Package, SchemaError> {
    let binder = Binder { spec };

    let mut package = Package::new(spec.name.clone());
    package.version = spec.version.clone();
    package.description = spec.description.clone();
    package.homepage = spec.homepage.clone();
    package.repository = spec.repository.clone();
    package.license = spec.license.clone();
    package.publisher = spec.publisher.clone();
    package.plugin_download_url = spec.plugin_download_url.clone();
    package.language = spec.language.clone();

    for (token, type_spec) in &spec.types {
        let def = binder.bind_type_def(token, type_spec)?;
        package.types.insert(token.clone(), def);
    }

    for (token, resource) in &spec.resources {
        Token::parse(token)?;
        package.resources.push(Resource {
            token: token.clone(),
            description: resource.object.description.clone(),
            properties: binder.bind_object_properties(token, &resource.object)?,
            input_properties: binder.bind_properties(
                token,
                &resource.input_properties,
                &resource.required_inputs,
            )?,
            state_inputs: resource
                .state_inputs
                .as_ref()
                .map(|state| binder.bind_object_properties(token, state))
                .transpose()?,
            aliases: resource
                .aliases
                .iter()
                .map(|a| Alias {
                    name: a.name.clone(),
                    project: a.project.clone(),
                    type_token: a.type_token.clone(),
                })
                .collect(),
            deprecation_message: resource.deprecation_message.clone(),
            is_component: resource.is_component,
            is_provider: false,
        });
    }

    if let Some(provider) = &spec.provider {
        let token = Token::provider_token(&spec.name);
        package.provider = Some(Resource {
            token: token.clone(),
            description: provider.object.description.clone(),
            properties: binder.bind_object_properties(&token, &provider.object)?,
            input_properties: binder.bind_properties(
                &token,
                &provider.input_properties,
                &provider.required_inputs,
            )?,
            state_inputs: None,
            aliases: Vec::new(),
            deprecation_message: provider.deprecation_message.clone(),
            is_component: false,
            is_provider: true,
        });
    }

    for (token, function) in &spec.functions {
        Token::parse(token)?;
        package.functions.push(Function {
            token: token.clone(),
            description: function.description.clone(),
            inputs: function
                .inputs
                .as_ref()
                .map(|inputs| binder.bind_object_properties(token, inputs))
                .transpose()?,
            outputs: function
                .outputs
                .as_ref()
                .map(|outputs| binder.bind_object_properties(token, outputs))
                .transpose()?,
            deprecation_message: function.deprecation_message.clone(),
        });
    }

    package.config =
        binder.bind_properties("config", &spec.config.variables, &spec.config.required)?;

    Ok(package)
}

struct Binder<'a> {
    spec: &'a PackageSpec,
}

impl Binder<'_> {
    fn bind_type_def(&self, token: &str, spec: &ComplexTypeSpec) -> Result<TypeDef, SchemaError> {
        Token::parse(token)?;

        if let Some(values) = &spec.enum_values {
            let element_type = spec
                .object
                .type_name
                .as_deref()
                .and_then(Primitive::from_type_name)
                .unwrap_or(Primitive::String);
            return Ok(TypeDef::Enum(EnumType {
                token: token.to_string(),
                description: spec.object.description.clone(),
                element_type,
                elements: values
                    .iter()
                    .map(|v| EnumElement {
                        name: v.name.clone(),
                        value: v.value.clone(),
                        description: v.description.clone(),
                        deprecation_message: v.deprecation_message.clone(),
                    })
                    .collect(),
            }));
        }

        match spec.object.type_name.as_deref() {
            None | Some("object") => Ok(TypeDef::Object(ObjectType {
                token: token.to_string(),
                description: spec.object.description.clone(),
                properties: self.bind_object_properties(token, &spec.object)?,
            })),
            Some(other) => {
                let underlying = Primitive::from_type_name(other).ok_or_else(|| {
                    ParseError::UnknownPrimitive {
                        name: other.to_string(),
                        context: token.to_string(),
                    }
                })?;
                Ok(TypeDef::Alias {
                    token: token.to_string(),
                    underlying: SchemaType::Primitive(underlying),
                })
            }
        }
    }

    fn bind_object_properties(
        &self,
        owner: &str,
        object: &ObjectTypeSpec,
    ) -> Result<Vec<Property>, SchemaError> {
        self.bind_properties(owner, &object.properties, &object.required)
    }

    fn bind_properties(
        &self,
        owner: &str,
        properties: &BTreeMap<String, PropertySpec>,
        required: &[String],
    ) -> Result<Vec<Property>, SchemaError> {
        for name in required {
            if !properties.contains_key(name) {
                return Err(SchemaError::MissingRequiredProperty {
                    owner: owner.to_string(),
                    property: name.clone(),
                });
            }
        }

        properties
            .iter()
            .map(|(name, spec)| {
                let context = format!("{owner}.{name}");
                let type_ = self.bind_type(&spec.type_spec, &context)?;
                let mut prop = Property::new(name.clone(), type_, required.contains(name));
                prop.language_name = java_name_override(spec);
                prop.secret = spec.secret;
                prop.plain = spec.type_spec.plain;
                prop.const_value = spec.const_value.clone();
                prop.description = spec.description.clone();
                prop.deprecation_message = spec.deprecation_message.clone();
                let environment = spec
                    .default_info
                    .as_ref()
                    .map(|info| info.environment.clone())
                    .unwrap_or_default();
                if spec.default.is_some() || !environment.is_empty() {
                    prop.default = Some(DefaultValue {
                        value: spec.default.clone(),
                        environment,
                    });
                }
                Ok(prop)
            })
            .collect()
    }

    fn bind_type(&self, spec: &TypeSpec, context: &str) -> Result<SchemaType, SchemaError> {
        if let Some(one_of) = &spec.one_of {
            let elements = one_of
                .iter()
                .map(|alt| self.bind_type(alt, context))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(SchemaType::Union(elements));
        }

        if let Some(reference) = &spec.reference {
            return self.bind_ref(reference, context);
        }

        let type_name = spec
            .type_name
            .as_deref()
            .ok_or_else(|| ParseError::MissingType {
                context: context.to_string(),
            })?;

        match type_name {
            "array" => {
                let items = spec.items.as_deref().ok_or_else(|| ParseError::MissingType {
                    context: format!("{context}.items"),
                })?;
                Ok(SchemaType::Array(Box::new(self.bind_type(items, context)?)))
            }
            "object" => {
                let element = match spec.additional_properties.as_deref() {
                    Some(additional) => self.bind_type(additional, context)?,
                    None => SchemaType::STRING,
                };
                Ok(SchemaType::Map(Box::new(element)))
            }
            other => Primitive::from_type_name(other)
                .map(SchemaType::Primitive)
                .ok_or_else(|| {
                    ParseError::UnknownPrimitive {
                        name: other.to_string(),
                        context: context.to_string(),
                    }
                    .into()
                }),
        }
    }

    fn bind_ref(&self, reference: &str, context: &str) -> Result<SchemaType, SchemaError> {
        if let Some(builtin) = reference.strip_prefix(BUILTIN_REF) {
            let primitive = match builtin {
                "Any" => Primitive::Any,
                "Archive" => Primitive::Archive,
                "Asset" => Primitive::Asset,
                "Json" => Primitive::Json,
                _ => return Err(ParseError::unsupported_ref(reference, context).into()),
            };
            return Ok(SchemaType::Primitive(primitive));
        }

        if reference == PROVIDER_REF {
            return Ok(SchemaType::ResourceRef {
                token: Token::provider_token(&self.spec.name),
            });
        }

        let (origin, fragment) = match reference.split_once('#') {
            Some((origin, fragment)) => (origin, format!("#{fragment}")),
            None => return Err(ParseError::unsupported_ref(reference, context).into()),
        };
        let foreign = !origin.is_empty();

        if let Some(token) = fragment.strip_prefix(TYPES_REF) {
            let token = unescape_token(token);
            Token::parse(&token)?;
            if foreign {
                return Ok(SchemaType::Object(ObjectTypeId::plain(token)));
            }
            return self.bind_local_type_ref(&token, context);
        }

        if let Some(token) = fragment.strip_prefix(RESOURCES_REF) {
            let token = unescape_token(token);
            Token::parse(&token)?;
            if !foreign && !self.spec.resources.contains_key(&token) {
                return Err(SchemaError::type_not_found(token, context));
            }
            return Ok(SchemaType::ResourceRef { token });
        }

        Err(ParseError::unsupported_ref(reference, context).into())
    }

    fn bind_local_type_ref(&self, token: &str, context: &str) -> Result<SchemaType, SchemaError> {
        let spec = self
            .spec
            .types
            .get(token)
            .ok_or_else(|| SchemaError::type_not_found(token, context))?;

        if spec.enum_values.is_some() {
            let element_type = spec
                .object
                .type_name
                .as_deref()
                .and_then(Primitive::from_type_name)
                .unwrap_or(Primitive::String);
            return Ok(SchemaType::Enum {
                token: token.to_string(),
                element_type,
            });
        }

        match spec.object.type_name.as_deref() {
            None | Some("object") => Ok(SchemaType::Object(ObjectTypeId::plain(token))),
            Some(other) => {
                let underlying = Primitive::from_type_name(other).ok_or_else(|| {
                    ParseError::UnknownPrimitive {
                        name: other.to_string(),
                        context: context.to_string(),
                    }
                })?;
                Ok(SchemaType::Token {
                    token: token.to_string(),
                    underlying: Box::new(SchemaType::Primitive(underlying)),
                })
            }
        }
    }
}

fn java_name_override(spec: &PropertySpec) -> Option<String> {
    spec.language
        .get("java")
        .and_then(|java| java.get("name"))
        .and_then(|name| name.as_str())
        .map(str::to_string)
}

fn unescape_token(token: &str) -> String {
    token.replace("%2F", "/").replace("%2f", "/")
}
