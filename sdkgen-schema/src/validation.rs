//! Schema validation utilities.
//!
//! This module provides validation functions for package documents to ensure
//! correctness and consistency before binding.

use crate::document::{ComplexTypeSpec, ObjectTypeSpec, PackageSpec};
use crate::error::SchemaError;
use crate::token::Token;
use std::collections::{BTreeMap, HashSet};

/// Validates a parsed document for correctness.
///
/// # Arguments
/// * `spec` - The document to validate
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_package(spec: &PackageSpec) -> Result<(), SchemaError> {
    if spec.name.is_empty() {
        return Err(SchemaError::validation("package name must not be empty"));
    }
    validate_types(spec)?;
    validate_resources(spec)?;
    validate_functions(spec)?;
    validate_required(
        "config",
        spec.config.variables.keys().map(String::as_str).collect(),
        &spec.config.required,
    )?;
    Ok(())
}

/// Validates all type definitions in the document.
fn validate_types(spec: &PackageSpec) -> Result<(), SchemaError> {
    for (token, type_spec) in &spec.types {
        validate_token(token)?;
        match &type_spec.enum_values {
            Some(_) => validate_enum(token, type_spec)?,
            None => validate_object(token, &type_spec.object)?,
        }
    }
    Ok(())
}

fn validate_resources(spec: &PackageSpec) -> Result<(), SchemaError> {
    for (token, resource) in &spec.resources {
        validate_token(token)?;
        validate_object(token, &resource.object)?;
        validate_required(
            token,
            resource.input_properties.keys().map(String::as_str).collect(),
            &resource.required_inputs,
        )?;
        if let Some(state) = &resource.state_inputs {
            validate_object(token, state)?;
        }
    }
    Ok(())
}

fn validate_functions(spec: &PackageSpec) -> Result<(), SchemaError> {
    for (token, function) in &spec.functions {
        validate_token(token)?;
        for object in function.inputs.iter().chain(function.outputs.iter()) {
            validate_object(token, object)?;
        }
    }
    Ok(())
}

fn validate_token(token: &str) -> Result<(), SchemaError> {
    Token::parse(token)?;
    Ok(())
}

/// Validates an object type definition.
fn validate_object(owner: &str, object: &ObjectTypeSpec) -> Result<(), SchemaError> {
    validate_required(
        owner,
        object.properties.keys().map(String::as_str).collect(),
        &object.required,
    )
}

fn validate_required(
    owner: &str,
    declared: HashSet<&str>,
    required: &[String],
) -> Result<(), SchemaError> {
    for name in required {
        if !declared.contains(name.as_str()) {
            return Err(SchemaError::MissingRequiredProperty {
                owner: owner.to_string(),
                property: name.clone(),
            });
        }
    }
    Ok(())
}

/// Validates an enum type definition.
fn validate_enum(token: &str, enum_def: &ComplexTypeSpec) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();
    let mut seen_values = BTreeMap::new();
    let values = enum_def.enum_values.as_deref().unwrap_or_default();

    if values.is_empty() {
        return Err(SchemaError::validation(format!(
            "Enum '{token}' declares no values"
        )));
    }

    for (index, value) in values.iter().enumerate() {
        if let Some(name) = &value.name
            && !seen_names.insert(name)
        {
            return Err(SchemaError::validation(format!(
                "Duplicate enum value name '{name}' in enum '{token}'"
            )));
        }

        let rendered = value.value.to_string();
        if let Some(previous) = seen_values.insert(rendered.clone(), index) {
            return Err(SchemaError::validation(format!(
                "Duplicate enum value {rendered} in enum '{token}' (elements {previous} and {index})"
            )));
        }

        let matches_type = match enum_def.object.type_name.as_deref() {
            Some("integer") => value.value.is_i64() || value.value.is_u64(),
            Some("number") => value.value.is_number(),
            Some("boolean") => value.value.is_boolean(),
            _ => value.value.is_string(),
        };
        if !matches_type {
            return Err(SchemaError::InvalidEnumValue {
                enum_name: token.to_string(),
                value: rendered,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_package_spec;

    fn validate(text: &str) -> Result<(), SchemaError> {
        let spec = parse_package_spec(text).expect("Failed to parse");
        validate_package(&spec)
    }

    #[test]
    fn test_valid_package() {
        let result = validate(
            r#"{
                "name": "pkg",
                "types": {
                    "pkg:index:Size": {"type": "integer", "enum": [{"value": 1}, {"value": 2}]}
                },
                "resources": {
                    "pkg:index:Widget": {
                        "inputProperties": {"name": {"type": "string"}},
                        "requiredInputs": ["name"]
                    }
                }
            }"#,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_duplicate_enum_value() {
        let result = validate(
            r#"{
                "name": "pkg",
                "types": {
                    "pkg:index:Color": {"type": "string", "enum": [{"value": "red"}, {"value": "red"}]}
                }
            }"#,
        );
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Duplicate enum value")
        );
    }

    #[test]
    fn test_duplicate_enum_name() {
        let result = validate(
            r#"{
                "name": "pkg",
                "types": {
                    "pkg:index:Color": {
                        "type": "string",
                        "enum": [{"name": "Red", "value": "red"}, {"name": "Red", "value": "RED"}]
                    }
                }
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_enum_value_type_mismatch() {
        let result = validate(
            r#"{
                "name": "pkg",
                "types": {"pkg:index:Size": {"type": "integer", "enum": [{"value": "big"}]}}
            }"#,
        );
        assert!(matches!(
            result.unwrap_err(),
            SchemaError::InvalidEnumValue { .. }
        ));
    }

    #[test]
    fn test_invalid_token() {
        let result = validate(r#"{"name": "pkg", "resources": {"Widget": {}}}"#);
        assert!(matches!(result.unwrap_err(), SchemaError::Parse(_)));
    }

    #[test]
    fn test_required_input_not_declared() {
        let result = validate(
            r#"{
                "name": "pkg",
                "resources": {"pkg:index:Widget": {"requiredInputs": ["name"]}}
            }"#,
        );
        assert!(matches!(
            result.unwrap_err(),
            SchemaError::MissingRequiredProperty { .. }
        ));
    }
}
