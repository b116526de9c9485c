//! # sdkgen Schema
//!
//! Package schema model, parser and pre-processing.
//!
//! This crate provides:
//! - JSON/YAML parsing of package schema documents
//! - Type token parsing
//! - Document validation
//! - The case-variant dedup pass
//! - Binding into a resolved model for code generation

pub mod bind;
pub mod dedup;
pub mod document;
pub mod error;
pub mod parser;
pub mod token;
pub mod types;
pub mod validation;

pub use bind::bind_package;
pub use dedup::{Diagnostic, Severity, dedup_case_variants};
pub use document::{
    AliasSpec, ComplexTypeSpec, ConfigSpec, DefaultInfoSpec, EnumValueSpec, FunctionSpec,
    ObjectTypeSpec, PackageSpec, PropertySpec, ResourceSpec, TypeSpec,
};
pub use error::{ParseError, SchemaError};
pub use parser::{parse_package_file, parse_package_spec};
pub use token::Token;
pub use types::{
    Alias, DefaultValue, EnumElement, EnumType, Function, ObjectType, ObjectTypeId, Package,
    Primitive, Property, Resource, SchemaType, TypeDef, input_properties,
};
pub use validation::validate_package;

/// Parses, deduplicates, validates and binds a package document.
///
/// Dedup findings are returned alongside the package; they never fail the
/// load.
///
/// # Errors
/// Returns `SchemaError` if the document cannot be parsed, fails validation,
/// or contains unresolvable references.
pub fn load_package(text: &str) -> Result<(Package, Vec<Diagnostic>), SchemaError> {
    let mut spec = parse_package_spec(text)?;
    let diagnostics = dedup_case_variants(&mut spec);
    validate_package(&spec)?;
    let package = bind_package(&spec)?;
    Ok((package, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_package_returns_diagnostics() {
        let (package, diagnostics) = load_package(
            r##"{
                "name": "pkg",
                "types": {
                    "pkg:index:Thing": {"properties": {"a": {"type": "string"}}},
                    "pkg:index:thing": {"properties": {"a": {"type": "string"}}}
                },
                "config": {"variables": {"thing": {"$ref": "#/types/pkg:index:thing"}}}
            }"##,
        )
        .expect("Failed to load");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(package.types.len(), 1);
        assert_eq!(
            package.config[0].type_,
            SchemaType::Object(ObjectTypeId::plain("pkg:index:Thing")).optional()
        );
    }
}
