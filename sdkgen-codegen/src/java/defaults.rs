//! Default-value and config resolution expressions.
//!
//! Produces `Codegen.xProp(..)` chains that resolve a property value from an
//! explicit argument or a config object, falling back to environment
//! variables and schema defaults.

use super::enums::element_identifiers;
use super::file::JavaFile;
use crate::error::CodegenError;
use crate::names::{known, string_literal};
use crate::shape::TypeShape;
use sdkgen_schema::Property;
use serde_json::Value as JsonValue;

/// Where a resolved value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource<'s> {
    /// A constructor parameter of this name.
    Arg(&'s str),
    /// The config object held in this variable.
    Config(&'s str),
}

/// Renders the expression resolving `property` into `target`.
///
/// # Errors
/// Returns `CodegenError::DefaultValue` if the schema default does not fit
/// the target type, `CodegenError::UnknownEnumDefault` if an enum default
/// names no element, and `CodegenError::EitherDefault` if a default fits
/// neither branch of an `Either`.
pub fn value_expr(
    file: &mut JavaFile<'_>,
    property: &Property,
    target: &TypeShape,
    source: ValueSource<'_>,
) -> Result<String, CodegenError> {
    if let (ValueSource::Arg(param), None) = (source, &property.default) {
        if !property.required {
            return Ok(param.to_string());
        }
        let objects = file.reference(&known::objects())?;
        return Ok(format!(
            "{objects}.requireNonNull({param}, {})",
            string_literal(&format!("expected parameter '{param}' to be non-null"))
        ));
    }

    let (_, value) = target.un_nullable();
    let (_, value) = value.un_optional();
    let (wrapped, value) = value.un_output();
    let value = value.without_annotations();

    let literal = match property.default.as_ref().and_then(|d| d.value.as_ref()) {
        Some(literal) => Some(resolve_default(file, &property.name, &value, literal)?),
        None => None,
    };
    let accessed = literal.as_ref().map_or(&value, |(branch, _)| branch);

    let mut expr = accessor(file, &property.name, accessed)?;
    if wrapped {
        expr.push_str(if property.secret { ".secret()" } else { ".output()" });
    }
    match source {
        ValueSource::Arg(param) => expr.push_str(&format!(".arg({param})")),
        ValueSource::Config(config) => expr.push_str(&format!(".config({config})")),
    }
    if let Some(default) = property.default.as_ref().filter(|d| !d.environment.is_empty()) {
        let vars: Vec<String> = default
            .environment
            .iter()
            .map(String::as_str)
            .map(string_literal)
            .collect();
        expr.push_str(&format!(".env({})", vars.join(", ")));
    }
    if let Some((_, literal)) = literal {
        expr.push_str(&format!(".def({literal})"));
    }
    expr.push_str(match (source, property.required) {
        (_, true) => ".require()",
        (ValueSource::Arg(_), false) => ".getNullable()",
        (ValueSource::Config(_), false) => ".get()",
    });
    Ok(expr)
}

fn accessor(
    file: &mut JavaFile<'_>,
    wire_name: &str,
    value: &TypeShape,
) -> Result<String, CodegenError> {
    let codegen = file.reference(&known::codegen())?;
    let name = string_literal(wire_name);
    let kind = if value.is(&known::boolean()) {
        "booleanProp"
    } else if value.is(&known::integer()) {
        "integerProp"
    } else if value.is(&known::double()) {
        "doubleProp"
    } else if value.is(&known::string()) {
        "stringProp"
    } else {
        let descriptor = file.descriptor(value)?;
        return Ok(format!("{codegen}.objectProp({name}, {descriptor})"));
    };
    Ok(format!("{codegen}.{kind}({name})"))
}

/// Renders a schema default as a literal of type `value`.
///
/// `Either` targets try the left branch first and only then the right one.
///
/// # Errors
/// See [`value_expr`].
pub fn default_literal(
    file: &mut JavaFile<'_>,
    property: &str,
    value: &TypeShape,
    default: &JsonValue,
) -> Result<String, CodegenError> {
    resolve_default(file, property, value, default).map(|(_, literal)| literal)
}

// Returns the literal together with the shape it was rendered for: the
// matching branch of an `Either`, otherwise `value` itself.
fn resolve_default(
    file: &mut JavaFile<'_>,
    property: &str,
    value: &TypeShape,
    default: &JsonValue,
) -> Result<(TypeShape, String), CodegenError> {
    let (true, left, right) = value.un_either() else {
        let literal = scalar_literal(file, property, value, default)?;
        return Ok((value.clone(), literal));
    };
    let either = file.reference(&known::either())?;
    match scalar_literal(file, property, &left, default) {
        Ok(literal) => Ok((left, format!("{either}.ofLeft({literal})"))),
        Err(first) => match scalar_literal(file, property, &right, default) {
            Ok(literal) => Ok((right, format!("{either}.ofRight({literal})"))),
            Err(second) => Err(CodegenError::EitherDefault {
                property: property.to_string(),
                first: Box::new(first),
                second: Box::new(second),
            }),
        },
    }
}

fn scalar_literal(
    file: &mut JavaFile<'_>,
    property: &str,
    value: &TypeShape,
    default: &JsonValue,
) -> Result<String, CodegenError> {
    let mismatch = |expected: &str| {
        CodegenError::default_value(property, format!("expected {expected}, found {default}"))
    };

    if value.is(&known::boolean()) {
        return default
            .as_bool()
            .map(|b| b.to_string())
            .ok_or_else(|| mismatch("a boolean"));
    }
    if value.is(&known::integer()) {
        return integer_value(default)
            .map(|i| i.to_string())
            .ok_or_else(|| mismatch("an integer"));
    }
    if value.is(&known::double()) {
        return default
            .as_f64()
            .map(double_literal)
            .ok_or_else(|| mismatch("a number"));
    }
    if value.is(&known::string()) {
        return default
            .as_str()
            .map(string_literal)
            .ok_or_else(|| mismatch("a string"));
    }
    if value.is(&known::json_element()) {
        let parser = file.reference(&known::json_parser())?;
        return Ok(format!(
            "{parser}.parseString({})",
            string_literal(&default.to_string())
        ));
    }
    if let Some(enum_type) = file.mapper().enum_by_class(value.erasure()) {
        let idents = element_identifiers(enum_type);
        let position = enum_type
            .elements
            .iter()
            .position(|element| values_match(&element.value, default));
        return match position.and_then(|i| idents.get(i)) {
            Some(ident) => {
                let class = file.code(value)?;
                Ok(format!("{class}.{ident}"))
            }
            None => Err(CodegenError::UnknownEnumDefault {
                property: property.to_string(),
                token: enum_type.token.clone(),
                value: default.to_string(),
            }),
        };
    }
    Err(CodegenError::default_value(
        property,
        format!("defaults are not supported for type {}", value.to_simple_code()),
    ))
}

fn integer_value(value: &JsonValue) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn double_literal(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Compares schema values, treating numbers by numeric value.
pub(crate) fn values_match(a: &JsonValue, b: &JsonValue) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::mapper::TypeMapper;
    use crate::names::Fqn;
    use sdkgen_schema::{
        DefaultValue, EnumElement, EnumType, Package, Primitive, SchemaType, TypeDef,
    };
    use serde_json::json;

    fn package() -> Package {
        let mut package = Package::new("pkg");
        package.types.insert(
            "pkg:index:Size".to_string(),
            TypeDef::Enum(EnumType {
                token: "pkg:index:Size".to_string(),
                description: None,
                element_type: Primitive::Int,
                elements: vec![
                    EnumElement {
                        name: Some("Small".to_string()),
                        value: json!(1),
                        description: None,
                        deprecation_message: None,
                    },
                    EnumElement {
                        name: Some("Large".to_string()),
                        value: json!(2),
                        description: None,
                        deprecation_message: None,
                    },
                ],
            }),
        );
        package
    }

    fn with_default(prop: Property, value: Option<JsonValue>, env: &[&str]) -> Property {
        Property {
            default: Some(DefaultValue {
                value,
                environment: env.iter().map(|e| (*e).to_string()).collect(),
            }),
            ..prop
        }
    }

    fn int_shape() -> TypeShape {
        TypeShape::of(known::integer())
    }

    #[test]
    fn test_fast_paths() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let mut file = JavaFile::new(&mapper, Fqn::parse("com.pulumi.pkg.WidgetArgs"));

        let optional = Property::new("count", SchemaType::Primitive(Primitive::Int), false);
        let target = TypeShape::output(int_shape()).nullable();
        assert_eq!(
            value_expr(&mut file, &optional, &target, ValueSource::Arg("count")).expect("expr"),
            "count"
        );

        let required = Property::new("name", SchemaType::STRING, true);
        assert_eq!(
            value_expr(
                &mut file,
                &required,
                &TypeShape::output(TypeShape::string()),
                ValueSource::Arg("name")
            )
            .expect("expr"),
            "Objects.requireNonNull(name, \"expected parameter 'name' to be non-null\")"
        );
    }

    #[test]
    fn test_default_chain() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let mut file = JavaFile::new(&mapper, Fqn::parse("com.pulumi.pkg.WidgetArgs"));

        let prop = with_default(
            Property::new("count", SchemaType::Primitive(Primitive::Int), false),
            Some(json!(3)),
            &["PKG_COUNT", "COUNT"],
        );
        let target = TypeShape::output(int_shape()).nullable();
        assert_eq!(
            value_expr(&mut file, &prop, &target, ValueSource::Arg("count")).expect("expr"),
            "Codegen.integerProp(\"count\").output().arg(count).env(\"PKG_COUNT\", \"COUNT\").def(3).getNullable()"
        );

        let mut secret = with_default(
            Property::new("token", SchemaType::STRING, true),
            Some(json!("abc")),
            &[],
        );
        secret.secret = true;
        assert_eq!(
            value_expr(
                &mut file,
                &secret,
                &TypeShape::output(TypeShape::string()),
                ValueSource::Arg("token")
            )
            .expect("expr"),
            "Codegen.stringProp(\"token\").secret().arg(token).def(\"abc\").require()"
        );
    }

    #[test]
    fn test_config_source() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let mut file = JavaFile::new(&mapper, Fqn::parse("com.pulumi.pkg.Config"));

        let prop = with_default(
            Property::new("region", SchemaType::STRING, false),
            None,
            &["PKG_REGION"],
        );
        let target = TypeShape::optional(TypeShape::string());
        assert_eq!(
            value_expr(&mut file, &prop, &target, ValueSource::Config("config")).expect("expr"),
            "Codegen.stringProp(\"region\").config(config).env(\"PKG_REGION\").get()"
        );
    }

    #[test]
    fn test_literal_mismatch() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let mut file = JavaFile::new(&mapper, Fqn::parse("com.pulumi.pkg.WidgetArgs"));
        let err = default_literal(&mut file, "count", &int_shape(), &json!("three"))
            .expect_err("mismatch");
        assert!(matches!(err, CodegenError::DefaultValue { ref property, .. } if property == "count"));
    }

    #[test]
    fn test_either_default_tries_both_branches() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let mut file = JavaFile::new(&mapper, Fqn::parse("com.pulumi.pkg.WidgetArgs"));
        let either = TypeShape::either(int_shape(), TypeShape::string());

        assert_eq!(
            default_literal(&mut file, "mode", &either, &json!(4)).expect("left"),
            "Either.ofLeft(4)"
        );
        assert_eq!(
            default_literal(&mut file, "mode", &either, &json!("fast")).expect("right"),
            "Either.ofRight(\"fast\")"
        );
        let err = default_literal(&mut file, "mode", &either, &json!(true)).expect_err("neither");
        assert!(matches!(err, CodegenError::EitherDefault { .. }));
    }

    #[test]
    fn test_either_default_picks_branch_accessor() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let mut file = JavaFile::new(&mapper, Fqn::parse("com.pulumi.pkg.WidgetArgs"));
        let target =
            TypeShape::output(TypeShape::either(TypeShape::string(), int_shape())).nullable();

        let text = with_default(
            Property::new("mode", SchemaType::STRING, false),
            Some(json!("x")),
            &[],
        );
        assert_eq!(
            value_expr(&mut file, &text, &target, ValueSource::Arg("mode")).expect("expr"),
            "Codegen.stringProp(\"mode\").output().arg(mode).def(Either.ofLeft(\"x\")).getNullable()"
        );

        let number = with_default(
            Property::new("mode", SchemaType::STRING, false),
            Some(json!(3)),
            &[],
        );
        assert_eq!(
            value_expr(&mut file, &number, &target, ValueSource::Arg("mode")).expect("expr"),
            "Codegen.integerProp(\"mode\").output().arg(mode).def(Either.ofRight(3)).getNullable()"
        );
    }

    #[test]
    fn test_enum_default() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let mut file = JavaFile::new(&mapper, Fqn::parse("com.pulumi.pkg.WidgetArgs"));
        let size = TypeShape::of(mapper.enum_class("pkg:index:Size").expect("class"));

        assert_eq!(
            default_literal(&mut file, "size", &size, &json!(2.0)).expect("enum"),
            "Size.Large"
        );
        let err = default_literal(&mut file, "size", &size, &json!(5)).expect_err("unknown");
        assert!(matches!(err, CodegenError::UnknownEnumDefault { .. }));
    }

    #[test]
    fn test_double_literal() {
        assert_eq!(double_literal(3.0), "3.0");
        assert_eq!(double_literal(0.25), "0.25");
    }
}
