//! Enum class generation.

use super::file::{Emitted, JavaFile, write_doc};
use crate::error::CodegenError;
use crate::mapper::{TypeMapper, primitive_shape};
use crate::names::{class_ident, known, string_literal};
use sdkgen_schema::{EnumType, Primitive};
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;

/// Returns one unique, valid identifier per element, in element order.
///
/// Declared names win over values; colliding identifiers get a numeric
/// suffix.
#[must_use]
pub fn element_identifiers(enum_type: &EnumType) -> Vec<String> {
    let mut used = BTreeSet::new();
    enum_type
        .elements
        .iter()
        .map(|element| {
            let base = match (&element.name, &element.value) {
                (Some(name), _) => class_ident(name),
                (None, JsonValue::String(value)) => class_ident(value),
                (None, value) => class_ident(&value.to_string().replace(['.', '-'], "_")),
            };
            let mut ident = base.clone();
            let mut suffix = 2;
            while !used.insert(ident.clone()) {
                ident = format!("{base}{suffix}");
                suffix += 1;
            }
            ident
        })
        .collect()
}

/// Generator for enum classes.
pub struct EnumGenerator<'m> {
    mapper: &'m TypeMapper<'m>,
}

impl<'m> EnumGenerator<'m> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(mapper: &'m TypeMapper<'m>) -> Self {
        Self { mapper }
    }

    /// Generates the class of one enum type.
    ///
    /// # Errors
    /// Returns `CodegenError` if the token is malformed or an element value
    /// does not match the element type.
    pub fn generate(&self, enum_type: &EnumType) -> Result<Emitted, CodegenError> {
        let class = self.mapper.enum_class(&enum_type.token)?;
        let mut file = JavaFile::new(self.mapper, class);
        let name = file.class_name().to_string();
        let value_type = file.code(&primitive_shape(enum_type.element_type))?;
        let enum_annotation = file.reference(&known::enum_type())?;
        let objects = file.reference(&known::objects())?;
        let joiner = file.reference(&known::string_joiner())?;

        let mut output = String::new();
        write_doc(&mut output, "", enum_type.description.as_deref(), None);
        output.push_str(&format!("@{enum_annotation}\n"));
        output.push_str(&format!("public enum {name} {{\n"));

        let idents = element_identifiers(enum_type);
        let count = enum_type.elements.len();
        for (index, (element, ident)) in enum_type.elements.iter().zip(&idents).enumerate() {
            write_doc(
                &mut output,
                "    ",
                element.description.as_deref(),
                element.deprecation_message.as_deref(),
            );
            let literal = element_literal(enum_type, &element.value)?;
            let separator = if index + 1 == count { ';' } else { ',' };
            output.push_str(&format!("    {ident}({literal}){separator}\n"));
        }
        if count == 0 {
            output.push_str("    ;\n");
        }
        output.push('\n');

        output.push_str(&format!("    private final {value_type} value;\n\n"));
        output.push_str(&format!("    {name}({value_type} value) {{\n"));
        output.push_str(&format!("        this.value = {objects}.requireNonNull(value);\n"));
        output.push_str("    }\n\n");

        output.push_str(&format!("    @{enum_annotation}.Converter\n"));
        output.push_str(&format!("    public {value_type} getValue() {{\n"));
        output.push_str("        return this.value;\n");
        output.push_str("    }\n\n");

        output.push_str("    @Override\n");
        output.push_str("    public java.lang.String toString() {\n");
        output.push_str(&format!(
            "        return new {joiner}(\", \", \"{name}[\", \"]\")\n"
        ));
        output.push_str("            .add(\"value='\" + this.value + \"'\")\n");
        output.push_str("            .toString();\n");
        output.push_str("    }\n");
        output.push_str("}\n");

        file.push_str(&output);
        Ok(file.finish())
    }
}

fn element_literal(enum_type: &EnumType, value: &JsonValue) -> Result<String, CodegenError> {
    let literal = match (enum_type.element_type, value) {
        (Primitive::String, JsonValue::String(s)) => Some(string_literal(s)),
        (Primitive::Bool, JsonValue::Bool(b)) => Some(b.to_string()),
        (Primitive::Int, JsonValue::Number(n)) => n.as_i64().map(|i| i.to_string()),
        (Primitive::Number, JsonValue::Number(n)) => n.as_f64().map(|f| {
            if f.fract() == 0.0 {
                format!("{f:.1}")
            } else {
                f.to_string()
            }
        }),
        _ => None,
    };
    literal.ok_or_else(|| {
        CodegenError::generation(format!(
            "enum '{}' value {value} is not a {}",
            enum_type.token,
            enum_type.element_type.type_name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use pretty_assertions::assert_eq;
    use sdkgen_schema::{EnumElement, Package};
    use serde_json::json;

    fn element(name: Option<&str>, value: JsonValue) -> EnumElement {
        EnumElement {
            name: name.map(str::to_string),
            value,
            description: None,
            deprecation_message: None,
        }
    }

    fn enum_type(element_type: Primitive, elements: Vec<EnumElement>) -> EnumType {
        EnumType {
            token: "pkg:index:Tier".to_string(),
            description: Some("Service tier.".to_string()),
            element_type,
            elements,
        }
    }

    #[test]
    fn test_element_identifiers() {
        let tier = enum_type(
            Primitive::String,
            vec![
                element(None, json!("basic-plan")),
                element(Some("BasicPlan"), json!("basic")),
                element(None, json!("class")),
                element(None, json!("2x")),
            ],
        );
        assert_eq!(
            element_identifiers(&tier),
            vec!["BasicPlan", "BasicPlan2", "Class", "_2x"]
        );
    }

    #[test]
    fn test_numeric_identifiers() {
        let sizes = enum_type(Primitive::Number, vec![element(None, json!(1.5))]);
        assert_eq!(element_identifiers(&sizes), vec!["_1_5"]);
    }

    #[test]
    fn test_generate_enum() {
        let package = Package::new("pkg");
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let mut tier = enum_type(
            Primitive::String,
            vec![element(Some("Free"), json!("free")), element(Some("Pro"), json!("pro"))],
        );
        tier.elements[1].deprecation_message = Some("Use Free.".to_string());

        let emitted = EnumGenerator::new(&mapper).generate(&tier).expect("generate");
        assert_eq!(emitted.file.path, "src/main/java/com/pulumi/pkg/enums/Tier.java");
        let expected_body = "\
/**
 * Service tier.
 */
@EnumType
public enum Tier {
    Free(\"free\"),
    /**
     * @deprecated
     * Use Free.
     */
    @Deprecated
    Pro(\"pro\");

    private final String value;

    Tier(String value) {
        this.value = Objects.requireNonNull(value);
    }

    @EnumType.Converter
    public String getValue() {
        return this.value;
    }

    @Override
    public java.lang.String toString() {
        return new StringJoiner(\", \", \"Tier[\", \"]\")
            .add(\"value='\" + this.value + \"'\")
            .toString();
    }
}
";
        assert!(emitted.file.contents.ends_with(expected_body));
        assert!(emitted.file.contents.contains("import java.util.StringJoiner;\n"));
        assert!(emitted.discovered.is_empty());
    }

    #[test]
    fn test_value_type_mismatch_fails() {
        let package = Package::new("pkg");
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let bad = enum_type(Primitive::Int, vec![element(Some("One"), json!("1"))]);
        assert!(EnumGenerator::new(&mapper).generate(&bad).is_err());
    }
}
