//! Input and output class generation from property lists.
//!
//! Input classes are immutable argument holders with a nested `Builder`;
//! output classes are immutable result types deserialized through an
//! annotated constructor.

use super::defaults::{ValueSource, value_expr};
use super::file::{Emitted, JavaFile, write_doc};
use crate::error::CodegenError;
use crate::mapper::{ShapeOptions, TypeMapper};
use crate::names::{Fqn, known, property_ident, string_literal};
use crate::shape::TypeShape;
use sdkgen_schema::Property;

/// Returns the Java identifier of a property.
#[must_use]
pub fn field_name(property: &Property) -> String {
    match &property.language_name {
        Some(name) => property_ident(name),
        None => property_ident(&property.name),
    }
}

/// Description of an input class to generate.
#[derive(Debug, Clone)]
pub struct InputClass<'p> {
    /// Class to generate.
    pub class: Fqn,
    /// Class description.
    pub description: Option<&'p str>,
    /// Properties, already in the shape the class exposes.
    pub properties: &'p [Property],
    /// Runtime base class.
    pub base: Fqn,
    /// Generate the plain variant used by plain function overloads.
    pub inputless: bool,
}

struct Field {
    property: Property,
    ident: String,
    shape: TypeShape,
}

/// Generator for property-holding classes.
pub struct PropertyGenerator<'m> {
    mapper: &'m TypeMapper<'m>,
}

impl<'m> PropertyGenerator<'m> {
    /// Creates a new property generator.
    #[must_use]
    pub fn new(mapper: &'m TypeMapper<'m>) -> Self {
        Self { mapper }
    }

    /// Generates an input class with a builder.
    ///
    /// # Errors
    /// Returns `CodegenError` if a property type cannot be mapped or a
    /// default value does not fit its property.
    pub fn input_class(&self, spec: &InputClass<'_>) -> Result<Emitted, CodegenError> {
        let mut file = JavaFile::new(self.mapper, spec.class.clone());
        let name = file.class_name().to_string();
        let opts = ShapeOptions::input().inputless(spec.inputless);

        let mut fields = Vec::with_capacity(spec.properties.len());
        for property in spec.properties {
            let shape = file.shape(&property.type_, opts)?;
            fields.push(Field {
                property: property.clone(),
                ident: field_name(property),
                shape,
            });
        }

        let base = file.reference(&spec.base)?;
        let import = file.reference(&known::import_annotation())?;
        let mut output = String::new();
        write_doc(&mut output, "", spec.description, None);
        output.push_str(&format!("public final class {name} extends {base} {{\n\n"));
        output.push_str(&format!(
            "    public static final {name} Empty = new {name}();\n\n"
        ));

        for field in &fields {
            let code = file.code(&field.shape)?;
            write_doc(
                &mut output,
                "    ",
                field.property.description.as_deref(),
                field.property.deprecation_message.as_deref(),
            );
            let required = if field.property.required { ", required=true" } else { "" };
            output.push_str(&format!(
                "    @{import}(name={}{required})\n",
                string_literal(&field.property.name)
            ));
            output.push_str(&format!("    private {code} {};\n\n", field.ident));
            output.push_str(&self.input_getter(&mut file, field)?);
        }

        output.push_str(&format!("    private {name}() {{}}\n\n"));
        output.push_str(&format!("    private {name}({name} $) {{\n"));
        for field in &fields {
            output.push_str(&format!("        this.{0} = $.{0};\n", field.ident));
        }
        output.push_str("    }\n\n");

        if !fields.is_empty() {
            output.push_str(&self.all_fields_constructor(&mut file, &name, &fields)?);
        }
        output.push_str(&self.builder(&mut file, &name, &fields)?);
        output.push_str("}\n");

        file.push_str(&output);
        Ok(file.finish())
    }

    fn input_getter(&self, file: &mut JavaFile<'_>, field: &Field) -> Result<String, CodegenError> {
        let mut output = String::new();
        let (nullable, inner) = field.shape.un_nullable();
        if nullable {
            let optional = TypeShape::optional(inner);
            let optional_class = file.reference(&known::optional())?;
            output.push_str(&format!(
                "    public {} {}() {{\n",
                file.code(&optional)?,
                field.ident
            ));
            output.push_str(&format!(
                "        return {optional_class}.ofNullable(this.{});\n",
                field.ident
            ));
        } else {
            output.push_str(&format!(
                "    public {} {}() {{\n",
                file.code(&field.shape)?,
                field.ident
            ));
            output.push_str(&format!("        return this.{};\n", field.ident));
        }
        output.push_str("    }\n\n");
        Ok(output)
    }

    fn all_fields_constructor(
        &self,
        file: &mut JavaFile<'_>,
        name: &str,
        fields: &[Field],
    ) -> Result<String, CodegenError> {
        let mut params = Vec::with_capacity(fields.len());
        for field in fields {
            params.push(format!("        {} {}", file.code(&field.shape)?, field.ident));
        }
        let mut output = format!("    private {name}(\n{}) {{\n", params.join(",\n"));
        for field in fields {
            let expr = value_expr(
                file,
                &field.property,
                &field.shape,
                ValueSource::Arg(&field.ident),
            )?;
            output.push_str(&format!("        this.{} = {expr};\n", field.ident));
        }
        output.push_str("    }\n\n");
        Ok(output)
    }

    fn builder(
        &self,
        file: &mut JavaFile<'_>,
        name: &str,
        fields: &[Field],
    ) -> Result<String, CodegenError> {
        let objects = file.reference(&known::objects())?;
        let mut output = String::new();
        output.push_str("    public static Builder builder() {\n");
        output.push_str("        return new Builder();\n");
        output.push_str("    }\n\n");
        output.push_str(&format!("    public static Builder builder({name} defaults) {{\n"));
        output.push_str("        return new Builder(defaults);\n");
        output.push_str("    }\n\n");

        output.push_str("    public static final class Builder {\n");
        output.push_str(&format!("        private {name} $;\n\n"));
        output.push_str("        public Builder() {\n");
        output.push_str(&format!("            $ = new {name}();\n"));
        output.push_str("        }\n\n");
        output.push_str(&format!("        public Builder({name} defaults) {{\n"));
        output.push_str(&format!(
            "            $ = new {name}({objects}.requireNonNull(defaults));\n"
        ));
        output.push_str("        }\n\n");

        for field in fields {
            output.push_str(&self.setters(file, name, field)?);
        }

        output.push_str(&format!("        public {name} build() {{\n"));
        let missing = file.reference(&known::missing_required_property())?;
        for field in fields {
            if field.property.required && !field.property.has_default() {
                output.push_str(&format!("            if ($.{} == null) {{\n", field.ident));
                output.push_str(&format!(
                    "                throw new {missing}({}, {});\n",
                    string_literal(name),
                    string_literal(&field.property.name)
                ));
                output.push_str("            }\n");
            }
        }
        if fields.is_empty() {
            output.push_str("            return $;\n");
        } else {
            let args: Vec<String> = fields.iter().map(|f| format!("$.{}", f.ident)).collect();
            output.push_str(&format!("            return new {name}({});\n", args.join(", ")));
        }
        output.push_str("        }\n");
        output.push_str("    }\n\n");
        Ok(output)
    }

    fn setters(
        &self,
        file: &mut JavaFile<'_>,
        class_name: &str,
        field: &Field,
    ) -> Result<String, CodegenError> {
        let ident = &field.ident;
        let deprecation = field.property.deprecation_message.as_deref();
        let mut output = String::new();

        write_doc(&mut output, "        ", None, deprecation);
        output.push_str(&format!(
            "        public Builder {ident}({} {ident}) {{\n",
            file.code(&field.shape)?
        ));
        output.push_str(&format!("            $.{ident} = {ident};\n"));
        output.push_str("            return this;\n");
        output.push_str("        }\n\n");

        let (_, canonical) = field.shape.un_nullable();
        let (wrapped, value) = canonical.un_output();
        if wrapped {
            let output_class = file.reference(&known::output())?;
            write_doc(&mut output, "        ", None, deprecation);
            output.push_str(&format!(
                "        public Builder {ident}({} {ident}) {{\n",
                file.code(&value)?
            ));
            output.push_str(&format!(
                "            return {ident}({output_class}.of({ident}));\n"
            ));
            output.push_str("        }\n\n");
        }

        let (is_list, elem) = value.un_list();
        if is_list {
            let list = file.reference(&known::list())?;
            write_doc(&mut output, "        ", None, deprecation);
            output.push_str(&format!(
                "        public Builder {ident}({}... {ident}) {{\n",
                file.code(&elem)?
            ));
            output.push_str(&format!("            return {ident}({list}.of({ident}));\n"));
            output.push_str("        }\n\n");
        }

        if let (true, left, right) = value.un_either() {
            if left.erasure() == right.erasure() {
                tracing::warn!(
                    class = class_name,
                    property = %field.property.name,
                    erasure = %left.erasure(),
                    "either branches erase to the same type, skipping branch setters"
                );
            } else {
                let either = file.reference(&known::either())?;
                for (branch, constructor) in [(left, "ofLeft"), (right, "ofRight")] {
                    write_doc(&mut output, "        ", None, deprecation);
                    output.push_str(&format!(
                        "        public Builder {ident}({} {ident}) {{\n",
                        file.code(&branch)?
                    ));
                    output.push_str(&format!(
                        "            return {ident}({either}.{constructor}({ident}));\n"
                    ));
                    output.push_str("        }\n\n");
                }
            }
        }
        Ok(output)
    }

    /// Generates an output class with an annotated constructor and getters.
    ///
    /// # Errors
    /// Returns `CodegenError` if a property type cannot be mapped.
    pub fn output_class(
        &self,
        class: Fqn,
        description: Option<&str>,
        properties: &[Property],
    ) -> Result<Emitted, CodegenError> {
        let mut file = JavaFile::new(self.mapper, class);
        let name = file.class_name().to_string();

        let mut fields = Vec::with_capacity(properties.len());
        for property in properties {
            let shape = file.shape(&property.type_, ShapeOptions::output())?;
            fields.push(Field {
                property: property.clone(),
                ident: field_name(property),
                shape,
            });
        }

        let custom_type = file.reference(&known::custom_type())?;
        let objects = file.reference(&known::objects())?;
        let mut output = String::new();
        write_doc(&mut output, "", description, None);
        output.push_str(&format!("@{custom_type}\n"));
        output.push_str(&format!("public final class {name} {{\n"));

        for field in &fields {
            output.push_str(&format!(
                "    private final {} {};\n",
                file.code(&field.shape)?,
                field.ident
            ));
        }
        if !fields.is_empty() {
            output.push('\n');
        }

        let mut params = Vec::with_capacity(fields.len());
        for field in &fields {
            params.push(format!(
                "        @{custom_type}.Parameter({}) {} {}",
                string_literal(&field.property.name),
                file.code(&field.shape)?,
                field.ident
            ));
        }
        output.push_str(&format!("    @{custom_type}.Constructor\n"));
        if params.is_empty() {
            output.push_str(&format!("    private {name}() {{\n"));
        } else {
            output.push_str(&format!("    private {name}(\n{}) {{\n", params.join(",\n")));
        }
        for field in &fields {
            if field.shape.is_nullable() {
                output.push_str(&format!("        this.{0} = {0};\n", field.ident));
            } else {
                output.push_str(&format!(
                    "        this.{0} = {objects}.requireNonNull({0});\n",
                    field.ident
                ));
            }
        }
        output.push_str("    }\n");

        for field in &fields {
            output.push('\n');
            output.push_str(&self.output_getter(&mut file, field)?);
        }
        output.push_str("}\n");

        file.push_str(&output);
        Ok(file.finish())
    }

    fn output_getter(&self, file: &mut JavaFile<'_>, field: &Field) -> Result<String, CodegenError> {
        let ident = &field.ident;
        let mut output = String::new();
        write_doc(
            &mut output,
            "    ",
            field.property.description.as_deref(),
            field.property.deprecation_message.as_deref(),
        );
        let (nullable, inner) = field.shape.un_nullable();
        let (return_type, body) = if !nullable || inner.is(&known::output()) {
            (file.code(&inner)?, format!("this.{ident}"))
        } else if inner.is(&known::list()) || inner.is(&known::map()) {
            let collection = file.code(&TypeShape::of(inner.erasure().clone()))?;
            (
                file.code(&inner)?,
                format!("this.{ident} == null ? {collection}.of() : this.{ident}"),
            )
        } else {
            let optional = file.reference(&known::optional())?;
            (
                file.code(&TypeShape::optional(inner))?,
                format!("{optional}.ofNullable(this.{ident})"),
            )
        };
        output.push_str(&format!("    public {return_type} {ident}() {{\n"));
        output.push_str(&format!("        return {body};\n"));
        output.push_str("    }\n");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::queue::Direction;
    use sdkgen_schema::{
        DefaultValue, ObjectType, ObjectTypeId, Package, Primitive, SchemaType, TypeDef,
        input_properties,
    };
    use serde_json::json;

    fn package() -> Package {
        let mut package = Package::new("pkg");
        package.types.insert(
            "pkg:mod:Part".to_string(),
            TypeDef::Object(ObjectType {
                token: "pkg:mod:Part".to_string(),
                description: None,
                properties: vec![Property::new("size", SchemaType::STRING, true)],
            }),
        );
        package
    }

    fn widget_properties() -> Vec<Property> {
        let mut count = Property::new("count", SchemaType::Primitive(Primitive::Int), false);
        count.default = Some(DefaultValue {
            value: Some(json!(3)),
            environment: Vec::new(),
        });
        vec![
            count,
            Property::new("name", SchemaType::STRING, true),
            Property::new(
                "parts",
                SchemaType::Array(Box::new(SchemaType::Object(ObjectTypeId::plain(
                    "pkg:mod:Part",
                )))),
                false,
            ),
        ]
    }

    fn args_class(mapper: &TypeMapper<'_>, properties: &[Property]) -> Emitted {
        let inputs = input_properties(properties);
        PropertyGenerator::new(mapper)
            .input_class(&InputClass {
                class: Fqn::parse("com.pulumi.pkg.mod.WidgetArgs"),
                description: Some("Arguments for a widget."),
                properties: &inputs,
                base: known::resource_args(),
                inputless: false,
            })
            .expect("generate")
    }

    #[test]
    fn test_input_class_required_and_default() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let emitted = args_class(&mapper, &widget_properties());
        let text = &emitted.file.contents;

        assert!(text.contains("public final class WidgetArgs extends ResourceArgs {"));
        assert!(text.contains("public static final WidgetArgs Empty = new WidgetArgs();"));
        assert!(text.contains("    @Import(name=\"name\", required=true)\n    private Output<String> name;"));
        assert!(text.contains("    private @Nullable Output<Integer> count;"));
        assert!(text.contains(
            "        this.count = Codegen.integerProp(\"count\").output().arg(count).def(3).getNullable();"
        ));
        assert!(text.contains(
            "        this.name = Objects.requireNonNull(name, \"expected parameter 'name' to be non-null\");"
        ));
        assert!(text.contains(
            "            if ($.name == null) {\n                throw new MissingRequiredPropertyException(\"WidgetArgs\", \"name\");\n            }"
        ));
        assert!(!text.contains("if ($.count == null)"));
        assert!(text.contains("            return new WidgetArgs($.count, $.name, $.parts);"));
    }

    #[test]
    fn test_input_class_derived_setters() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let emitted = args_class(&mapper, &widget_properties());
        let text = &emitted.file.contents;

        assert!(text.contains("        public Builder count(@Nullable Output<Integer> count) {"));
        assert!(text.contains(
            "        public Builder count(Integer count) {\n            return count(Output.of(count));"
        ));
        assert!(text.contains(
            "        public Builder parts(List<PartArgs> parts) {\n            return parts(Output.of(parts));"
        ));
        assert!(text.contains(
            "        public Builder parts(PartArgs... parts) {\n            return parts(List.of(parts));"
        ));
        assert!(text.contains("import com.pulumi.pkg.mod.inputs.PartArgs;\n"));

        assert_eq!(emitted.discovered.len(), 1);
        assert_eq!(emitted.discovered[0].direction, Direction::Input);
        assert_eq!(emitted.discovered[0].class_name, "PartArgs");
    }

    #[test]
    fn test_either_setters() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let distinct = vec![Property::new(
            "mode",
            SchemaType::Union(vec![SchemaType::STRING, SchemaType::Primitive(Primitive::Int)]),
            true,
        )];
        let text = args_class(&mapper, &distinct).file.contents;
        assert!(text.contains("    private Output<Either<String,Integer>> mode;"));
        assert!(text.contains(
            "        public Builder mode(String mode) {\n            return mode(Either.ofLeft(mode));"
        ));
        assert!(text.contains(
            "        public Builder mode(Integer mode) {\n            return mode(Either.ofRight(mode));"
        ));

        let ambiguous = vec![Property::new(
            "items",
            SchemaType::Union(vec![
                SchemaType::Array(Box::new(SchemaType::STRING)),
                SchemaType::Array(Box::new(SchemaType::Primitive(Primitive::Int))),
            ]),
            true,
        )];
        let text = args_class(&mapper, &ambiguous).file.contents;
        assert!(text.contains("Output<Either<List<String>,List<Integer>>> items"));
        assert!(!text.contains("Either.ofLeft"));
        assert!(!text.contains("Either.ofRight"));
        assert_eq!(text.matches("public Builder items(").count(), 2);
    }

    #[test]
    fn test_plain_input_class() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let inputs = input_properties(&widget_properties());
        let emitted = PropertyGenerator::new(&mapper)
            .input_class(&InputClass {
                class: Fqn::parse("com.pulumi.pkg.mod.inputs.GetWidgetPlainArgs"),
                description: None,
                properties: &inputs,
                base: known::invoke_args(),
                inputless: true,
            })
            .expect("generate");
        let text = &emitted.file.contents;
        assert!(text.contains("    private @Nullable List<PartPlainArgs> parts;"));
        assert!(text.contains("        this.count = Codegen.integerProp(\"count\").arg(count).def(3).getNullable();"));
        assert!(!text.contains("Output"));
        assert_eq!(emitted.discovered[0].class_name, "PartPlainArgs");
    }

    #[test]
    fn test_output_class() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let mut tags = Property::new(
            "tags",
            SchemaType::Map(Box::new(SchemaType::STRING)),
            false,
        );
        tags.description = Some("Resource tags.".to_string());
        let properties = vec![
            Property::new("count", SchemaType::Primitive(Primitive::Int), false),
            Property::new("name", SchemaType::STRING, true),
            tags,
        ];
        let emitted = PropertyGenerator::new(&mapper)
            .output_class(
                Fqn::parse("com.pulumi.pkg.mod.outputs.Widget"),
                None,
                &properties,
            )
            .expect("generate");
        let text = &emitted.file.contents;

        assert!(text.contains("@CustomType\npublic final class Widget {"));
        assert!(text.contains("    private final @Nullable Integer count;"));
        assert!(text.contains("        @CustomType.Parameter(\"name\") String name"));
        assert!(text.contains("        this.name = Objects.requireNonNull(name);"));
        assert!(text.contains("        this.count = count;"));
        assert!(text.contains(
            "    public Optional<Integer> count() {\n        return Optional.ofNullable(this.count);"
        ));
        assert!(text.contains(
            "    public Map<String,String> tags() {\n        return this.tags == null ? Map.of() : this.tags;"
        ));
        assert!(text.contains("    /**\n     * Resource tags.\n     */\n    public Map"));
    }
}
