//! Resource class generation.

use super::defaults::default_literal;
use super::file::{Emitted, JavaFile, write_doc};
use super::properties::{InputClass, PropertyGenerator, field_name};
use crate::error::CodegenError;
use crate::mapper::{INPUTS_NAMESPACE, ShapeOptions, TypeMapper};
use crate::names::{Fqn, known, string_literal};
use crate::shape::TypeShape;
use sdkgen_schema::{Property, Resource, Token, input_properties};

/// Output properties every resource already exposes.
const BUILTIN_OUTPUTS: &[&str] = &["id", "urn"];

/// Name of the utilities class in the package root.
pub const UTILITIES_CLASS: &str = "Utilities";

/// Generator for resource classes and their argument classes.
pub struct ResourceGenerator<'m> {
    mapper: &'m TypeMapper<'m>,
}

struct Flavor {
    base: Fqn,
    options: Fqn,
    lookup: bool,
}

impl<'m> ResourceGenerator<'m> {
    /// Creates a new resource generator.
    #[must_use]
    pub fn new(mapper: &'m TypeMapper<'m>) -> Self {
        Self { mapper }
    }

    /// Generates the resource class, its `Args` class and, when state
    /// inputs are declared, its `State` class.
    ///
    /// # Errors
    /// Returns `CodegenError` if a type cannot be mapped or a const or
    /// default value does not fit its property.
    pub fn generate(&self, resource: &Resource) -> Result<Vec<Emitted>, CodegenError> {
        let class = self.mapper.resource_class(&resource.token)?;
        let args_class = class.sibling(format!("{}Args", class.base()));
        let state_class = match &resource.state_inputs {
            Some(_) => Some(
                self.mapper
                    .module_package(&resource.token)?
                    .append(INPUTS_NAMESPACE)
                    .append(format!("{}State", class.base())),
            ),
            None => None,
        };

        let properties = PropertyGenerator::new(self.mapper);
        let args_inputs = input_properties(&resource.input_properties);
        let mut emitted = vec![
            self.resource_class(resource, &class, &args_class, state_class.as_ref())?,
            properties.input_class(&InputClass {
                class: args_class,
                description: None,
                properties: &args_inputs,
                base: known::resource_args(),
                inputless: false,
            })?,
        ];
        if let (Some(state_class), Some(state_inputs)) = (state_class, &resource.state_inputs) {
            let state_inputs = input_properties(state_inputs);
            emitted.push(properties.input_class(&InputClass {
                class: state_class,
                description: None,
                properties: &state_inputs,
                base: known::resource_args(),
                inputless: false,
            })?);
        }
        Ok(emitted)
    }

    fn flavor(resource: &Resource) -> Flavor {
        if resource.is_provider {
            Flavor {
                base: known::provider_resource(),
                options: known::custom_resource_options(),
                lookup: false,
            }
        } else if resource.is_component {
            Flavor {
                base: known::component_resource(),
                options: known::component_resource_options(),
                lookup: false,
            }
        } else {
            Flavor {
                base: known::custom_resource(),
                options: known::custom_resource_options(),
                lookup: true,
            }
        }
    }

    fn resource_class(
        &self,
        resource: &Resource,
        class: &Fqn,
        args_class: &Fqn,
        state_class: Option<&Fqn>,
    ) -> Result<Emitted, CodegenError> {
        let flavor = Self::flavor(resource);
        let mut file = JavaFile::new(self.mapper, class.clone());
        let name = file.class_name().to_string();
        let base = file.reference(&flavor.base)?;
        let resource_type = file.reference(&known::resource_type())?;

        let mut output = String::new();
        write_doc(
            &mut output,
            "",
            resource.description.as_deref(),
            resource.deprecation_message.as_deref(),
        );
        output.push_str(&format!(
            "@{resource_type}(type={})\n",
            string_literal(&resource.token)
        ));
        output.push_str(&format!("public class {name} extends {base} {{\n"));

        for property in &resource.properties {
            if BUILTIN_OUTPUTS.contains(&property.name.as_str()) {
                continue;
            }
            output.push_str(&self.output_property(&mut file, property)?);
        }

        output.push_str(&self.constructors(&mut file, resource, &flavor, args_class, state_class)?);
        output.push_str(&self.make_args(&mut file, resource, &flavor, args_class)?);
        output.push_str(&self.make_resource_options(&mut file, resource, &flavor)?);
        if flavor.lookup {
            output.push_str(&self.lookup(&mut file, resource, &flavor, state_class)?);
        }
        output.push_str("}\n");

        file.push_str(&output);
        Ok(file.finish())
    }

    fn output_property(
        &self,
        file: &mut JavaFile<'_>,
        property: &Property,
    ) -> Result<String, CodegenError> {
        let ident = field_name(property);
        let shape = file.shape(&property.type_, ShapeOptions::output())?;
        let (nullable, value) = shape.un_nullable();

        let export = file.reference(&known::export_annotation())?;
        let (refs, tree) = value.reified_tree();
        let mut classes = Vec::with_capacity(refs.len());
        for fqn in &refs {
            classes.push(file.code(&TypeShape::of(fqn.clone()))? + ".class");
        }
        let field_value = if nullable {
            value.clone().annotated("/* @Nullable */")
        } else {
            value.clone()
        };
        let field_type = file.code(&TypeShape::output(field_value))?;

        let mut output = String::new();
        output.push_str(&format!(
            "    @{export}(name={}, refs={{{}}}, tree={})\n",
            string_literal(&property.name),
            classes.join(","),
            string_literal(&tree)
        ));
        output.push_str(&format!("    private {field_type} {ident};\n\n"));

        write_doc(
            &mut output,
            "    ",
            property.description.as_deref(),
            property.deprecation_message.as_deref(),
        );
        let (return_type, body) = if !nullable {
            (file.code(&TypeShape::output(value))?, format!("this.{ident}"))
        } else if value.is(&known::list()) || value.is(&known::map()) {
            let collection = file.code(&TypeShape::of(value.erasure().clone()))?;
            (
                file.code(&TypeShape::output(value))?,
                format!("this.{ident}.applyValue(v -> v == null ? {collection}.of() : v)"),
            )
        } else {
            let codegen = file.reference(&known::codegen())?;
            (
                file.code(&TypeShape::output(TypeShape::optional(value)))?,
                format!("{codegen}.optional(this.{ident})"),
            )
        };
        output.push_str(&format!("    public {return_type} {ident}() {{\n"));
        output.push_str(&format!("        return {body};\n"));
        output.push_str("    }\n\n");
        Ok(output)
    }

    fn type_argument(&self, resource: &Resource) -> Result<String, CodegenError> {
        if resource.is_provider {
            return Ok(string_literal(&Token::parse(&resource.token)?.name));
        }
        Ok(string_literal(&resource.token))
    }

    fn constructors(
        &self,
        file: &mut JavaFile<'_>,
        resource: &Resource,
        flavor: &Flavor,
        args_class: &Fqn,
        state_class: Option<&Fqn>,
    ) -> Result<String, CodegenError> {
        let name = file.class_name().to_string();
        let string = file.reference(&known::string())?;
        let nullable = file.reference(&known::nullable())?;
        let args = file.reference(args_class)?;
        let options = file.reference(&flavor.options)?;
        let codegen = file.reference(&known::codegen())?;
        let type_argument = self.type_argument(resource)?;
        let remote = if resource.is_component { ", true" } else { "" };

        let mut output = String::new();
        output.push_str(&format!("    public {name}({string} name) {{\n"));
        output.push_str(&format!("        this(name, {args}.Empty);\n"));
        output.push_str("    }\n\n");

        output.push_str(&format!(
            "    public {name}({string} name, @{nullable} {args} args) {{\n"
        ));
        output.push_str("        this(name, args, null);\n");
        output.push_str("    }\n\n");

        output.push_str(&format!(
            "    public {name}({string} name, @{nullable} {args} args, @{nullable} {options} options) {{\n"
        ));
        output.push_str(&format!(
            "        super({type_argument}, name, makeArgs(args, options), makeResourceOptions(options, {codegen}.empty()){remote});\n"
        ));
        output.push_str("    }\n\n");

        if flavor.lookup {
            let output_class = file.reference(&known::output())?;
            let (state_param, state_arg) = match state_class {
                Some(state_class) => {
                    let state = file.reference(state_class)?;
                    (format!(", @{nullable} {state} state"), "state")
                }
                None => (String::new(), "null"),
            };
            output.push_str(&format!(
                "    private {name}({string} name, {output_class}<{string}> id{state_param}, @{nullable} {options} options) {{\n"
            ));
            output.push_str(&format!(
                "        super({type_argument}, name, {state_arg}, makeResourceOptions(options, id));\n"
            ));
            output.push_str("    }\n\n");
        }
        Ok(output)
    }

    fn make_args(
        &self,
        file: &mut JavaFile<'_>,
        resource: &Resource,
        flavor: &Flavor,
        args_class: &Fqn,
    ) -> Result<String, CodegenError> {
        let nullable = file.reference(&known::nullable())?;
        let args = file.reference(args_class)?;
        let options = file.reference(&flavor.options)?;

        let mut setters = Vec::new();
        for property in &resource.input_properties {
            let Some(value) = &property.const_value else {
                continue;
            };
            let shape = file.shape(&property.input_type(), ShapeOptions::input())?;
            let (_, shape) = shape.un_nullable();
            let (_, shape) = shape.un_output();
            let literal = default_literal(file, &property.name, &shape, value)?;
            setters.push(format!("            .{}({literal})\n", field_name(property)));
        }

        let mut output = String::new();
        output.push_str(&format!(
            "    private static {args} makeArgs(@{nullable} {args} args, @{nullable} {options} options) {{\n"
        ));
        output.push_str("        if (options != null && options.getUrn().isPresent()) {\n");
        output.push_str("            return null;\n");
        output.push_str("        }\n");
        output.push_str(&format!(
            "        var builder = args == null ? {args}.builder() : {args}.builder(args);\n"
        ));
        output.push_str("        return builder\n");
        for setter in setters {
            output.push_str(&setter);
        }
        output.push_str("            .build();\n");
        output.push_str("    }\n\n");
        Ok(output)
    }

    fn make_resource_options(
        &self,
        file: &mut JavaFile<'_>,
        resource: &Resource,
        flavor: &Flavor,
    ) -> Result<String, CodegenError> {
        let nullable = file.reference(&known::nullable())?;
        let options = file.reference(&flavor.options)?;
        let output_class = file.reference(&known::output())?;
        let string = file.reference(&known::string())?;
        let utilities = file.reference(&self.mapper.root_package().append(UTILITIES_CLASS))?;

        let mut output = String::new();
        output.push_str(&format!(
            "    private static {options} makeResourceOptions(@{nullable} {options} options, @{nullable} {output_class}<{string}> id) {{\n"
        ));
        output.push_str(&format!("        var defaultOptions = {options}.builder()\n"));
        output.push_str(&format!("            .version({utilities}.getVersion())\n"));
        if let Some(url) = &self.mapper.package().plugin_download_url {
            output.push_str(&format!(
                "            .pluginDownloadURL({})\n",
                string_literal(url)
            ));
        }
        if !resource.aliases.is_empty() {
            let list = file.reference(&known::list())?;
            let alias = file.reference(&known::alias())?;
            let mut entries = Vec::with_capacity(resource.aliases.len());
            for a in &resource.aliases {
                let mut entry = format!("{alias}.builder()");
                if let Some(name) = &a.name {
                    entry.push_str(&format!(".name({})", string_literal(name)));
                }
                if let Some(project) = &a.project {
                    entry.push_str(&format!(".project({})", string_literal(project)));
                }
                if let Some(type_token) = &a.type_token {
                    entry.push_str(&format!(".type({})", string_literal(type_token)));
                }
                entry.push_str(".build()");
                entries.push(format!("                {output_class}.of({entry})"));
            }
            output.push_str(&format!(
                "            .aliases({list}.of(\n{}\n            ))\n",
                entries.join(",\n")
            ));
        }
        let secrets: Vec<String> = resource
            .properties
            .iter()
            .filter(|p| p.secret)
            .map(|p| format!("                {}", string_literal(&p.name)))
            .collect();
        if !secrets.is_empty() {
            let list = file.reference(&known::list())?;
            output.push_str(&format!(
                "            .additionalSecretOutputs({list}.of(\n{}\n            ))\n",
                secrets.join(",\n")
            ));
        }
        output.push_str("            .build();\n");
        output.push_str(&format!(
            "        return {options}.merge(defaultOptions, options, id);\n"
        ));
        output.push_str("    }\n\n");
        Ok(output)
    }

    fn lookup(
        &self,
        file: &mut JavaFile<'_>,
        resource: &Resource,
        flavor: &Flavor,
        state_class: Option<&Fqn>,
    ) -> Result<String, CodegenError> {
        let name = file.class_name().to_string();
        let string = file.reference(&known::string())?;
        let nullable = file.reference(&known::nullable())?;
        let output_class = file.reference(&known::output())?;
        let options = file.reference(&flavor.options)?;
        let (state_param, state_arg) = match state_class {
            Some(state_class) => {
                let state = file.reference(state_class)?;
                (format!(", @{nullable} {state} state"), ", state")
            }
            None => (String::new(), ""),
        };

        let mut output = String::new();
        output.push_str(&format!(
            "    /**\n     * Get an existing {name} resource's state with the given name, ID, and optional extra\n     * properties used to qualify the lookup.\n     */\n"
        ));
        if resource.deprecation_message.is_some() {
            output.push_str("    @Deprecated\n");
        }
        output.push_str(&format!(
            "    public static {name} get({string} name, {output_class}<{string}> id{state_param}, @{nullable} {options} options) {{\n"
        ));
        output.push_str(&format!("        return new {name}(name, id{state_arg}, options);\n"));
        output.push_str("    }\n");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use sdkgen_schema::{Alias, DefaultValue, Package, Primitive, SchemaType};
    use serde_json::json;

    fn widget() -> Resource {
        let mut count = Property::new("count", SchemaType::Primitive(Primitive::Int), false);
        count.default = Some(DefaultValue {
            value: Some(json!(3)),
            environment: Vec::new(),
        });
        let mut kind = Property::new("kind", SchemaType::STRING, false);
        kind.const_value = Some(json!("widget"));
        let mut password = Property::new("password", SchemaType::STRING, false);
        password.secret = true;
        Resource {
            token: "pkg:mod:Widget".to_string(),
            description: Some("A widget.".to_string()),
            properties: vec![
                Property::new("count", SchemaType::Primitive(Primitive::Int), false),
                Property::new("id", SchemaType::STRING, true),
                Property::new("name", SchemaType::STRING, true),
                password,
                Property::new(
                    "tags",
                    SchemaType::Array(Box::new(SchemaType::STRING)),
                    false,
                ),
            ],
            input_properties: vec![count, kind, Property::new("name", SchemaType::STRING, true)],
            state_inputs: Some(vec![Property::new("name", SchemaType::STRING, false)]),
            aliases: vec![Alias {
                name: None,
                project: None,
                type_token: Some("pkg:old:Widget".to_string()),
            }],
            deprecation_message: None,
            is_component: false,
            is_provider: false,
        }
    }

    fn generate(package: &Package, resource: &Resource) -> Vec<Emitted> {
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(package, &config).expect("mapper");
        ResourceGenerator::new(&mapper)
            .generate(resource)
            .expect("generate")
    }

    #[test]
    fn test_resource_files() {
        let package = Package::new("pkg");
        let emitted = generate(&package, &widget());
        let paths: Vec<&str> = emitted.iter().map(|e| e.file.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "src/main/java/com/pulumi/pkg/mod/Widget.java",
                "src/main/java/com/pulumi/pkg/mod/WidgetArgs.java",
                "src/main/java/com/pulumi/pkg/mod/inputs/WidgetState.java",
            ]
        );
    }

    #[test]
    fn test_resource_outputs() {
        let package = Package::new("pkg");
        let emitted = generate(&package, &widget());
        let text = &emitted[0].file.contents;

        assert!(text.contains("@ResourceType(type=\"pkg:mod:Widget\")\npublic class Widget extends CustomResource {"));
        assert!(text.contains(
            "    @Export(name=\"name\", refs={String.class}, tree=\"[0]\")\n    private Output<String> name;"
        ));
        assert!(text.contains("    private Output</* @Nullable */ Integer> count;"));
        assert!(text.contains(
            "    public Output<Optional<Integer>> count() {\n        return Codegen.optional(this.count);"
        ));
        assert!(text.contains(
            "    @Export(name=\"tags\", refs={List.class,String.class}, tree=\"[0,1]\")"
        ));
        assert!(text.contains("        return this.tags.applyValue(v -> v == null ? List.of() : v);"));
        assert!(!text.contains("name=\"id\""));
    }

    #[test]
    fn test_resource_constructors_and_options() {
        let mut package = Package::new("pkg");
        package.plugin_download_url = Some("https://example.com/plugins".to_string());
        let emitted = generate(&package, &widget());
        let text = &emitted[0].file.contents;

        assert!(text.contains("    public Widget(String name) {\n        this(name, WidgetArgs.Empty);"));
        assert!(text.contains(
            "        super(\"pkg:mod:Widget\", name, makeArgs(args, options), makeResourceOptions(options, Codegen.empty()));"
        ));
        assert!(text.contains("            .kind(\"widget\")\n            .build();"));
        assert!(text.contains("            .version(Utilities.getVersion())\n"));
        assert!(text.contains("            .pluginDownloadURL(\"https://example.com/plugins\")\n"));
        assert!(text.contains("                Output.of(Alias.builder().type(\"pkg:old:Widget\").build())"));
        assert!(text.contains(".additionalSecretOutputs(List.of(\n                \"password\"\n            ))"));
        assert!(text.contains("        return CustomResourceOptions.merge(defaultOptions, options, id);"));
        assert!(text.contains(
            "    public static Widget get(String name, Output<String> id, @Nullable WidgetState state, @Nullable CustomResourceOptions options) {"
        ));
        assert!(text.contains("import com.pulumi.pkg.Utilities;\n"));
        assert!(text.contains("import com.pulumi.pkg.mod.inputs.WidgetState;\n"));
    }

    #[test]
    fn test_component_has_no_lookup() {
        let package = Package::new("pkg");
        let mut component = widget();
        component.is_component = true;
        component.state_inputs = None;
        let emitted = generate(&package, &component);
        assert_eq!(emitted.len(), 2);
        let text = &emitted[0].file.contents;
        assert!(text.contains("extends ComponentResource {"));
        assert!(text.contains("makeResourceOptions(options, Codegen.empty()), true);"));
        assert!(!text.contains(" get("));
    }

    #[test]
    fn test_provider_resource() {
        let package = Package::new("pkg");
        let mut provider = widget();
        provider.token = "pulumi:providers:pkg".to_string();
        provider.is_provider = true;
        provider.state_inputs = None;
        let emitted = generate(&package, &provider);
        assert_eq!(emitted[0].file.path, "src/main/java/com/pulumi/pkg/Provider.java");
        assert_eq!(emitted[1].file.path, "src/main/java/com/pulumi/pkg/ProviderArgs.java");
        let text = &emitted[0].file.contents;
        assert!(text.contains("public class Provider extends ProviderResource {"));
        assert!(text.contains("        super(\"pkg\", name, makeArgs(args, options)"));
        assert!(!text.contains(" get("));
    }
}
