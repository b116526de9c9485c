//! Schema type to [`TypeShape`] mapping.
//!
//! [`TypeMapper::type_shape`] is a pure function of the bound package and the
//! naming configuration. Object types discovered during the traversal are
//! returned as queue entries instead of being enqueued directly; the driver
//! merges them into its [`ClassQueue`](crate::queue::ClassQueue).

use crate::config::{GeneratorConfig, JavaPackageInfo};
use crate::error::CodegenError;
use crate::names::{Fqn, class_ident, known};
use crate::queue::{ClassQueueEntry, Direction};
use crate::shape::TypeShape;
use sdkgen_schema::{EnumType, ObjectTypeId, Package, Primitive, SchemaType, Token, TypeDef};

/// Name of the sub-namespace holding input classes.
pub const INPUTS_NAMESPACE: &str = "inputs";
/// Name of the sub-namespace holding output classes.
pub const OUTPUTS_NAMESPACE: &str = "outputs";
/// Name of the sub-namespace holding enums.
pub const ENUMS_NAMESPACE: &str = "enums";
/// Class name of the package provider resource.
pub const PROVIDER_CLASS: &str = "Provider";

/// Flags steering one [`TypeMapper::type_shape`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeOptions {
    /// Generating for the write side.
    pub input: bool,
    /// Collections must be initialized, so optional ones stay `Optional`.
    pub require_initializers: bool,
    /// Keep a root `Optional<T>` instead of turning it into `@Nullable T`.
    pub outer_optional: bool,
    /// Generating the plain overload of a function: input wrappers are
    /// dropped and objects use their plain input classes.
    pub inside_inputless_overload: bool,
}

impl ShapeOptions {
    /// Options for write-side types.
    #[must_use]
    pub const fn input() -> Self {
        Self {
            input: true,
            require_initializers: false,
            outer_optional: false,
            inside_inputless_overload: false,
        }
    }

    /// Options for read-side types.
    #[must_use]
    pub const fn output() -> Self {
        Self {
            input: false,
            require_initializers: false,
            outer_optional: false,
            inside_inputless_overload: false,
        }
    }

    /// Sets whether a root `Optional` is kept.
    #[must_use]
    pub const fn outer_optional(mut self, outer_optional: bool) -> Self {
        self.outer_optional = outer_optional;
        self
    }

    /// Sets whether collections require initializers.
    #[must_use]
    pub const fn require_initializers(mut self, require_initializers: bool) -> Self {
        self.require_initializers = require_initializers;
        self
    }

    /// Sets whether the plain function overload is being generated.
    #[must_use]
    pub const fn inputless(mut self, inputless: bool) -> Self {
        self.inside_inputless_overload = inputless;
        self
    }
}

/// Maps schema types of one package to target-language shapes.
#[derive(Debug)]
pub struct TypeMapper<'a> {
    package: &'a Package,
    java: JavaPackageInfo,
    config: &'a GeneratorConfig,
}

impl<'a> TypeMapper<'a> {
    /// Creates a new mapper for `package`.
    ///
    /// # Errors
    /// Returns `CodegenError::LanguageOptions` if the package's `language.java`
    /// block is malformed.
    pub fn new(package: &'a Package, config: &'a GeneratorConfig) -> Result<Self, CodegenError> {
        let java = config.java_info(package)?;
        Ok(Self {
            package,
            java,
            config,
        })
    }

    /// Returns the package being generated.
    #[must_use]
    pub fn package(&self) -> &'a Package {
        self.package
    }

    /// Returns the generator configuration.
    #[must_use]
    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Returns the effective Java options of the package.
    #[must_use]
    pub fn java(&self) -> &JavaPackageInfo {
        &self.java
    }

    /// Returns the root namespace of the package being generated.
    #[must_use]
    pub fn root_package(&self) -> Fqn {
        self.java.root_package(&self.package.name)
    }

    /// Returns the namespace a token's members are generated into. Tokens
    /// of foreign packages use that package's naming options.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` if the token is malformed.
    pub fn module_package(&self, token: &str) -> Result<Fqn, CodegenError> {
        let parsed = Token::parse(token)?;
        Ok(self
            .java_for(&parsed.package)
            .module_package(&parsed.package, parsed.module.as_deref()))
    }

    fn java_for(&self, package_name: &str) -> JavaPackageInfo {
        if package_name == self.package.name {
            return self.java.clone();
        }
        self.config
            .foreign_packages
            .get(package_name)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the class generated for an object type in a direction.
    ///
    /// Output classes always come from the plain shape, so the returned
    /// entry's source type is normalized accordingly.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` if the token is malformed.
    pub fn object_class(
        &self,
        id: &ObjectTypeId,
        direction: Direction,
    ) -> Result<ClassQueueEntry, CodegenError> {
        let name = class_ident(&Token::parse(&id.token)?.name);
        let module = self.module_package(&id.token)?;
        let (namespace, class_name, source_type) = match direction {
            Direction::Output => (OUTPUTS_NAMESPACE, name, id.with_input_shape(false)),
            Direction::Input if id.input_shape => (INPUTS_NAMESPACE, format!("{name}Args"), id.clone()),
            Direction::Input => (INPUTS_NAMESPACE, format!("{name}PlainArgs"), id.clone()),
        };
        Ok(ClassQueueEntry {
            target_package: module.append(namespace),
            class_name,
            source_type,
            direction,
        })
    }

    /// Returns the class of an enum type.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` if the token is malformed.
    pub fn enum_class(&self, token: &str) -> Result<Fqn, CodegenError> {
        let name = class_ident(&Token::parse(token)?.name);
        Ok(self.module_package(token)?.append(ENUMS_NAMESPACE).append(name))
    }

    /// Returns the class of a resource.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` if the token is malformed.
    pub fn resource_class(&self, token: &str) -> Result<Fqn, CodegenError> {
        let parsed = Token::parse(token)?;
        if parsed.is_provider() {
            return Ok(self
                .java_for(&parsed.name)
                .root_package(&parsed.name)
                .append(PROVIDER_CLASS));
        }
        Ok(self.module_package(token)?.append(class_ident(&parsed.name)))
    }

    /// Finds the enum type generated as `class`, if any.
    #[must_use]
    pub fn enum_by_class(&self, class: &Fqn) -> Option<&'a EnumType> {
        let package = self.package;
        package.types.values().find_map(|def| match def {
            TypeDef::Enum(e) if self.enum_class(&e.token).ok().as_ref() == Some(class) => Some(e),
            _ => None,
        })
    }

    /// Computes the shape of a schema type.
    ///
    /// Returns the shape together with every same-package object class the
    /// shape references.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownType` if a same-package object type is
    /// missing from the package, or `CodegenError::Parse` for malformed
    /// tokens.
    pub fn type_shape(
        &self,
        t: &SchemaType,
        opts: ShapeOptions,
    ) -> Result<(TypeShape, Vec<ClassQueueEntry>), CodegenError> {
        let mut discovered = Vec::new();
        let plain;
        let t = if opts.inside_inputless_overload {
            plain = t.plain_shape();
            &plain
        } else {
            t
        };
        let shape = self.shape(t, opts, false, &mut discovered)?;
        let shape = if opts.outer_optional {
            shape
        } else {
            match shape.un_optional() {
                (true, inner) => {
                    let mut inner = inner;
                    for annotation in &shape.annotations {
                        inner = inner.annotated(annotation.clone());
                    }
                    inner.nullable()
                }
                (false, shape) => shape,
            }
        };
        Ok((shape, discovered))
    }

    // `wrapped` is set below an `Output`; nested input wrappers collapse
    // into the outer one.
    fn shape(
        &self,
        t: &SchemaType,
        opts: ShapeOptions,
        wrapped: bool,
        discovered: &mut Vec<ClassQueueEntry>,
    ) -> Result<TypeShape, CodegenError> {
        match t {
            SchemaType::Input(elem) => {
                if opts.inside_inputless_overload || wrapped {
                    return self.shape(elem, opts, wrapped, discovered);
                }
                let opts = ShapeOptions { input: true, ..opts };
                let inner = self.shape(elem, opts, true, discovered)?;
                Ok(TypeShape::output(inner))
            }
            SchemaType::Optional(elem) => {
                let inner = self.shape(elem, opts, wrapped, discovered)?;
                let is_collection = inner.is(&known::list()) || inner.is(&known::map());
                if inner.is(&known::output()) || (is_collection && !opts.require_initializers) {
                    Ok(inner.nullable())
                } else {
                    Ok(TypeShape::optional(inner))
                }
            }
            SchemaType::Array(elem) => {
                let elem = self.shape(elem, opts.require_initializers(false), wrapped, discovered)?;
                Ok(TypeShape::list(elem))
            }
            SchemaType::Map(elem) => {
                let elem = self.shape(elem, opts.require_initializers(false), wrapped, discovered)?;
                Ok(TypeShape::map(elem))
            }
            SchemaType::Object(id) => self.object_shape(id, opts, discovered),
            SchemaType::Enum { token, .. } => {
                if self.package.owns(token) && self.package.enum_type(token).is_none() {
                    return Err(CodegenError::unknown_type(token, "enum reference"));
                }
                Ok(TypeShape::of(self.enum_class(token)?))
            }
            SchemaType::ResourceRef { token } => Ok(TypeShape::of(self.resource_class(token)?)),
            SchemaType::Token { underlying, .. } => {
                self.shape(underlying, opts, wrapped, discovered)
            }
            SchemaType::Union(elements) => self.union_shape(elements, opts, wrapped, discovered),
            SchemaType::Primitive(primitive) => Ok(primitive_shape(*primitive)),
        }
    }

    fn object_shape(
        &self,
        id: &ObjectTypeId,
        opts: ShapeOptions,
        discovered: &mut Vec<ClassQueueEntry>,
    ) -> Result<TypeShape, CodegenError> {
        let (id, direction) = if !opts.input {
            (id.with_input_shape(false), Direction::Output)
        } else if opts.inside_inputless_overload {
            (id.with_input_shape(false), Direction::Input)
        } else {
            (id.clone(), Direction::Input)
        };
        let entry = self.object_class(&id, direction)?;
        let shape = TypeShape::of(entry.fqn());
        if self.package.owns(&id.token) {
            if self.package.object(&id).is_none() {
                return Err(CodegenError::unknown_type(&id.token, "object reference"));
            }
            discovered.push(entry);
        }
        Ok(shape)
    }

    fn union_shape(
        &self,
        elements: &[SchemaType],
        opts: ShapeOptions,
        wrapped: bool,
        discovered: &mut Vec<ClassQueueEntry>,
    ) -> Result<TypeShape, CodegenError> {
        if !opts.input {
            let widened = elements.iter().find_map(|e| match e {
                SchemaType::Enum { element_type, .. } => Some(*element_type),
                _ => None,
            });
            if let Some(primitive) = widened {
                return Ok(primitive_shape(primitive));
            }
        }

        let mut kept: Vec<TypeShape> = Vec::new();
        let mut rendered: Vec<String> = Vec::new();
        for element in elements {
            let shape =
                self.shape(element, opts.require_initializers(false), wrapped, discovered)?;
            let code = shape.to_qualified_code();
            if !rendered.contains(&code) {
                rendered.push(code);
                kept.push(shape);
            }
        }

        match kept.len() {
            0 => Ok(TypeShape::object()),
            1 => Ok(kept.remove(0)),
            2 => {
                let right = kept.remove(1);
                let left = kept.remove(0);
                Ok(TypeShape::either(left, right))
            }
            _ => {
                let alternatives: Vec<String> = kept.iter().map(TypeShape::to_simple_code).collect();
                Ok(TypeShape::object().annotated(format!("/* {} */", alternatives.join(" | "))))
            }
        }
    }
}

/// Returns the fixed shape of a primitive.
#[must_use]
pub fn primitive_shape(primitive: Primitive) -> TypeShape {
    TypeShape::of(match primitive {
        Primitive::Bool => known::boolean(),
        Primitive::Int => known::integer(),
        Primitive::Number => known::double(),
        Primitive::String => known::string(),
        Primitive::Json => known::json_element(),
        Primitive::Any => known::object(),
        Primitive::Asset => known::asset_or_archive(),
        Primitive::Archive => known::archive(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::Imports;
    use sdkgen_schema::{EnumElement, ObjectType, Property};
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
        package.types.insert(
            "pkg:index:Color".to_string(),
            TypeDef::Enum(EnumType {
                token: "pkg:index:Color".to_string(),
                description: None,
                element_type: Primitive::String,
                elements: vec![EnumElement {
                    name: Some("Red".to_string()),
                    value: json!("red"),
                    description: None,
                    deprecation_message: None,
                }],
            }),
        );
        package
    }

    fn render(shape: &TypeShape) -> String {
        let mut imports = Imports::new(Fqn::parse("com.pulumi.pkg.Owner"));
        shape.to_code(&mut imports).expect("Failed to render")
    }

    fn int() -> SchemaType {
        SchemaType::Primitive(Primitive::Int)
    }

    #[test]
    fn test_primitives() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let (shape, discovered) = mapper
            .type_shape(&int(), ShapeOptions::output())
            .expect("shape");
        assert_eq!(render(&shape), "Integer");
        assert!(discovered.is_empty());
    }

    #[test]
    fn test_input_wraps_in_output_once() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let t = SchemaType::Input(Box::new(SchemaType::Input(Box::new(int()))));
        let (shape, _) = mapper.type_shape(&t, ShapeOptions::input()).expect("shape");
        assert_eq!(render(&shape), "Output<Integer>");

        let nested = SchemaType::Array(Box::new(int())).input_shape();
        let (shape, _) = mapper.type_shape(&nested, ShapeOptions::input()).expect("shape");
        assert_eq!(render(&shape), "Output<List<Integer>>");
    }

    #[test]
    fn test_optional_rules() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");

        let optional_int = int().optional();
        let (shape, _) = mapper
            .type_shape(&optional_int, ShapeOptions::output().outer_optional(true))
            .expect("shape");
        assert_eq!(render(&shape), "Optional<Integer>");

        let (shape, _) = mapper
            .type_shape(&optional_int, ShapeOptions::output())
            .expect("shape");
        assert_eq!(render(&shape), "@Nullable Integer");

        let optional_list = SchemaType::Array(Box::new(int())).optional();
        let (shape, _) = mapper
            .type_shape(&optional_list, ShapeOptions::output().outer_optional(true))
            .expect("shape");
        assert_eq!(render(&shape), "@Nullable List<Integer>");

        let (shape, _) = mapper
            .type_shape(
                &optional_list,
                ShapeOptions::output()
                    .outer_optional(true)
                    .require_initializers(true),
            )
            .expect("shape");
        assert_eq!(render(&shape), "Optional<List<Integer>>");

        let optional_input = int().optional().input_shape();
        let (shape, _) = mapper
            .type_shape(&optional_input, ShapeOptions::input().outer_optional(true))
            .expect("shape");
        assert_eq!(render(&shape), "@Nullable Output<Integer>");
    }

    #[test]
    fn test_object_directions_and_discovery() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let part = SchemaType::Object(ObjectTypeId::plain("pkg:mod:Part"));

        let (shape, discovered) = mapper.type_shape(&part, ShapeOptions::output()).expect("shape");
        assert_eq!(shape.to_qualified_code(), "com.pulumi.pkg.mod.outputs.Part");
        assert_eq!(discovered.len(), 1);
        assert_eq!(discovered[0].direction, Direction::Output);

        let (shape, discovered) = mapper
            .type_shape(&part.input_shape(), ShapeOptions::input())
            .expect("shape");
        assert_eq!(
            shape.to_qualified_code(),
            "com.pulumi.core.Output<com.pulumi.pkg.mod.inputs.PartArgs>"
        );
        assert!(discovered[0].source_type.input_shape);

        let (shape, discovered) = mapper
            .type_shape(&part.input_shape(), ShapeOptions::input().inputless(true))
            .expect("shape");
        assert_eq!(shape.to_qualified_code(), "com.pulumi.pkg.mod.inputs.PartPlainArgs");
        assert!(!discovered[0].source_type.input_shape);
    }

    #[test]
    fn test_foreign_object_is_not_discovered() {
        let package = package();
        let config = GeneratorConfig::builder()
            .foreign_package(
                "other",
                JavaPackageInfo {
                    base_package: Some("org.other".to_string()),
                    ..JavaPackageInfo::default()
                },
            )
            .build();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let foreign = SchemaType::Object(ObjectTypeId::plain("other:net:Subnet"));
        let (shape, discovered) = mapper
            .type_shape(&foreign, ShapeOptions::output())
            .expect("shape");
        assert_eq!(shape.to_qualified_code(), "org.other.other.net.outputs.Subnet");
        assert!(discovered.is_empty());
    }

    #[test]
    fn test_missing_local_object_fails() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let missing = SchemaType::Object(ObjectTypeId::plain("pkg:mod:Missing"));
        assert!(matches!(
            mapper.type_shape(&missing, ShapeOptions::output()),
            Err(CodegenError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_missing_local_enum_fails() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let missing = SchemaType::Enum {
            token: "pkg:index:Shade".to_string(),
            element_type: Primitive::String,
        };
        assert!(matches!(
            mapper.type_shape(&missing, ShapeOptions::output()),
            Err(CodegenError::UnknownType { .. })
        ));

        let foreign = SchemaType::Enum {
            token: "other:index:Shade".to_string(),
            element_type: Primitive::String,
        };
        let (shape, _) = mapper.type_shape(&foreign, ShapeOptions::output()).expect("shape");
        assert_eq!(shape.to_qualified_code(), "com.pulumi.other.enums.Shade");
    }

    #[test]
    fn test_inputless_overload_uses_plain_objects() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let t = SchemaType::Input(Box::new(SchemaType::Object(
            ObjectTypeId::plain("pkg:mod:Part").with_input_shape(true),
        )));
        let opts = ShapeOptions {
            inside_inputless_overload: true,
            ..ShapeOptions::input()
        };
        let (shape, discovered) = mapper.type_shape(&t, opts).expect("shape");
        assert_eq!(shape.to_qualified_code(), "com.pulumi.pkg.mod.inputs.PartPlainArgs");
        assert_eq!(discovered.len(), 1);
        assert!(!discovered[0].source_type.input_shape);
    }

    #[test]
    fn test_union_collapse() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");

        let same = SchemaType::Union(vec![
            SchemaType::STRING,
            SchemaType::Token {
                token: "pkg:index:Name".to_string(),
                underlying: Box::new(SchemaType::STRING),
            },
        ]);
        let (shape, _) = mapper.type_shape(&same, ShapeOptions::input()).expect("shape");
        assert_eq!(render(&shape), "String");

        let two = SchemaType::Union(vec![SchemaType::STRING, int()]);
        let (shape, _) = mapper.type_shape(&two, ShapeOptions::input()).expect("shape");
        assert_eq!(render(&shape), "Either<String,Integer>");

        let three = SchemaType::Union(vec![
            SchemaType::STRING,
            int(),
            SchemaType::Primitive(Primitive::Bool),
        ]);
        let (shape, _) = mapper.type_shape(&three, ShapeOptions::input()).expect("shape");
        assert!(shape.is(&known::object()));
        assert_eq!(render(&shape), "/* String | Integer | Boolean */ Object");
    }

    #[test]
    fn test_union_with_enum_widens_on_output() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let union = SchemaType::Union(vec![
            SchemaType::Enum {
                token: "pkg:index:Color".to_string(),
                element_type: Primitive::String,
            },
            SchemaType::STRING,
        ]);
        let (shape, _) = mapper.type_shape(&union, ShapeOptions::output()).expect("shape");
        assert_eq!(render(&shape), "String");

        let (shape, _) = mapper.type_shape(&union, ShapeOptions::input()).expect("shape");
        assert_eq!(
            shape.to_qualified_code(),
            "com.pulumi.core.Either<com.pulumi.pkg.enums.Color,java.lang.String>"
        );
    }

    #[test]
    fn test_resource_and_provider_refs() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        assert_eq!(
            mapper.resource_class("pkg:mod:Widget").expect("class").to_string(),
            "com.pulumi.pkg.mod.Widget"
        );
        assert_eq!(
            mapper
                .resource_class("pulumi:providers:pkg")
                .expect("class")
                .to_string(),
            "com.pulumi.pkg.Provider"
        );
    }

    #[test]
    fn test_enum_by_class() {
        let package = package();
        let config = GeneratorConfig::default();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let class = mapper.enum_class("pkg:index:Color").expect("class");
        assert_eq!(class.to_string(), "com.pulumi.pkg.enums.Color");
        assert_eq!(
            mapper.enum_by_class(&class).map(|e| e.token.as_str()),
            Some("pkg:index:Color")
        );
    }
}
