//! Target-language type shapes.
//!
//! A [`TypeShape`] is an immutable tree of generic types: a base name, its
//! type parameters, and annotations rendered in front of the type. Shapes are
//! cheap to rebuild and are never cached across calls.

use crate::error::CodegenError;
use crate::imports::Imports;
use crate::names::{Fqn, known};

/// Annotation marking a value that may be absent.
pub const NULLABLE: &str = "@javax.annotation.Nullable";

/// A target-language type: base name, type parameters and annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeShape {
    /// Base type name.
    pub base: Fqn,
    /// Generic type parameters.
    pub parameters: Vec<TypeShape>,
    /// Annotations and documentation comments rendered before the type.
    pub annotations: Vec<String>,
}

impl TypeShape {
    /// Creates a shape without parameters or annotations.
    #[must_use]
    pub fn of(base: Fqn) -> Self {
        Self {
            base,
            parameters: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Creates a parameterized shape.
    #[must_use]
    pub fn generic(base: Fqn, parameters: Vec<TypeShape>) -> Self {
        Self {
            base,
            parameters,
            annotations: Vec::new(),
        }
    }

    /// `java.lang.Object`, the untyped fallback.
    #[must_use]
    pub fn object() -> Self {
        Self::of(known::object())
    }

    /// `java.lang.String`.
    #[must_use]
    pub fn string() -> Self {
        Self::of(known::string())
    }

    /// `List<elem>`.
    #[must_use]
    pub fn list(elem: TypeShape) -> Self {
        Self::generic(known::list(), vec![elem])
    }

    /// `Map<String, elem>`.
    #[must_use]
    pub fn map(elem: TypeShape) -> Self {
        Self::generic(known::map(), vec![Self::string(), elem])
    }

    /// `Optional<inner>`; an already optional shape is returned unchanged.
    #[must_use]
    pub fn optional(inner: TypeShape) -> Self {
        if inner.is(&known::optional()) {
            return inner;
        }
        Self::generic(known::optional(), vec![inner])
    }

    /// `Output<inner>`; an already wrapped shape is returned unchanged.
    #[must_use]
    pub fn output(inner: TypeShape) -> Self {
        if inner.is(&known::output()) {
            return inner;
        }
        Self::generic(known::output(), vec![inner])
    }

    /// `Either<left, right>`.
    #[must_use]
    pub fn either(left: TypeShape, right: TypeShape) -> Self {
        Self::generic(known::either(), vec![left, right])
    }

    /// Returns the shape with an extra annotation, skipping duplicates.
    #[must_use]
    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        let annotation = annotation.into();
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
        self
    }

    /// Returns the shape annotated as nullable.
    #[must_use]
    pub fn nullable(self) -> Self {
        self.annotated(NULLABLE)
    }

    /// Returns true if the root of the shape is `base`.
    #[must_use]
    pub fn is(&self, base: &Fqn) -> bool {
        &self.base == base
    }

    /// Returns true if the shape carries the nullable annotation.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.annotations.iter().any(|a| a == NULLABLE)
    }

    fn un_wrapper(&self, wrapper: &Fqn) -> (bool, TypeShape) {
        match self.parameters.as_slice() {
            [inner] if self.is(wrapper) => (true, inner.clone()),
            _ => (false, self.clone()),
        }
    }

    /// Unwraps `Output<T>` to `T`.
    #[must_use]
    pub fn un_output(&self) -> (bool, TypeShape) {
        self.un_wrapper(&known::output())
    }

    /// Unwraps `Optional<T>` to `T`.
    #[must_use]
    pub fn un_optional(&self) -> (bool, TypeShape) {
        self.un_wrapper(&known::optional())
    }

    /// Unwraps `List<T>` to `T`.
    #[must_use]
    pub fn un_list(&self) -> (bool, TypeShape) {
        self.un_wrapper(&known::list())
    }

    /// Removes the nullable annotation.
    #[must_use]
    pub fn un_nullable(&self) -> (bool, TypeShape) {
        if !self.is_nullable() {
            return (false, self.clone());
        }
        let mut shape = self.clone();
        shape.annotations.retain(|a| a != NULLABLE);
        (true, shape)
    }

    /// Splits `Either<A, B>` into its two branches. A mismatch returns the
    /// original shape as both branches.
    #[must_use]
    pub fn un_either(&self) -> (bool, TypeShape, TypeShape) {
        match self.parameters.as_slice() {
            [left, right] if self.is(&known::either()) => (true, left.clone(), right.clone()),
            _ => (false, self.clone(), self.clone()),
        }
    }

    /// Returns the shape without any annotations at the root.
    #[must_use]
    pub fn without_annotations(&self) -> TypeShape {
        TypeShape {
            annotations: Vec::new(),
            ..self.clone()
        }
    }

    /// Returns the erased (raw) type of the shape.
    #[must_use]
    pub fn erasure(&self) -> &Fqn {
        &self.base
    }

    /// Renders the shape, registering every referenced name in `imports`.
    ///
    /// # Errors
    /// Returns `CodegenError::UnqualifiedImport` if a referenced name has no
    /// namespace and is not in an implicitly available namespace.
    pub fn to_code(&self, imports: &mut Imports) -> Result<String, CodegenError> {
        let mut out = String::new();
        for annotation in &self.annotations {
            match annotation.strip_prefix('@') {
                Some(name) => {
                    out.push('@');
                    out.push_str(&imports.reference(&Fqn::parse(name))?);
                }
                None => out.push_str(annotation),
            }
            out.push(' ');
        }
        out.push_str(&self.to_code_erased(imports)?);
        if !self.parameters.is_empty() {
            let params = self
                .parameters
                .iter()
                .map(|p| p.to_code(imports))
                .collect::<Result<Vec<_>, _>>()?;
            out.push('<');
            out.push_str(&params.join(","));
            out.push('>');
        }
        Ok(out)
    }

    /// Renders only the erased base name.
    ///
    /// # Errors
    /// See [`TypeShape::to_code`].
    pub fn to_code_erased(&self, imports: &mut Imports) -> Result<String, CodegenError> {
        imports.reference(&self.base)
    }

    /// Renders `Base.class` for the erased type.
    ///
    /// # Errors
    /// See [`TypeShape::to_code`].
    pub fn to_class_literal(&self, imports: &mut Imports) -> Result<String, CodegenError> {
        Ok(format!("{}.class", self.to_code_erased(imports)?))
    }

    /// Renders the shape fully qualified, without touching any import table.
    #[must_use]
    pub fn to_qualified_code(&self) -> String {
        let mut out = String::new();
        for annotation in &self.annotations {
            out.push_str(annotation);
            out.push(' ');
        }
        out.push_str(&self.base.to_string());
        if !self.parameters.is_empty() {
            let params: Vec<String> = self
                .parameters
                .iter()
                .map(TypeShape::to_qualified_code)
                .collect();
            out.push('<');
            out.push_str(&params.join(","));
            out.push('>');
        }
        out
    }

    /// Renders the shape with unqualified base names, for documentation.
    #[must_use]
    pub fn to_simple_code(&self) -> String {
        let mut out = self.base.base().to_string();
        if !self.parameters.is_empty() {
            let params: Vec<String> = self
                .parameters
                .iter()
                .map(TypeShape::to_simple_code)
                .collect();
            out.push('<');
            out.push_str(&params.join(","));
            out.push('>');
        }
        out
    }

    /// Renders a runtime `TypeShape` descriptor expression for the shape.
    ///
    /// # Errors
    /// See [`TypeShape::to_code`].
    pub fn to_descriptor(&self, imports: &mut Imports) -> Result<String, CodegenError> {
        let type_shape = imports.reference(&known::type_shape())?;
        let class = self.to_class_literal(imports)?;
        if self.parameters.is_empty() {
            return Ok(format!("{type_shape}.of({class})"));
        }
        let mut out = format!("{type_shape}.builder({class})");
        for param in &self.parameters {
            out.push_str(&format!(".addParameter({})", param.to_descriptor(imports)?));
        }
        out.push_str(".build()");
        Ok(out)
    }

    /// Returns the distinct erased types of the shape in first-seen order and
    /// an index tree over them, as used by the runtime deserializer.
    ///
    /// `Map<String, List<Integer>>` yields `[Map, String, List, Integer]` and
    /// `[0,1,[2,3]]`.
    #[must_use]
    pub fn reified_tree(&self) -> (Vec<Fqn>, String) {
        let mut refs = Vec::new();
        let tree = self.tree_node(&mut refs);
        if self.parameters.is_empty() {
            (refs, format!("[{tree}]"))
        } else {
            (refs, tree)
        }
    }

    fn tree_node(&self, refs: &mut Vec<Fqn>) -> String {
        let index = match refs.iter().position(|r| r == &self.base) {
            Some(index) => index,
            None => {
                refs.push(self.base.clone());
                refs.len() - 1
            }
        };
        if self.parameters.is_empty() {
            return index.to_string();
        }
        let mut parts = vec![index.to_string()];
        parts.extend(self.parameters.iter().map(|p| p.tree_node(refs)));
        format!("[{}]", parts.join(","))
    }
}
