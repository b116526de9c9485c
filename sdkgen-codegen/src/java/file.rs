//! Per-file source assembly.

use crate::error::CodegenError;
use crate::imports::Imports;
use crate::mapper::{ShapeOptions, TypeMapper};
use crate::names::Fqn;
use crate::queue::ClassQueueEntry;
use crate::shape::TypeShape;
use sdkgen_schema::SchemaType;

/// Root directory of generated Java sources.
pub const JAVA_SOURCE_ROOT: &str = "src/main/java";
/// Root directory of generated resource files.
pub const RESOURCE_ROOT: &str = "src/main/resources";

/// A rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the output root.
    pub path: String,
    /// File contents.
    pub contents: String,
}

/// A rendered class plus the object classes it referenced.
#[derive(Debug, Clone)]
pub struct Emitted {
    /// The class file.
    pub file: SourceFile,
    /// Same-package object classes referenced by the file.
    pub discovered: Vec<ClassQueueEntry>,
}

/// Returns the two-line header placed on top of every generated file.
#[must_use]
pub fn header(tool_name: &str) -> String {
    format!(
        "// *** WARNING: this file was generated by {tool_name}. ***\n\
         // *** Do not edit by hand unless you're certain you know what you are doing! ***\n"
    )
}

/// Builder for one Java source file.
///
/// Owns the file's import table and collects the object classes discovered
/// while rendering types.
pub struct JavaFile<'m> {
    mapper: &'m TypeMapper<'m>,
    imports: Imports,
    body: String,
    discovered: Vec<ClassQueueEntry>,
}

impl<'m> JavaFile<'m> {
    /// Creates a new file whose public type is `class`.
    #[must_use]
    pub fn new(mapper: &'m TypeMapper<'m>, class: Fqn) -> Self {
        let imports =
            Imports::with_implicit(class, mapper.config().implicit_namespaces.clone());
        Self {
            mapper,
            imports,
            body: String::new(),
            discovered: Vec::new(),
        }
    }

    /// Returns the simple name of the file's public type.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.imports.owner().base()
    }

    /// Returns the type mapper.
    #[must_use]
    pub fn mapper(&self) -> &'m TypeMapper<'m> {
        self.mapper
    }

    /// Maps a schema type and records the classes it references.
    ///
    /// # Errors
    /// See [`TypeMapper::type_shape`].
    pub fn shape(&mut self, t: &SchemaType, opts: ShapeOptions) -> Result<TypeShape, CodegenError> {
        let (shape, discovered) = self.mapper.type_shape(t, opts)?;
        self.discovered.extend(discovered);
        Ok(shape)
    }

    /// Renders a shape against this file's imports.
    ///
    /// # Errors
    /// See [`TypeShape::to_code`].
    pub fn code(&mut self, shape: &TypeShape) -> Result<String, CodegenError> {
        shape.to_code(&mut self.imports)
    }

    /// Renders a runtime type descriptor against this file's imports.
    ///
    /// # Errors
    /// See [`TypeShape::to_code`].
    pub fn descriptor(&mut self, shape: &TypeShape) -> Result<String, CodegenError> {
        shape.to_descriptor(&mut self.imports)
    }

    /// Returns the text referring to `fqn` in this file.
    ///
    /// # Errors
    /// Returns `CodegenError::UnqualifiedImport` for names without namespace.
    pub fn reference(&mut self, fqn: &Fqn) -> Result<String, CodegenError> {
        self.imports.reference(fqn)
    }

    /// Appends text to the class body.
    pub fn push_str(&mut self, text: &str) {
        self.body.push_str(text);
    }

    /// Assembles the file.
    #[must_use]
    pub fn finish(self) -> Emitted {
        let mut contents = header(&self.mapper.config().tool_name);
        contents.push('\n');
        let class = self.imports.owner();
        contents.push_str(&format!("package {};\n\n", class.package()));
        let path = format!("{JAVA_SOURCE_ROOT}/{}", class.to_file_path());
        let imports = self.imports.render();
        if !imports.is_empty() {
            contents.push_str(&imports);
            contents.push('\n');
        }
        contents.push_str(&self.body);
        Emitted {
            file: SourceFile { path, contents },
            discovered: self.discovered,
        }
    }
}

/// Writes a Javadoc block and a `@Deprecated` marker.
///
/// Nothing is written when both the description and the deprecation message
/// are absent.
pub fn write_doc(
    out: &mut String,
    indent: &str,
    description: Option<&str>,
    deprecation: Option<&str>,
) {
    let description = description.map(str::trim).filter(|d| !d.is_empty());
    if description.is_none() && deprecation.is_none() {
        return;
    }
    out.push_str(&format!("{indent}/**\n"));
    if let Some(description) = description {
        for line in description.lines() {
            write_doc_line(out, indent, line);
        }
    }
    if let Some(message) = deprecation {
        if description.is_some() {
            out.push_str(&format!("{indent} *\n"));
        }
        out.push_str(&format!("{indent} * @deprecated\n"));
        for line in message.lines() {
            write_doc_line(out, indent, line);
        }
    }
    out.push_str(&format!("{indent} */\n"));
    if deprecation.is_some() {
        out.push_str(&format!("{indent}@Deprecated\n"));
    }
}

fn write_doc_line(out: &mut String, indent: &str, line: &str) {
    let line = comment_safe(line.trim_end());
    if line.is_empty() {
        out.push_str(&format!("{indent} *\n"));
    } else {
        out.push_str(&format!("{indent} * {line}\n"));
    }
}

fn comment_safe(text: &str) -> String {
    text.replace("*/", "*&#47;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use pretty_assertions::assert_eq;
    use sdkgen_schema::Package;

    #[test]
    fn test_finish_layout() {
        let package = Package::new("pkg");
        let config = GeneratorConfig::builder().tool_name("unit").build();
        let mapper = TypeMapper::new(&package, &config).expect("mapper");
        let mut file = JavaFile::new(&mapper, Fqn::parse("com.pulumi.pkg.Thing"));
        let list = file.reference(&Fqn::parse("java.util.List")).expect("ref");
        file.push_str(&format!("public final class Thing {{ {list}<String> items; }}\n"));

        let emitted = file.finish();
        assert_eq!(emitted.file.path, "src/main/java/com/pulumi/pkg/Thing.java");
        assert_eq!(
            emitted.file.contents,
            "// *** WARNING: this file was generated by unit. ***\n\
             // *** Do not edit by hand unless you're certain you know what you are doing! ***\n\
             \n\
             package com.pulumi.pkg;\n\
             \n\
             import java.util.List;\n\
             \n\
             public final class Thing { List<String> items; }\n"
        );
    }

    #[test]
    fn test_write_doc() {
        let mut out = String::new();
        write_doc(&mut out, "    ", Some("First line.\n\nEnds */ here."), Some("Use v2."));
        assert_eq!(
            out,
            "    /**\n\
             \x20    * First line.\n\
             \x20    *\n\
             \x20    * Ends *&#47; here.\n\
             \x20    *\n\
             \x20    * @deprecated\n\
             \x20    * Use v2.\n\
             \x20    */\n\
             \x20   @Deprecated\n"
        );
    }

    #[test]
    fn test_write_doc_empty() {
        let mut out = String::new();
        write_doc(&mut out, "", Some("  "), None);
        assert!(out.is_empty());
    }
}
