//! Package-level generation driver.
//!
//! Renders every top-level member of a package, then drains the class queue
//! until every object class referenced anywhere in the output has a file.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::java::file::SourceFile;
use crate::java::properties::InputClass;
use crate::java::{
    ConfigGenerator, Emitted, EnumGenerator, FunctionGenerator, PropertyGenerator,
    ResourceGenerator, UtilitiesGenerator,
};
use crate::mapper::TypeMapper;
use crate::names::{Fqn, known};
use crate::queue::{ClassQueue, ClassQueueEntry, Direction};
use sdkgen_schema::{Diagnostic, Function, Package, TypeDef};
use std::collections::BTreeMap;
use std::path::Path;

/// The files produced for one package, keyed by relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    files: BTreeMap<String, Vec<u8>>,
    /// Non-fatal findings collected while loading the schema.
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedFiles {
    /// Creates an empty file set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateFile` if the path is already taken.
    pub fn insert(&mut self, file: SourceFile) -> Result<(), CodegenError> {
        if self.files.contains_key(&file.path) {
            return Err(CodegenError::DuplicateFile { path: file.path });
        }
        self.files.insert(file.path, file.contents.into_bytes());
        Ok(())
    }

    /// Returns the raw contents of a file.
    #[must_use]
    pub fn contents(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Returns the contents of a file as text.
    #[must_use]
    pub fn text(&self, path: &str) -> Option<&str> {
        self.contents(path)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Iterates over the file paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Iterates over `(path, contents)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files
            .iter()
            .map(|(path, contents)| (path.as_str(), contents.as_slice()))
    }

    /// Returns the number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no file was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Writes every file below `dir`, creating directories as needed.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if a directory or file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<(), CodegenError> {
        for (path, contents) in &self.files {
            let target = dir.join(path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, contents)?;
        }
        tracing::info!(files = self.files.len(), dir = %dir.display(), "wrote generated files");
        Ok(())
    }
}

/// Java SDK generator for one package.
pub struct Generator<'a> {
    package: &'a Package,
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(package: &'a Package, config: &'a GeneratorConfig) -> Self {
        Self { package, config }
    }

    /// Generates every file of the package.
    ///
    /// # Errors
    /// Returns `CodegenError` if a type cannot be mapped, a default value
    /// does not fit, or two classes land on the same path.
    pub fn generate(&self) -> Result<GeneratedFiles, CodegenError> {
        let mapper = TypeMapper::new(self.package, self.config)?;
        let mut files = GeneratedFiles::new();
        let mut queue = ClassQueue::new();
        tracing::info!(package = %self.package.name, "generating package");

        let resources = ResourceGenerator::new(&mapper);
        for resource in self.package.provider.iter().chain(&self.package.resources) {
            tracing::debug!(token = %resource.token, "generating resource");
            for emitted in resources.generate(resource)? {
                Self::accept(&mut files, &mut queue, emitted)?;
            }
        }

        let functions = FunctionGenerator::new(&mapper);
        let mut grouped: BTreeMap<Fqn, Vec<&Function>> = BTreeMap::new();
        for function in &self.package.functions {
            grouped
                .entry(functions.functions_class(&function.token)?)
                .or_default()
                .push(function);
        }
        for (class, members) in &grouped {
            tracing::debug!(class = %class, functions = members.len(), "generating functions");
            for emitted in functions.generate(class, members)? {
                Self::accept(&mut files, &mut queue, emitted)?;
            }
        }

        let enums = EnumGenerator::new(&mapper);
        for def in self.package.types.values() {
            if let TypeDef::Enum(enum_type) = def {
                Self::accept(&mut files, &mut queue, enums.generate(enum_type)?)?;
            }
        }

        if !self.package.config.is_empty() {
            let emitted = ConfigGenerator::new(&mapper).generate()?;
            Self::accept(&mut files, &mut queue, emitted)?;
        }

        let utilities = UtilitiesGenerator::new(&mapper);
        Self::accept(&mut files, &mut queue, utilities.generate()?)?;
        for resource_file in utilities.resources()? {
            files.insert(resource_file)?;
        }

        let properties = PropertyGenerator::new(&mapper);
        while !queue.is_empty() {
            let entry = queue.dequeue()?;
            let emitted = self.object_class(&properties, &entry)?;
            Self::accept(&mut files, &mut queue, emitted)?;
        }

        tracing::info!(files = files.len(), "generated package");
        Ok(files)
    }

    fn accept(
        files: &mut GeneratedFiles,
        queue: &mut ClassQueue,
        emitted: Emitted,
    ) -> Result<(), CodegenError> {
        queue.extend(emitted.discovered);
        files.insert(emitted.file)
    }

    fn object_class(
        &self,
        properties: &PropertyGenerator<'_>,
        entry: &ClassQueueEntry,
    ) -> Result<Emitted, CodegenError> {
        let object = self.package.object(&entry.source_type).ok_or_else(|| {
            CodegenError::unknown_type(&entry.source_type.token, entry.fqn().to_string())
        })?;
        tracing::debug!(class = %entry.fqn(), "generating object class");
        match entry.direction {
            Direction::Output => properties.output_class(
                entry.fqn(),
                object.description.as_deref(),
                &object.properties,
            ),
            Direction::Input => {
                let input_shape = entry.source_type.input_shape;
                let fields = object.properties_for(input_shape);
                properties.input_class(&InputClass {
                    class: entry.fqn(),
                    description: object.description.as_deref(),
                    properties: &fields,
                    base: if input_shape {
                        known::resource_args()
                    } else {
                        known::invoke_args()
                    },
                    inputless: !input_shape,
                })
            }
        }
    }
}

/// Generates every file of a bound package.
///
/// # Errors
/// Returns `CodegenError` if generation fails.
pub fn generate(package: &Package, config: &GeneratorConfig) -> Result<GeneratedFiles, CodegenError> {
    Generator::new(package, config).generate()
}

/// Loads a schema document and generates its files.
///
/// Diagnostics from the dedup pass are attached to the result.
///
/// # Errors
/// Returns `CodegenError` if loading or generation fails.
pub fn generate_from_str(
    text: &str,
    config: &GeneratorConfig,
) -> Result<GeneratedFiles, CodegenError> {
    let (package, diagnostics) = sdkgen_schema::load_package(text)?;
    for diagnostic in &diagnostics {
        tracing::warn!(summary = %diagnostic.summary, "schema diagnostic");
    }
    let mut files = generate(&package, config)?;
    files.diagnostics = diagnostics;
    Ok(files)
}

/// Reads a schema file and generates its files.
///
/// # Errors
/// Returns `CodegenError` if reading, loading or generation fails.
pub fn generate_from_file(
    path: &Path,
    config: &GeneratorConfig,
) -> Result<GeneratedFiles, CodegenError> {
    let text = std::fs::read_to_string(path)?;
    generate_from_str(&text, config)
}
