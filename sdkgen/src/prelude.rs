//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types.
//!
//! ```ignore
//! use sdkgen::prelude::*;
//! ```

// Schema types
pub use sdkgen_schema::{
    Diagnostic, Function, ObjectType, ObjectTypeId, Package, Property, Resource, SchemaError,
    SchemaType, Severity, load_package,
};

// Codegen types
pub use sdkgen_codegen::{
    CodegenError, GeneratedFiles, Generator, GeneratorBuilder, GeneratorConfig, JavaPackageInfo,
    generate, generate_from_file, generate_from_str,
};
