//! # sdkgen
//!
//! Schema-driven Java SDK generator for cloud resource providers.
//!
//! sdkgen reads a package schema document describing resources, invoke
//! functions, object types, enums and configuration, and produces a complete
//! Java source tree against the `com.pulumi` runtime.
//!
//! ## Features
//!
//! - **JSON and YAML schemas** - Parsed, validated and bound into a typed model
//! - **Case-variant dedup** - Types differing only by case are merged
//! - **Input/output shapes** - Object types become `Args` and result classes
//! - **Default values** - Literal and environment defaults rendered per property
//! - **Deterministic output** - Identical schemas produce identical trees
//!
//! ## Quick Start
//!
//! ```ignore
//! use sdkgen::prelude::*;
//!
//! let config = GeneratorConfig::builder().tool_name("my-tool").build();
//! let files = generate_from_file(Path::new("schema.json"), &config)?;
//! files.write_to(Path::new("sdk"))?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema document model, parsing, dedup, validation and binding
//! - [`codegen`] - Type mapping and Java source generation

pub mod prelude;

/// Schema parsing, validation and binding.
pub mod schema {
    pub use sdkgen_schema::*;
}

/// Java code generation from bound packages.
pub mod codegen {
    pub use sdkgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use sdkgen_codegen::{
    CodegenError, GeneratedFiles, Generator, GeneratorConfig, generate, generate_from_file,
    generate_from_str,
};
pub use sdkgen_schema::{Package, SchemaError, load_package};
