//! # sdkgen Codegen
//!
//! Java SDK generation from bound package schemas.
//!
//! This crate provides:
//! - Schema type to Java type-shape mapping
//! - Per-file import management
//! - Resource, function, object, enum and config class generation
//! - Default-value expression rendering
//! - A deduplicating class queue drained to a fixed point

pub mod config;
pub mod error;
pub mod generator;
pub mod imports;
pub mod java;
pub mod mapper;
pub mod names;
pub mod queue;
pub mod shape;

pub use config::{GeneratorBuilder, GeneratorConfig, JavaPackageInfo};
pub use error::CodegenError;
pub use generator::{GeneratedFiles, Generator, generate, generate_from_file, generate_from_str};
pub use imports::Imports;
pub use mapper::{ShapeOptions, TypeMapper};
pub use names::Fqn;
pub use queue::{ClassQueue, ClassQueueEntry, Direction};
pub use shape::TypeShape;
