//! Java source generation modules.

pub mod config;
pub mod defaults;
pub mod enums;
pub mod file;
pub mod functions;
pub mod properties;
pub mod resources;
pub mod utilities;

pub use config::ConfigGenerator;
pub use enums::EnumGenerator;
pub use file::{Emitted, JavaFile, SourceFile};
pub use functions::FunctionGenerator;
pub use properties::PropertyGenerator;
pub use resources::ResourceGenerator;
pub use utilities::UtilitiesGenerator;
