//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] sdkgen_schema::ParseError),

    /// Schema validation or binding error.
    #[error("schema error: {0}")]
    Schema(#[from] sdkgen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Language extension block could not be decoded.
    #[error("invalid language options: {0}")]
    LanguageOptions(#[from] serde_json::Error),

    /// An import was requested for a name without a namespace.
    #[error("refusing to import unqualified name '{name}'")]
    UnqualifiedImport {
        /// The unqualified name.
        name: String,
    },

    /// The class queue was drained past empty.
    #[error("class queue is empty")]
    QueueEmpty,

    /// Two classes were emitted to the same file.
    #[error("file '{path}' generated more than once")]
    DuplicateFile {
        /// Relative file path.
        path: String,
    },

    /// A default value does not fit its target type.
    #[error("default value for property '{property}': {message}")]
    DefaultValue {
        /// Property wire name.
        property: String,
        /// What went wrong.
        message: String,
    },

    /// A default value fits neither branch of an `Either`.
    #[error(
        "default value for property '{property}' fits neither branch: {first}; {second}"
    )]
    EitherDefault {
        /// Property wire name.
        property: String,
        /// Failure against the left branch.
        first: Box<CodegenError>,
        /// Failure against the right branch.
        second: Box<CodegenError>,
    },

    /// An enum default with no matching element.
    #[error("default value {value} of property '{property}' matches no element of enum '{token}'")]
    UnknownEnumDefault {
        /// Property wire name.
        property: String,
        /// Enum token.
        token: String,
        /// Rendered default value.
        value: String,
    },

    /// Unknown type reference.
    #[error("unknown type '{type_name}' in '{context}'")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Where it was referenced.
        context: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a default-value error for a property.
    pub fn default_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DefaultValue {
            property: property.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown type error.
    pub fn unknown_type(type_name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            context: context.into(),
        }
    }
}
