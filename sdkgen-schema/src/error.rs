//! Error types for schema parsing, binding and validation.

use thiserror::Error;

/// Error type for schema document parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decoding error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed type token.
    #[error("invalid token '{token}': {reason}")]
    InvalidToken {
        /// Offending token.
        token: String,
        /// Why the token was rejected.
        reason: String,
    },

    /// A `$ref` that does not follow any supported reference form.
    #[error("unsupported reference '{reference}' in '{context}'")]
    UnsupportedRef {
        /// The reference string.
        reference: String,
        /// Where the reference was found.
        context: String,
    },

    /// A type spec with neither `type`, `$ref` nor `oneOf`.
    #[error("type in '{context}' has no type, $ref or oneOf")]
    MissingType {
        /// Where the type spec was found.
        context: String,
    },

    /// Unknown primitive type name.
    #[error("unknown primitive type '{name}' in '{context}'")]
    UnknownPrimitive {
        /// Primitive name.
        name: String,
        /// Where the type spec was found.
        context: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema binding and validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Type not found.
    #[error("type '{token}' referenced from '{context}' not found")]
    TypeNotFound {
        /// Token of the missing type.
        token: String,
        /// Where the reference was found.
        context: String,
    },

    /// Required field listed but not declared.
    #[error("required property '{property}' of '{owner}' is not declared")]
    MissingRequiredProperty {
        /// Owner token.
        owner: String,
        /// Property name.
        property: String,
    },

    /// Invalid enum value.
    #[error("invalid enum value '{value}' for enum '{enum_name}'")]
    InvalidEnumValue {
        /// Enum token.
        enum_name: String,
        /// Invalid value.
        value: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates an invalid token error.
    pub fn invalid_token(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unsupported reference error.
    pub fn unsupported_ref(reference: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnsupportedRef {
            reference: reference.into(),
            context: context.into(),
        }
    }
}

impl SchemaError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a type-not-found error.
    pub fn type_not_found(token: impl Into<String>, context: impl Into<String>) -> Self {
        Self::TypeNotFound {
            token: token.into(),
            context: context.into(),
        }
    }
}
