//! Package schema document parser.
//!
//! Documents may be written in JSON or YAML. JSON is detected by a leading
//! `{`; everything else goes through the YAML decoder.

use crate::document::PackageSpec;
use crate::error::ParseError;
use std::path::Path;

/// Parses a package schema document from a string.
///
/// # Arguments
/// * `text` - JSON or YAML document content
///
/// # Errors
/// Returns `ParseError` if the document is not valid JSON/YAML or does not
/// match the document structure.
pub fn parse_package_spec(text: &str) -> Result<PackageSpec, ParseError> {
    if text.trim_start().starts_with('{') {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Reads and parses a package schema document from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_package_file(path: &Path) -> Result<PackageSpec, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_package_spec(&text)
}
