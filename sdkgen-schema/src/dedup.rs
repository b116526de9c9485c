//! Merging of type tokens that differ only by case.
//!
//! Many target languages map `pkg:index:fooBar` and `pkg:index:FooBar` to the
//! same class name. When two such types have the same body (descriptions
//! aside) the lexicographically smaller token is kept, the other is deleted,
//! and every `#/types/` reference to it is rewritten. Types whose bodies
//! differ are left alone and reported.

use crate::document::{ComplexTypeSpec, PackageSpec};
use std::collections::BTreeMap;
use std::fmt;

const TYPES_REF: &str = "#/types/";

/// Severity of a non-fatal finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational.
    Info,
    /// Something the author should look at.
    Warning,
}

/// A non-fatal finding reported alongside a result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// One-line summary.
    pub summary: String,
}

impl Diagnostic {
    /// Creates a warning diagnostic.
    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
        }
    }

    /// Creates an informational diagnostic.
    pub fn info(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            summary: summary.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: {}", self.summary)
    }
}

/// Merges case-variant duplicate types in place.
///
/// Returns one diagnostic per rename and one per skipped rename.
pub fn dedup_case_variants(spec: &mut PackageSpec) -> Vec<Diagnostic> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for token in spec.types.keys() {
        groups
            .entry(token.to_lowercase())
            .or_default()
            .push(token.clone());
    }

    let mut renames: BTreeMap<String, String> = BTreeMap::new();
    let mut diagnostics = Vec::new();

    for tokens in groups.values().filter(|tokens| tokens.len() > 1) {
        // Keys come out of the BTreeMap sorted, so the first is the smallest.
        let canonical = &tokens[0];
        let canonical_body = without_descriptions(&spec.types[canonical]);

        for duplicate in &tokens[1..] {
            if without_descriptions(&spec.types[duplicate]) == canonical_body {
                tracing::debug!(from = %duplicate, to = %canonical, "merging case-variant type");
                diagnostics.push(Diagnostic::info(format!(
                    "renamed type '{duplicate}' to '{canonical}'"
                )));
                renames.insert(duplicate.clone(), canonical.clone());
            } else {
                tracing::warn!(
                    "types '{}' and '{}' differ only by case but have different bodies",
                    canonical,
                    duplicate
                );
                diagnostics.push(Diagnostic::warning(format!(
                    "skipped renaming type '{duplicate}' to '{canonical}': type bodies differ"
                )));
            }
        }
    }

    if renames.is_empty() {
        return diagnostics;
    }

    for duplicate in renames.keys() {
        spec.types.remove(duplicate);
    }

    spec.visit_type_specs_mut(&mut |type_spec| {
        let Some(reference) = type_spec.reference.as_deref() else {
            return;
        };
        let Some(token) = reference.strip_prefix(TYPES_REF) else {
            return;
        };
        let token = token.replace("%2F", "/").replace("%2f", "/");
        if let Some(canonical) = renames.get(&token) {
            type_spec.reference = Some(format!("{TYPES_REF}{canonical}"));
        }
    });

    diagnostics
}

fn without_descriptions(spec: &ComplexTypeSpec) -> ComplexTypeSpec {
    let mut spec = spec.clone();
    spec.object.description = None;
    for prop in spec.object.properties.values_mut() {
        prop.description = None;
    }
    if let Some(values) = spec.enum_values.as_mut() {
        for value in values {
            value.description = None;
        }
    }
    spec
}
