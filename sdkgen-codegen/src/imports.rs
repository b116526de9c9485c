//! Per-file symbol and import table.
//!
//! Every generated file owns one [`Imports`]. A short name is bound to at
//! most one fully-qualified name; later references to a different name with
//! the same short form are rendered fully qualified instead of failing.

use crate::error::CodegenError;
use crate::names::Fqn;
use std::collections::{BTreeMap, BTreeSet};

/// Namespaces available without an import statement.
pub const DEFAULT_IMPLICIT_NAMESPACES: &[&str] = &["java.lang"];

/// Import table for one output file.
#[derive(Debug, Clone)]
pub struct Imports {
    owner: Fqn,
    names: BTreeMap<String, Fqn>,
    statics: BTreeSet<Fqn>,
    implicit: Vec<String>,
}

impl Imports {
    /// Creates a table for a file whose public type is `owner`.
    ///
    /// The owner's short name is reserved so that other types with the same
    /// short name are always qualified.
    #[must_use]
    pub fn new(owner: Fqn) -> Self {
        Self::with_implicit(
            owner,
            DEFAULT_IMPLICIT_NAMESPACES
                .iter()
                .map(|ns| (*ns).to_string())
                .collect(),
        )
    }

    /// Creates a table with a custom implicit namespace allow-list.
    #[must_use]
    pub fn with_implicit(owner: Fqn, implicit: Vec<String>) -> Self {
        let mut names = BTreeMap::new();
        names.insert(owner.base().to_string(), owner.clone());
        Self {
            owner,
            names,
            statics: BTreeSet::new(),
            implicit,
        }
    }

    /// Returns the file's own public type.
    #[must_use]
    pub fn owner(&self) -> &Fqn {
        &self.owner
    }

    /// Binds a name to its short form if the short form is still free.
    ///
    /// # Errors
    /// Returns `CodegenError::UnqualifiedImport` if `fqn` has no namespace.
    pub fn bind(&mut self, fqn: &Fqn) -> Result<(), CodegenError> {
        if !fqn.is_qualified() {
            return Err(CodegenError::UnqualifiedImport {
                name: fqn.to_string(),
            });
        }
        self.names
            .entry(fqn.base().to_string())
            .or_insert_with(|| fqn.clone());
        Ok(())
    }

    /// Returns the text to use when referring to `fqn` in this file.
    ///
    /// # Errors
    /// Returns `CodegenError::UnqualifiedImport` if `fqn` has no namespace.
    pub fn reference(&mut self, fqn: &Fqn) -> Result<String, CodegenError> {
        if self.is_implicit(fqn) {
            self.names
                .entry(fqn.base().to_string())
                .or_insert_with(|| fqn.clone());
        } else {
            self.bind(fqn)?;
        }
        match self.names.get(fqn.base()) {
            Some(bound) if bound == fqn => Ok(fqn.base().to_string()),
            _ => Ok(fqn.to_string()),
        }
    }

    /// Resolves a short name to the bound name, or to itself when unbound.
    #[must_use]
    pub fn resolve(&self, short: &str) -> Fqn {
        self.names
            .get(short)
            .cloned()
            .unwrap_or_else(|| Fqn::parse(short))
    }

    /// Registers a static member import and returns the member's short name.
    ///
    /// # Errors
    /// Returns `CodegenError::UnqualifiedImport` if `member` has no namespace.
    pub fn static_import(&mut self, member: &Fqn) -> Result<String, CodegenError> {
        if !member.is_qualified() {
            return Err(CodegenError::UnqualifiedImport {
                name: member.to_string(),
            });
        }
        self.statics.insert(member.clone());
        Ok(member.base().to_string())
    }

    fn is_implicit(&self, fqn: &Fqn) -> bool {
        let package = fqn.package();
        self.implicit.iter().any(|ns| *ns == package)
    }

    /// Renders the import block: sorted static imports, a blank line, then
    /// sorted regular imports. The owner type and implicit names are never
    /// imported.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for member in &self.statics {
            out.push_str(&format!("import static {member};\n"));
        }
        let regular: BTreeSet<String> = self
            .names
            .values()
            .filter(|fqn| *fqn != &self.owner && !self.is_implicit(fqn))
            .map(ToString::to_string)
            .collect();
        if !self.statics.is_empty() && !regular.is_empty() {
            out.push('\n');
        }
        for fqn in regular {
            out.push_str(&format!("import {fqn};\n"));
        }
        out
    }
}
