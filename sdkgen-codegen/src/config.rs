//! Generator configuration.
//!
//! Two layers feed naming decisions: the `language.java` block of a package
//! schema ([`JavaPackageInfo`]) and the caller-supplied [`GeneratorConfig`],
//! which also carries the read-only naming metadata of foreign packages.

use crate::error::CodegenError;
use crate::imports::DEFAULT_IMPLICIT_NAMESPACES;
use crate::names::{Fqn, package_segment};
use sdkgen_schema::Package;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default root namespace of generated packages.
pub const DEFAULT_BASE_PACKAGE: &str = "com.pulumi";

/// Default tool name written into generated file headers.
pub const DEFAULT_TOOL_NAME: &str = "sdkgen";

/// Java options from a package schema's `language.java` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaPackageInfo {
    /// Schema module name to Java package override.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub packages: BTreeMap<String, String>,
    /// Root namespace override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_package: Option<String>,
    /// Build file flavor, consumed by the project scaffolding step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_files: Option<String>,
    /// Dependency versions, consumed by the project scaffolding step.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
}

impl JavaPackageInfo {
    /// Reads the `language.java` block of a package, if any.
    ///
    /// # Errors
    /// Returns `CodegenError::LanguageOptions` if the block is malformed.
    pub fn from_package(package: &Package) -> Result<Self, CodegenError> {
        match package.language.get("java") {
            Some(block) => Ok(serde_json::from_value(block.clone())?),
            None => Ok(Self::default()),
        }
    }

    /// Returns the root namespace.
    #[must_use]
    pub fn base_package(&self) -> &str {
        self.base_package.as_deref().unwrap_or(DEFAULT_BASE_PACKAGE)
    }

    /// Returns the namespace of a schema package's root module.
    #[must_use]
    pub fn root_package(&self, package_name: &str) -> Fqn {
        Fqn::parse(self.base_package()).append(package_segment(package_name))
    }

    /// Returns the namespace of a schema module.
    #[must_use]
    pub fn module_package(&self, package_name: &str, module: Option<&str>) -> Fqn {
        let root = self.root_package(package_name);
        let Some(module) = module else {
            return root;
        };
        match self.packages.get(module) {
            Some(java_package) => java_package
                .split('.')
                .fold(root, |fqn, segment| fqn.append(segment)),
            None => module
                .split('/')
                .fold(root, |fqn, segment| fqn.append(package_segment(segment))),
        }
    }

    /// Returns `self` with every field set in `other` taking precedence.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.packages.extend(other.packages.clone());
        if other.base_package.is_some() {
            merged.base_package.clone_from(&other.base_package);
        }
        if other.build_files.is_some() {
            merged.build_files.clone_from(&other.build_files);
        }
        merged.dependencies.extend(other.dependencies.clone());
        merged
    }
}

/// Configuration of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Tool name written into file headers.
    pub tool_name: String,
    /// Namespaces whose types never need an import.
    pub implicit_namespaces: Vec<String>,
    /// Naming options of already-generated foreign packages, by package name.
    pub foreign_packages: BTreeMap<String, JavaPackageInfo>,
    /// Options layered over the package's own `language.java` block.
    pub java_override: Option<JavaPackageInfo>,
}

impl GeneratorConfig {
    /// Returns a builder with default settings.
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Returns the effective Java options for the package being generated.
    ///
    /// # Errors
    /// Returns `CodegenError::LanguageOptions` if the package block is
    /// malformed.
    pub fn java_info(&self, package: &Package) -> Result<JavaPackageInfo, CodegenError> {
        let info = JavaPackageInfo::from_package(package)?;
        Ok(match &self.java_override {
            Some(overrides) => info.merged_with(overrides),
            None => info,
        })
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorBuilder::new().build()
    }
}

/// Builder for configuring a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    tool_name: String,
    implicit_namespaces: Vec<String>,
    foreign_packages: BTreeMap<String, JavaPackageInfo>,
    java_override: Option<JavaPackageInfo>,
}

impl GeneratorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            implicit_namespaces: DEFAULT_IMPLICIT_NAMESPACES
                .iter()
                .map(|ns| (*ns).to_string())
                .collect(),
            foreign_packages: BTreeMap::new(),
            java_override: None,
        }
    }

    /// Sets the tool name written into file headers.
    #[must_use]
    pub fn tool_name(mut self, name: impl Into<String>) -> Self {
        self.tool_name = name.into();
        self
    }

    /// Adds a namespace whose types never need an import.
    #[must_use]
    pub fn implicit_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.implicit_namespaces.push(namespace.into());
        self
    }

    /// Registers naming options of a foreign package.
    #[must_use]
    pub fn foreign_package(mut self, name: impl Into<String>, info: JavaPackageInfo) -> Self {
        self.foreign_packages.insert(name.into(), info);
        self
    }

    /// Sets options layered over the package's own `language.java` block.
    #[must_use]
    pub fn java_override(mut self, info: JavaPackageInfo) -> Self {
        self.java_override = Some(info);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        GeneratorConfig {
            tool_name: self.tool_name,
            implicit_namespaces: self.implicit_namespaces,
            foreign_packages: self.foreign_packages,
            java_override: self.java_override,
        }
    }
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_namespaces() {
        let info = JavaPackageInfo::default();
        assert_eq!(info.root_package("my-pkg").to_string(), "com.pulumi.mypkg");
        assert_eq!(
            info.module_package("pkg", Some("storage/v1")).to_string(),
            "com.pulumi.pkg.storage.v1"
        );
        assert_eq!(info.module_package("pkg", None).to_string(), "com.pulumi.pkg");
    }

    #[test]
    fn test_overrides() {
        let mut package = Package::new("pkg");
        package.language.insert(
            "java".to_string(),
            json!({"basePackage": "org.acme", "packages": {"s3": "storage.s3"}}),
        );
        let info = JavaPackageInfo::from_package(&package).expect("Failed to decode");
        assert_eq!(
            info.module_package("pkg", Some("s3")).to_string(),
            "org.acme.pkg.storage.s3"
        );
    }

    #[test]
    fn test_malformed_block() {
        let mut package = Package::new("pkg");
        package
            .language
            .insert("java".to_string(), json!({"packages": ["not", "a", "map"]}));
        assert!(matches!(
            JavaPackageInfo::from_package(&package),
            Err(CodegenError::LanguageOptions(_))
        ));
    }

    #[test]
    fn test_builder_and_override() {
        let config = GeneratorConfig::builder()
            .tool_name("test-tool")
            .java_override(JavaPackageInfo {
                base_package: Some("io.example".to_string()),
                ..JavaPackageInfo::default()
            })
            .build();
        assert_eq!(config.tool_name, "test-tool");
        assert_eq!(config.implicit_namespaces, vec!["java.lang".to_string()]);

        let info = config.java_info(&Package::new("pkg")).expect("info");
        assert_eq!(info.root_package("pkg").to_string(), "io.example.pkg");
    }
}
