//! Package utilities class and bundled resource files.

use super::file::{Emitted, JavaFile, RESOURCE_ROOT, SourceFile};
use super::resources::UTILITIES_CLASS;
use crate::error::CodegenError;
use crate::mapper::TypeMapper;
use crate::names::{Fqn, known, string_literal};
use serde::Serialize;

/// Version written when the package declares none.
pub const DEFAULT_VERSION: &str = "0.0.1";

/// Contents of the bundled `plugin.json`.
#[derive(Debug, Serialize)]
struct PluginInfo<'a> {
    resource: bool,
    name: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    server: Option<&'a str>,
}

/// Generator for `Utilities.java`, `version.txt` and `plugin.json`.
pub struct UtilitiesGenerator<'m> {
    mapper: &'m TypeMapper<'m>,
}

impl<'m> UtilitiesGenerator<'m> {
    /// Creates a new utilities generator.
    #[must_use]
    pub fn new(mapper: &'m TypeMapper<'m>) -> Self {
        Self { mapper }
    }

    fn resource_dir(&self) -> String {
        let root = self.mapper.root_package();
        format!("{RESOURCE_ROOT}/{}", root.to_string().replace('.', "/"))
    }

    fn version(&self) -> &str {
        self.mapper
            .package()
            .version
            .as_deref()
            .unwrap_or(DEFAULT_VERSION)
    }

    /// Generates the utilities class.
    ///
    /// # Errors
    /// Returns `CodegenError::UnqualifiedImport` if a runtime name cannot be
    /// imported.
    pub fn generate(&self) -> Result<Emitted, CodegenError> {
        let root = self.mapper.root_package();
        let mut file = JavaFile::new(self.mapper, root.append(UTILITIES_CLASS));
        let optional = file.reference(&known::optional())?;
        let nullable = file.reference(&known::nullable())?;
        let invoke_options = file.reference(&known::invoke_options())?;
        let reader = file.reference(&Fqn::parse("java.io.BufferedReader"))?;
        let stream_reader = file.reference(&Fqn::parse("java.io.InputStreamReader"))?;
        let collectors = file.reference(&Fqn::parse("java.util.stream.Collectors"))?;

        let version_resource = format!("{}/version.txt", root.to_string().replace('.', "/"));
        let download_url = match &self.mapper.package().plugin_download_url {
            Some(url) => string_literal(url),
            None => "null".to_string(),
        };

        let mut output = String::new();
        output.push_str("public class Utilities {\n\n");
        output.push_str("    private static final String version;\n\n");
        output.push_str("    public static String getVersion() {\n");
        output.push_str("        return version;\n");
        output.push_str("    }\n\n");
        output.push_str(&format!(
            "    private static final @{nullable} String pluginDownloadURL = {download_url};\n\n"
        ));
        output.push_str(&format!(
            "    public static {optional}<String> getPluginDownloadURL() {{\n"
        ));
        output.push_str(&format!(
            "        return {optional}.ofNullable(pluginDownloadURL);\n"
        ));
        output.push_str("    }\n\n");
        output.push_str(&format!(
            "    public static {invoke_options} withVersion(@{nullable} {invoke_options} options) {{\n"
        ));
        output.push_str("        if (options != null && options.getVersion().isPresent()) {\n");
        output.push_str("            return options;\n");
        output.push_str("        }\n");
        output.push_str(&format!("        return new {invoke_options}(\n"));
        output.push_str("            options == null ? null : options.getParent().orElse(null),\n");
        output.push_str("            options == null ? null : options.getProvider().orElse(null),\n");
        output.push_str("            getVersion()\n");
        output.push_str("        );\n");
        output.push_str("    }\n\n");
        output.push_str("    static {\n");
        output.push_str(&format!(
            "        var resourceName = {};\n",
            string_literal(&version_resource)
        ));
        output.push_str(
            "        var versionFile = Utilities.class.getClassLoader().getResourceAsStream(resourceName);\n",
        );
        output.push_str("        if (versionFile == null) {\n");
        output.push_str("            throw new IllegalStateException(\n");
        output.push_str(
            "                String.format(\"expected resource '%s' on Classpath, not found\", resourceName)\n",
        );
        output.push_str("            );\n");
        output.push_str("        }\n");
        output.push_str(&format!(
            "        version = new {reader}(new {stream_reader}(versionFile))\n"
        ));
        output.push_str("            .lines()\n");
        output.push_str(&format!("            .collect({collectors}.joining(\"\\n\"))\n"));
        output.push_str("            .trim();\n");
        output.push_str("    }\n");
        output.push_str("}\n");

        file.push_str(&output);
        Ok(file.finish())
    }

    /// Returns the `version.txt` and `plugin.json` resource files.
    ///
    /// # Errors
    /// Returns `CodegenError::LanguageOptions` if the plugin manifest cannot
    /// be serialized.
    pub fn resources(&self) -> Result<Vec<SourceFile>, CodegenError> {
        let package = self.mapper.package();
        let dir = self.resource_dir();
        let info = PluginInfo {
            resource: true,
            name: &package.name,
            version: self.version(),
            server: package.plugin_download_url.as_deref(),
        };
        let mut plugin = serde_json::to_string_pretty(&info)?;
        plugin.push('\n');
        Ok(vec![
            SourceFile {
                path: format!("{dir}/version.txt"),
                contents: format!("{}\n", self.version()),
            },
            SourceFile {
                path: format!("{dir}/plugin.json"),
                contents: plugin,
            },
        ])
    }
}
