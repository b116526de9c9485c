//! Package configuration class generation.

use super::defaults::{ValueSource, value_expr};
use super::file::{Emitted, JavaFile, write_doc};
use super::properties::field_name;
use crate::error::CodegenError;
use crate::mapper::{ShapeOptions, TypeMapper};
use crate::names::{known, string_literal};

/// Simple name of the generated configuration class.
pub const CONFIG_CLASS: &str = "Config";

/// Generator for the `Config` class of a package.
pub struct ConfigGenerator<'m> {
    mapper: &'m TypeMapper<'m>,
}

impl<'m> ConfigGenerator<'m> {
    /// Creates a new config generator.
    #[must_use]
    pub fn new(mapper: &'m TypeMapper<'m>) -> Self {
        Self { mapper }
    }

    /// Generates one getter per config variable.
    ///
    /// # Errors
    /// Returns `CodegenError` if a variable type cannot be mapped or its
    /// default does not fit.
    pub fn generate(&self) -> Result<Emitted, CodegenError> {
        let package = self.mapper.package();
        let mut file = JavaFile::new(self.mapper, self.mapper.root_package().append(CONFIG_CLASS));
        let runtime_config = file.reference(&known::pulumi_config())?;

        let mut output = String::from("public final class Config {\n\n");
        output.push_str(&format!(
            "    private static final {runtime_config} config = {runtime_config}.of({});\n",
            string_literal(&package.name)
        ));

        let opts = ShapeOptions::output()
            .outer_optional(true)
            .require_initializers(true);
        for variable in &package.config {
            let shape = file.shape(&variable.type_, opts)?;
            let return_type = file.code(&shape)?;
            let expr = value_expr(&mut file, variable, &shape, ValueSource::Config("config"))?;
            write_doc(
                &mut output,
                "    ",
                variable.description.as_deref(),
                variable.deprecation_message.as_deref(),
            );
            output.push_str(&format!(
                "    public {return_type} {}() {{\n",
                field_name(variable)
            ));
            output.push_str(&format!("        return {expr};\n"));
            output.push_str("    }\n");
        }
        output.push_str("}\n");

        file.push_str(&output);
        Ok(file.finish())
    }
}
