//! Invoke function generation.
//!
//! Functions of one module are grouped into a single `{Module}Functions`
//! class. Every function gets an `Output`-returning family and a plain
//! `CompletableFuture`-returning family of overloads.

use super::file::{Emitted, JavaFile, write_doc};
use super::properties::{InputClass, PropertyGenerator};
use super::resources::UTILITIES_CLASS;
use crate::error::CodegenError;
use crate::mapper::{INPUTS_NAMESPACE, OUTPUTS_NAMESPACE, TypeMapper};
use crate::names::{Fqn, class_ident, known, property_ident, string_literal};
use crate::shape::TypeShape;
use sdkgen_schema::{Function, Token, input_properties};

/// Generator for module function classes.
pub struct FunctionGenerator<'m> {
    mapper: &'m TypeMapper<'m>,
}

struct Signature {
    method: String,
    args: Fqn,
    plain_args: Fqn,
    result: Fqn,
    all_optional: bool,
}

impl<'m> FunctionGenerator<'m> {
    /// Creates a new function generator.
    #[must_use]
    pub fn new(mapper: &'m TypeMapper<'m>) -> Self {
        Self { mapper }
    }

    /// Returns the class holding the functions of a token's module.
    ///
    /// # Errors
    /// Returns `CodegenError::Parse` if the token is malformed.
    pub fn functions_class(&self, token: &str) -> Result<Fqn, CodegenError> {
        let parsed = Token::parse(token)?;
        let module = parsed.module.as_deref().unwrap_or(&parsed.package);
        Ok(self
            .mapper
            .module_package(token)?
            .append(format!("{}Functions", class_ident(module))))
    }

    /// Generates the functions class of one module plus the argument and
    /// result classes of its functions.
    ///
    /// # Errors
    /// Returns `CodegenError` if a type cannot be mapped or a default value
    /// does not fit its property.
    pub fn generate(&self, class: &Fqn, functions: &[&Function]) -> Result<Vec<Emitted>, CodegenError> {
        let properties = PropertyGenerator::new(self.mapper);
        let mut emitted = Vec::new();
        let mut signatures = Vec::with_capacity(functions.len());

        for function in functions {
            let name = class_ident(&Token::parse(&function.token)?.name);
            let module = self.mapper.module_package(&function.token)?;
            let (args, plain_args) = match &function.inputs {
                Some(inputs) => {
                    let args = module.append(INPUTS_NAMESPACE).append(format!("{name}Args"));
                    let plain_args = args.sibling(format!("{name}PlainArgs"));
                    let inputs = input_properties(inputs);
                    for (args_class, inputless) in [(&args, false), (&plain_args, true)] {
                        emitted.push(properties.input_class(&InputClass {
                            class: args_class.clone(),
                            description: None,
                            properties: &inputs,
                            base: known::invoke_args(),
                            inputless,
                        })?);
                    }
                    (args, plain_args)
                }
                None => (known::invoke_args(), known::invoke_args()),
            };
            let result = match &function.outputs {
                Some(outputs) => {
                    let result = module.append(OUTPUTS_NAMESPACE).append(format!("{name}Result"));
                    emitted.push(properties.output_class(result.clone(), None, outputs)?);
                    result
                }
                None => known::void(),
            };
            signatures.push(Signature {
                method: property_ident(&Token::parse(&function.token)?.name),
                args,
                plain_args,
                result,
                all_optional: function
                    .inputs
                    .as_ref()
                    .is_none_or(|inputs| inputs.iter().all(|p| !p.required)),
            });
        }

        let mut file = JavaFile::new(self.mapper, class.clone());
        let name = file.class_name().to_string();
        let mut output = format!("public final class {name} {{\n");
        for (function, signature) in functions.iter().zip(&signatures) {
            output.push_str(&self.overloads(&mut file, function, signature)?);
        }
        output.push_str("}\n");
        file.push_str(&output);
        emitted.insert(0, file.finish());
        Ok(emitted)
    }

    fn overloads(
        &self,
        file: &mut JavaFile<'_>,
        function: &Function,
        signature: &Signature,
    ) -> Result<String, CodegenError> {
        let output_class = file.reference(&known::output())?;
        let future = file.reference(&known::completable_future())?;
        let invoke_options = file.reference(&known::invoke_options())?;
        let deployment = file.reference(&known::deployment())?;
        let utilities = file.reference(&self.mapper.root_package().append(UTILITIES_CLASS))?;
        let result = file.code(&TypeShape::of(signature.result.clone()))?;
        let descriptor = file.descriptor(&TypeShape::of(signature.result.clone()))?;
        let args = file.reference(&signature.args)?;
        let plain_args = file.reference(&signature.plain_args)?;
        let token = string_literal(&function.token);
        let method = &signature.method;

        let families = [
            (format!("{output_class}<{result}>"), method.clone(), args, "invoke"),
            (format!("{future}<{result}>"), format!("{method}Plain"), plain_args, "invokeAsync"),
        ];

        let mut output = String::new();
        let doc = |output: &mut String| {
            write_doc(
                output,
                "    ",
                function.description.as_deref(),
                function.deprecation_message.as_deref(),
            );
        };
        if signature.all_optional {
            for (returns, name, args, _) in &families {
                doc(&mut output);
                output.push_str(&format!("    public static {returns} {name}() {{\n"));
                output.push_str(&format!(
                    "        return {name}({args}.Empty, {invoke_options}.Empty);\n"
                ));
                output.push_str("    }\n\n");
            }
        }
        for (returns, name, args, _) in &families {
            doc(&mut output);
            output.push_str(&format!("    public static {returns} {name}({args} args) {{\n"));
            output.push_str(&format!("        return {name}(args, {invoke_options}.Empty);\n"));
            output.push_str("    }\n\n");
        }
        for (returns, name, args, call) in &families {
            doc(&mut output);
            output.push_str(&format!(
                "    public static {returns} {name}({args} args, {invoke_options} options) {{\n"
            ));
            output.push_str(&format!(
                "        return {deployment}.getInstance().{call}({token}, {descriptor}, args, {utilities}.withVersion(options));\n"
            ));
            output.push_str("    }\n\n");
        }
        Ok(output)
    }
}
