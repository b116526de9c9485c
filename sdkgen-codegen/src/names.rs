//! Fully-qualified names and identifier sanitization.

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use std::fmt;

/// Java reserved words and literals that cannot be used as identifiers.
const JAVA_KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "var",
    "void",
    "volatile",
    "while",
    "yield",
];

/// A fully-qualified name: namespace segments plus a base identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fqn {
    namespace: Vec<String>,
    base: String,
}

impl Fqn {
    /// Creates a name from namespace segments and a base identifier.
    #[must_use]
    pub fn new<I, S>(namespace: I, base: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespace: namespace.into_iter().map(Into::into).collect(),
            base: base.into(),
        }
    }

    /// Parses a dotted name such as `java.util.List`.
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        match dotted.rsplit_once('.') {
            Some((namespace, base)) => Self::new(namespace.split('.'), base),
            None => Self::new(Vec::<String>::new(), dotted),
        }
    }

    /// Returns a new name with `segment` appended as the base identifier.
    #[must_use]
    pub fn append(&self, segment: impl Into<String>) -> Self {
        let mut namespace = self.namespace.clone();
        if !self.base.is_empty() {
            namespace.push(self.base.clone());
        }
        Self {
            namespace,
            base: segment.into(),
        }
    }

    /// Returns a name in the same namespace with a different base.
    #[must_use]
    pub fn sibling(&self, base: impl Into<String>) -> Self {
        Self {
            namespace: self.namespace.clone(),
            base: base.into(),
        }
    }

    /// Returns the base identifier.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the namespace segments.
    #[must_use]
    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    /// Returns the dotted namespace, e.g. `java.util`.
    #[must_use]
    pub fn package(&self) -> String {
        self.namespace.join(".")
    }

    /// Returns true if the name has at least one namespace segment.
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        !self.namespace.is_empty()
    }

    /// Returns the source file path of the class, e.g. `java/util/List.java`.
    #[must_use]
    pub fn to_file_path(&self) -> String {
        let mut path = self.namespace.join("/");
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(&self.base);
        path.push_str(".java");
        path
    }
}

impl fmt::Display for Fqn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.namespace {
            write!(f, "{segment}.")?;
        }
        f.write_str(&self.base)
    }
}

/// Well-known names of the Java standard library and the SDK runtime.
pub mod known {
    use super::Fqn;

    macro_rules! known_names {
        ($($(#[$doc:meta])* $fn_name:ident => $dotted:literal;)*) => {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $fn_name() -> Fqn {
                    Fqn::parse($dotted)
                }
            )*
        };
    }

    known_names! {
        /// `java.lang.Object`.
        object => "java.lang.Object";
        /// `java.lang.String`.
        string => "java.lang.String";
        /// `java.lang.Boolean`.
        boolean => "java.lang.Boolean";
        /// `java.lang.Integer`.
        integer => "java.lang.Integer";
        /// `java.lang.Double`.
        double => "java.lang.Double";
        /// `java.lang.Void`.
        void => "java.lang.Void";
        /// `java.util.List`.
        list => "java.util.List";
        /// `java.util.Map`.
        map => "java.util.Map";
        /// `java.util.Optional`.
        optional => "java.util.Optional";
        /// `java.util.Objects`.
        objects => "java.util.Objects";
        /// `java.util.StringJoiner`.
        string_joiner => "java.util.StringJoiner";
        /// `java.util.concurrent.CompletableFuture`.
        completable_future => "java.util.concurrent.CompletableFuture";
        /// `javax.annotation.Nullable`.
        nullable => "javax.annotation.Nullable";
        /// `com.google.gson.JsonElement`.
        json_element => "com.google.gson.JsonElement";
        /// `com.google.gson.JsonParser`.
        json_parser => "com.google.gson.JsonParser";
        /// `com.pulumi.Config`.
        pulumi_config => "com.pulumi.Config";
        /// `com.pulumi.core.Output`.
        output => "com.pulumi.core.Output";
        /// `com.pulumi.core.Either`.
        either => "com.pulumi.core.Either";
        /// `com.pulumi.core.Alias`.
        alias => "com.pulumi.core.Alias";
        /// `com.pulumi.core.TypeShape`.
        type_shape => "com.pulumi.core.TypeShape";
        /// `com.pulumi.core.annotations.Import`.
        import_annotation => "com.pulumi.core.annotations.Import";
        /// `com.pulumi.core.annotations.Export`.
        export_annotation => "com.pulumi.core.annotations.Export";
        /// `com.pulumi.core.annotations.CustomType`.
        custom_type => "com.pulumi.core.annotations.CustomType";
        /// `com.pulumi.core.annotations.EnumType`.
        enum_type => "com.pulumi.core.annotations.EnumType";
        /// `com.pulumi.core.annotations.ResourceType`.
        resource_type => "com.pulumi.core.annotations.ResourceType";
        /// `com.pulumi.core.internal.Codegen`.
        codegen => "com.pulumi.core.internal.Codegen";
        /// `com.pulumi.deployment.Deployment`.
        deployment => "com.pulumi.deployment.Deployment";
        /// `com.pulumi.deployment.InvokeOptions`.
        invoke_options => "com.pulumi.deployment.InvokeOptions";
        /// `com.pulumi.resources.ResourceArgs`.
        resource_args => "com.pulumi.resources.ResourceArgs";
        /// `com.pulumi.resources.InvokeArgs`.
        invoke_args => "com.pulumi.resources.InvokeArgs";
        /// `com.pulumi.resources.CustomResource`.
        custom_resource => "com.pulumi.resources.CustomResource";
        /// `com.pulumi.resources.ComponentResource`.
        component_resource => "com.pulumi.resources.ComponentResource";
        /// `com.pulumi.resources.ProviderResource`.
        provider_resource => "com.pulumi.resources.ProviderResource";
        /// `com.pulumi.resources.CustomResourceOptions`.
        custom_resource_options => "com.pulumi.resources.CustomResourceOptions";
        /// `com.pulumi.resources.ComponentResourceOptions`.
        component_resource_options => "com.pulumi.resources.ComponentResourceOptions";
        /// `com.pulumi.asset.AssetOrArchive`.
        asset_or_archive => "com.pulumi.asset.AssetOrArchive";
        /// `com.pulumi.asset.Archive`.
        archive => "com.pulumi.asset.Archive";
        /// `com.pulumi.exceptions.MissingRequiredPropertyException`.
        missing_required_property => "com.pulumi.exceptions.MissingRequiredPropertyException";
    }
}

/// Returns true if `name` is a Java reserved word.
#[must_use]
pub fn is_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

/// Makes an identifier safe: numeric prefixes get a leading `_`, reserved
/// words get a trailing `_`.
#[must_use]
pub fn escape_ident(ident: &str) -> String {
    if ident.is_empty() {
        return "_".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{ident}");
    }
    if is_keyword(ident) {
        return format!("{ident}_");
    }
    ident.to_string()
}

fn is_plain_ident(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Converts a wire name into a field/method identifier.
///
/// Names that are already identifiers keep their casing apart from the first
/// letter, so `instanceARN` stays `instanceARN`.
#[must_use]
pub fn property_ident(name: &str) -> String {
    let ident = if is_plain_ident(name) {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    } else {
        name.to_lower_camel_case()
    };
    escape_ident(&ident)
}

/// Converts a name into a class identifier.
#[must_use]
pub fn class_ident(name: &str) -> String {
    let ident = if is_plain_ident(name) {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    } else {
        name.to_upper_camel_case()
    };
    escape_ident(&ident)
}

/// Converts a schema module or package name into a Java package segment.
#[must_use]
pub fn package_segment(name: &str) -> String {
    let segment: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase();
    escape_ident(&segment)
}

/// Renders a string as a Java string literal.
#[must_use]
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fqn_parse_and_display() {
        let fqn = Fqn::parse("java.util.List");
        assert_eq!(fqn.base(), "List");
        assert_eq!(fqn.package(), "java.util");
        assert_eq!(fqn.to_string(), "java.util.List");
        assert!(fqn.is_qualified());
        assert!(!Fqn::parse("List").is_qualified());
    }

    #[test]
    fn test_fqn_append() {
        let base = Fqn::parse("com.pulumi");
        let class = base.append("example").append("Widget");
        assert_eq!(class.to_string(), "com.pulumi.example.Widget");
        assert_eq!(base.to_string(), "com.pulumi");
        assert_eq!(class.to_file_path(), "com/pulumi/example/Widget.java");
        assert_eq!(
            class.sibling("WidgetArgs").to_string(),
            "com.pulumi.example.WidgetArgs"
        );
    }

    #[test]
    fn test_fqn_structural_equality() {
        assert_eq!(
            Fqn::new(["java", "util"], "Map"),
            Fqn::parse("java.util.Map")
        );
    }

    #[test]
    fn test_property_ident() {
        assert_eq!(property_ident("name"), "name");
        assert_eq!(property_ident("InstanceARN"), "instanceARN");
        assert_eq!(property_ident("some-name"), "someName");
        assert_eq!(property_ident("class"), "class_");
        assert_eq!(property_ident("1st"), "_1st");
    }

    #[test]
    fn test_class_ident() {
        assert_eq!(class_ident("widget"), "Widget");
        assert_eq!(class_ident("get-thing"), "GetThing");
    }

    #[test]
    fn test_package_segment() {
        assert_eq!(package_segment("my-pkg"), "mypkg");
        assert_eq!(package_segment("S3"), "s3");
        assert_eq!(package_segment("enum"), "enum_");
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("a\"b\\c\n"), "\"a\\\"b\\\\c\\n\"");
    }
}
