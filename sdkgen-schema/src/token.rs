//! Type token parsing.
//!
//! Tokens have the shape `package:module:Name`. The module may be `index` or
//! empty for the package root, and may carry a `/`-separated suffix such as
//! `storage/v1` whose trailing segment is a file hint only.

use crate::error::ParseError;

/// Prefix of provider pseudo-resource tokens.
pub const PROVIDER_TOKEN_PREFIX: &str = "pulumi:providers:";

/// A parsed type token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token {
    /// Owning package.
    pub package: String,
    /// Module path; `None` for the package root.
    pub module: Option<String>,
    /// Member name.
    pub name: String,
}

impl Token {
    /// Parses a `package:module:Name` token.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidToken` if the token does not have exactly
    /// three `:`-separated parts or if the package or name part is empty.
    pub fn parse(token: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = token.split(':').collect();
        let [package, module, name] = parts.as_slice() else {
            return Err(ParseError::invalid_token(
                token,
                "expected exactly three ':'-separated parts",
            ));
        };
        if package.is_empty() {
            return Err(ParseError::invalid_token(token, "empty package"));
        }
        if name.is_empty() {
            return Err(ParseError::invalid_token(token, "empty member name"));
        }

        let module = normalize_module(module);
        Ok(Self {
            package: (*package).to_string(),
            module,
            name: (*name).to_string(),
        })
    }

    /// Returns true if this is a provider pseudo-resource token.
    #[must_use]
    pub fn is_provider(&self) -> bool {
        self.package == "pulumi" && self.module.as_deref() == Some("providers")
    }

    /// Returns the provider token for a package.
    #[must_use]
    pub fn provider_token(package: &str) -> String {
        format!("{PROVIDER_TOKEN_PREFIX}{package}")
    }
}

fn normalize_module(module: &str) -> Option<String> {
    // `storage/v1/bucket` style modules keep only the directory part.
    let module = match module.rsplit_once('/') {
        Some((dir, _file)) => dir,
        None => module,
    };
    match module {
        "" | "index" => None,
        other => Some(other.to_string()),
    }
}
