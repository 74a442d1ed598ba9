//! Placeholder rendering for Foundry templates.
//! Text files in a template may contain `{{TOKEN}}` markers which are replaced
//! literally, once, when the template is materialized.
use crate::error::{Error, Result};
use indexmap::IndexMap;
use regex::bytes::{Captures, Regex};
use std::borrow::Cow;

pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const AUTHOR: &str = "AUTHOR";
pub const PROJECT_NAME_LOWER: &str = "PROJECT_NAME_LOWER";
pub const PROJECT_NAME_UPPER: &str = "PROJECT_NAME_UPPER";

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders raw file content, returning it unchanged when nothing matches.
    fn render<'a>(&self, content: &'a [u8]) -> Cow<'a, [u8]>;

    /// Renders a string.
    fn render_str(&self, text: &str) -> String {
        String::from_utf8_lossy(&self.render(text.as_bytes())).into_owned()
    }
}

/// Wraps a bare key as a placeholder token.
pub fn token(key: &str) -> String {
    format!("{{{{{}}}}}", key)
}

/// Literal `{{KEY}}` substitution engine.
///
/// The built-in keys are derived from the project name and author. Caller
/// supplied variables are applied afterwards, so a variable named like a
/// built-in replaces the built-in value.
#[derive(Debug)]
pub struct PlaceholderRenderer {
    /// token -> replacement
    values: IndexMap<String, String>,
    pattern: Regex,
}

impl PlaceholderRenderer {
    /// Creates a renderer for the given project.
    ///
    /// # Arguments
    /// * `project_name` - Name of the generated project
    /// * `author` - Author string
    /// * `vars` - Extra `KEY -> value` pairs, case-sensitive
    ///
    /// # Errors
    /// * `Error::PlaceholderError` if the token table cannot be compiled
    pub fn new(project_name: &str, author: &str, vars: &IndexMap<String, String>) -> Result<Self> {
        let mut values = IndexMap::new();
        values.insert(token(PROJECT_NAME), project_name.to_string());
        values.insert(token(AUTHOR), author.to_string());
        values.insert(token(PROJECT_NAME_LOWER), project_name.to_lowercase());
        values.insert(token(PROJECT_NAME_UPPER), project_name.to_uppercase());
        for (key, value) in vars {
            values.insert(token(key), value.clone());
        }

        // Longest first so a token that prefixes another never shadows it.
        let mut tokens: Vec<&String> = values.keys().collect();
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation =
            tokens.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
        let pattern =
            Regex::new(&alternation).map_err(|e| Error::PlaceholderError(e.to_string()))?;

        Ok(Self { values, pattern })
    }

    /// Value a token expands to, if any.
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.values.get(&token(key)).map(String::as_str)
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    /// Replaces every token occurrence in a single left-to-right pass, so
    /// replacement values are never expanded themselves.
    fn render<'a>(&self, content: &'a [u8]) -> Cow<'a, [u8]> {
        self.pattern.replace_all(content, |caps: &Captures| {
            let matched = &caps[0];
            std::str::from_utf8(matched)
                .ok()
                .and_then(|t| self.values.get(t))
                .map(|v| v.as_bytes().to_vec())
                .unwrap_or_else(|| matched.to_vec())
        })
    }
}

/// Parses `KEY=VALUE` entries into an ordered map.
///
/// The key is trimmed, the value is kept verbatim. Later entries override
/// earlier ones.
///
/// # Errors
/// * `Error::InvalidVariable` if an entry has no `=` or an empty key
pub fn parse_vars<S: AsRef<str>>(entries: &[S]) -> Result<IndexMap<String, String>> {
    let mut vars = IndexMap::new();
    for entry in entries {
        let entry = entry.as_ref();
        let (key, value) =
            entry.split_once('=').ok_or_else(|| Error::InvalidVariable(entry.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidVariable(entry.to_string()));
        }
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}
