//! Ignore rules for template roots.
//! A `.foundryignore` file lists glob or directory patterns, relative to the
//! template root, for paths that are left out of generated projects.

use crate::constants::IGNORE_FILE;
use globset::{GlobBuilder, GlobMatcher};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// A single ignore pattern, matched either as a glob or as a directory prefix.
#[derive(Debug, Clone)]
struct IgnoreRule {
    pattern: String,
    glob: Option<GlobMatcher>,
}

impl IgnoreRule {
    fn new(raw: &str) -> Option<Self> {
        let pattern = normalize_pattern(raw);
        if pattern.is_empty() {
            return None;
        }
        // `*` and `?` never cross a `/`, and `**` is not recursive.
        let glob = match GlobBuilder::new(&collapse_stars(&pattern))
            .literal_separator(true)
            .build()
        {
            Ok(glob) => Some(glob.compile_matcher()),
            Err(e) => {
                debug!("Pattern '{}' is not a valid glob, using prefix match only: {}", raw, e);
                None
            }
        };
        Some(Self { pattern, glob })
    }

    fn is_match(&self, candidate: &str) -> bool {
        if let Some(glob) = &self.glob {
            if glob.is_match(candidate) {
                return true;
            }
        }
        format!("{}/", candidate).starts_with(&format!("{}/", self.pattern))
    }
}

/// Ordered set of ignore patterns loaded from a template root.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    /// Builds a rule set from raw pattern lines. Blank lines and `#` comments
    /// are dropped.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .filter_map(|line| {
                let line = line.as_ref().trim();
                if line.is_empty() || line.starts_with('#') {
                    None
                } else {
                    IgnoreRule::new(line)
                }
            })
            .collect();
        Self { rules }
    }

    /// Returns true if the relative path matches any pattern.
    ///
    /// A pattern matches when it globs the whole normalized path, or when it
    /// names a directory the path lies under.
    pub fn is_match<S: AsRef<str>>(&self, relative_path: S) -> bool {
        let candidate = normalize_separators(relative_path.as_ref());
        self.rules.iter().any(|rule| rule.is_match(&candidate))
    }

    /// Path flavoured [`IgnoreRules::is_match`].
    pub fn is_match_path<P: AsRef<Path>>(&self, relative_path: P) -> bool {
        self.is_match(relative_path.as_ref().to_string_lossy())
    }

    /// Normalized patterns in file order.
    pub fn patterns(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.pattern.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Reads the .foundryignore file at the template root.
///
/// # Arguments
/// * `template_root` - Template directory that may contain a .foundryignore file
///
/// # Returns
/// * `IgnoreRules` - Parsed patterns, empty if the file is absent or unreadable
///
/// # Example
/// ```ignore
/// # Contents of .foundryignore:
/// *.log
/// /dist/
/// docs/drafts
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(template_root: P) -> IgnoreRules {
    let ignore_path = template_root.as_ref().join(IGNORE_FILE);
    match read_to_string(&ignore_path) {
        Ok(contents) => {
            let rules = IgnoreRules::from_patterns(contents.lines());
            debug!("Loaded {} ignore patterns from {}", rules.len(), ignore_path.display());
            rules
        }
        Err(_) => {
            debug!("{} does not exist", IGNORE_FILE);
            IgnoreRules::default()
        }
    }
}

fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

// Patterns are relative to the template root, so a leading `/` only anchors
// and a trailing `/` only marks a directory.
fn normalize_pattern(raw: &str) -> String {
    normalize_separators(raw.trim())
        .trim_start_matches('/')
        .trim_end_matches('/')
        .to_string()
}

fn collapse_stars(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' && out.ends_with('*') {
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pattern() {
        assert_eq!(normalize_pattern("/dist/"), "dist");
        assert_eq!(normalize_pattern("docs\\drafts\\"), "docs/drafts");
        assert_eq!(normalize_pattern("  *.log "), "*.log");
    }

    #[test]
    fn test_collapse_stars() {
        assert_eq!(collapse_stars("**/*.rs"), "*/*.rs");
        assert_eq!(collapse_stars("a***b"), "a*b");
        assert_eq!(collapse_stars("plain"), "plain");
    }
}
