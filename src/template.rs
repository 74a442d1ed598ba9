//! Template registration.
//! Scans a directory, guesses its language and captures the list of files a
//! project created from it would contain.

use crate::config::Template;
use crate::constants::SKIP_DIRS;
use crate::error::{Error, Result};
use crate::ignore::{parse_ignore_file, IgnoreRules};
use crate::processor::{PathClassifier, TemplateWalker};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// File names that identify a language, weighted above extensions.
const FILE_INDICATORS: [(&str, &str); 11] = [
    ("package.json", "JavaScript"),
    ("tsconfig.json", "TypeScript"),
    ("Cargo.toml", "Rust"),
    ("pom.xml", "Java"),
    ("build.gradle", "Java"),
    ("Gemfile", "Ruby"),
    ("composer.json", "PHP"),
    ("requirements.txt", "Python"),
    ("Pipfile", "Python"),
    ("go.mod", "Go"),
    ("Makefile", "C/C++"),
];

const EXTENSION_INDICATORS: [(&str, &str); 17] = [
    ("go", "Go"),
    ("mod", "Go"),
    ("py", "Python"),
    ("js", "JavaScript"),
    ("ts", "TypeScript"),
    ("jsx", "React"),
    ("tsx", "React"),
    ("rs", "Rust"),
    ("java", "Java"),
    ("kt", "Kotlin"),
    ("cpp", "C++"),
    ("c", "C"),
    ("cs", "C#"),
    ("php", "PHP"),
    ("rb", "Ruby"),
    ("swift", "Swift"),
    ("vue", "Vue"),
];

const FILE_WEIGHT: usize = 5;

pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Checks that a template name is usable as a registry key.
///
/// # Errors
/// * `Error::InvalidTemplateName` if the name is empty or contains path or shell characters
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidTemplateName("template name cannot be empty".to_string()));
    }
    if name.chars().any(|c| r#"/\:*?"<>|"#.contains(c)) {
        return Err(Error::InvalidTemplateName(format!(
            "'{}' contains invalid characters",
            name
        )));
    }
    Ok(())
}

fn language_for(path: &Path) -> Option<(&'static str, usize)> {
    let file_name = path.file_name()?.to_str()?;
    if let Some((_, language)) = FILE_INDICATORS.iter().find(|(name, _)| *name == file_name) {
        return Some((*language, FILE_WEIGHT));
    }
    let extension = path.extension()?.to_str()?;
    EXTENSION_INDICATORS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, language)| (*language, 1))
}

/// Guesses the primary language of a directory from file names and extensions.
///
/// Dependency, VCS and build directories are not counted, nor are paths the
/// ignore file excludes. Ties go to the alphabetically first language.
pub fn detect_language<P: AsRef<Path>>(dir: P, ignore: &IgnoreRules) -> Result<String> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(Error::TemplateDoesNotExistsError { template_dir: dir.display().to_string() });
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let walker = WalkDir::new(dir).sort_by_file_name().into_iter().filter_entry(|entry| {
        if entry.depth() == 0 {
            return true;
        }
        if entry.file_type().is_dir() {
            let name = entry.file_name().to_string_lossy();
            if name == "target" || SKIP_DIRS.contains(&&*name) {
                return false;
            }
        }
        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        !ignore.is_match_path(relative)
    });

    for entry in walker {
        let entry = entry.map_err(|e| Error::TemplateError(format!("failed to scan directory: {}", e)))?;
        if entry.file_type().is_dir() {
            continue;
        }
        if let Some((language, weight)) = language_for(entry.path()) {
            *counts.entry(language).or_insert(0) += weight;
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (language, count) in counts {
        match best {
            Some((_, max)) if count <= max => {}
            _ => best = Some((language, count)),
        }
    }
    Ok(best.map_or(UNKNOWN_LANGUAGE, |(language, _)| language).to_string())
}

/// Scans a directory and builds a [`Template`] from it.
///
/// # Arguments
/// * `name` - Registry name of the template
/// * `path` - Template directory, made absolute
/// * `description` - Free text description
///
/// # Errors
/// * `Error::TemplateDoesNotExistsError` if the path is missing or not a directory
pub fn scan_template<P: AsRef<Path>>(name: &str, path: P, description: &str) -> Result<Template> {
    let path = path.as_ref();
    let root = fs::canonicalize(path)
        .ok()
        .filter(|root| root.is_dir())
        .ok_or_else(|| Error::TemplateDoesNotExistsError {
            template_dir: path.display().to_string(),
        })?;

    let ignore = parse_ignore_file(&root);
    let language = detect_language(&root, &ignore)?;
    let walker = TemplateWalker::new(&root, PathClassifier::new(&root, None, &ignore));
    let files = walker
        .files()?
        .iter()
        .map(|file| file.to_string_lossy().replace('\\', "/"))
        .collect::<Vec<_>>();

    debug!("Scanned template '{}': {} ({} files)", name, language, files.len());
    Ok(Template {
        name: name.to_string(),
        path: root,
        language,
        description: description.to_string(),
        files,
    })
}
