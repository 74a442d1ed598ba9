//! Project creation from a saved template.
//! Validates the inputs, resolves both roots and hands the walk to the
//! [`Processor`].

use crate::config::Template;
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_file;
use crate::processor::Processor;
use crate::renderer::TemplateRenderer;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// What a dry run would generate.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewSummary {
    pub project_name: String,
    pub target_dir: PathBuf,
    pub template: String,
    pub language: String,
    /// Paths relative to `target_dir`, in walk order.
    pub files: Vec<PathBuf>,
}

/// Ensures the output directory does not exist yet.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if the directory exists
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

/// Ensures a template directory still exists.
///
/// # Errors
/// * `Error::TemplateDoesNotExistsError` if the path is gone
pub fn ensure_template_dir<P: AsRef<Path>>(template_dir: P) -> Result<PathBuf> {
    let template_dir = template_dir.as_ref();
    if !template_dir.exists() {
        return Err(Error::TemplateDoesNotExistsError {
            template_dir: template_dir.display().to_string(),
        });
    }
    Ok(template_dir.to_path_buf())
}

/// Makes a path absolute, removes `.` and `..` lexically and resolves
/// symlinks in its longest existing prefix; components that do not exist yet
/// are appended unchanged.
pub fn resolve_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let absolute = normalize_lexically(&if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    });

    let mut existing = absolute.as_path();
    let mut missing: Vec<OsString> = Vec::new();
    loop {
        if let Ok(mut resolved) = existing.canonicalize() {
            resolved.extend(missing.iter().rev());
            return Ok(resolved);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
}

// `..` at the root stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn resolve_roots(template: &Template, target_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    ensure_template_dir(&template.path)?;
    let target_root = resolve_path(target_dir)?;
    ensure_output_dir(&target_root)?;
    Ok((resolve_path(&template.path)?, target_root))
}

/// Copies a template into `target_dir`, substituting placeholders in text files.
///
/// The target must not exist. On failure, whatever was written so far stays
/// on disk.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Produced paths relative to `target_dir`
pub fn create_from_template<P: AsRef<Path>>(
    template: &Template,
    target_dir: P,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<PathBuf>> {
    let (source_root, target_root) = resolve_roots(template, target_dir.as_ref())?;
    let ignore = parse_ignore_file(&source_root);
    Processor::new(renderer, &source_root, &target_root, &ignore).materialize()
}

/// Reports what [`create_from_template`] would produce without writing anything.
pub fn preview_from_template<P: AsRef<Path>>(
    template: &Template,
    project_name: &str,
    target_dir: P,
    renderer: &dyn TemplateRenderer,
) -> Result<PreviewSummary> {
    let target_dir = target_dir.as_ref();
    let (source_root, target_root) = resolve_roots(template, target_dir)?;
    let ignore = parse_ignore_file(&source_root);
    let files = Processor::new(renderer, &source_root, &target_root, &ignore).preview()?;
    Ok(PreviewSummary {
        project_name: project_name.to_string(),
        target_dir: target_dir.to_path_buf(),
        template: template.name.clone(),
        language: template.language.clone(),
        files,
    })
}
