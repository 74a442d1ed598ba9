//! Core template processing.
//! Walks a template tree, decides for every entry whether it is skipped,
//! copied verbatim or copied with placeholder substitution, and either
//! writes the result or records what would be written.

use crate::constants::{BINARY_CHECK_BYTES, SKIP_DIRS};
use crate::error::{Error, Result};
use crate::ignore::IgnoreRules;
use crate::renderer::TemplateRenderer;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What to do with a single visited entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Produce the entry in the output.
    Copy,
    /// Omit this entry only.
    Skip,
    /// Omit this directory and everything beneath it.
    Prune,
}

/// Whether a walk writes to disk or only reports what it would write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    Materialize,
    Preview,
}

/// Decides skip/prune/copy for entries under a template root.
#[derive(Debug)]
pub struct PathClassifier<'a> {
    source_root: &'a Path,
    /// Destination relative to the source root, set only when the
    /// destination lies inside the source tree.
    nested_target: Option<PathBuf>,
    /// Ancestors of a nested destination that do not exist yet. Creating the
    /// destination creates them, so they must not show up in the walk.
    pending_dirs: Vec<PathBuf>,
    ignore: &'a IgnoreRules,
}

impl<'a> PathClassifier<'a> {
    /// Both roots must already be absolute and symlink-resolved.
    pub fn new(source_root: &'a Path, target_root: Option<&Path>, ignore: &'a IgnoreRules) -> Self {
        let nested_target = target_root
            .and_then(|target| target.strip_prefix(source_root).ok())
            .map(Path::to_path_buf);
        let mut pending_dirs = Vec::new();
        if let Some(nested) = &nested_target {
            debug!("Output directory is inside the template, excluding '{}'", nested.display());
            pending_dirs = nested
                .ancestors()
                .skip(1)
                .filter(|dir| !dir.as_os_str().is_empty() && !source_root.join(dir).exists())
                .map(Path::to_path_buf)
                .collect();
        }
        Self { source_root, nested_target, pending_dirs, ignore }
    }

    pub fn target_inside_source(&self) -> bool {
        self.nested_target.is_some()
    }

    /// Classifies an entry. The denylist and the nested destination are
    /// checked before ignore patterns and always win.
    pub fn classify(&self, path: &Path, is_dir: bool) -> Decision {
        let relative = match path.strip_prefix(self.source_root) {
            Ok(relative) => relative,
            Err(_) => return Decision::Skip,
        };
        // The root itself has no counterpart in the output.
        if relative.as_os_str().is_empty() {
            return Decision::Skip;
        }
        let prune_or_skip = if is_dir { Decision::Prune } else { Decision::Skip };

        if is_dir && is_skip_dir(path) {
            return Decision::Prune;
        }
        if let Some(nested) = &self.nested_target {
            if relative.starts_with(nested) {
                return prune_or_skip;
            }
            if is_dir && self.pending_dirs.iter().any(|dir| dir == relative) {
                return Decision::Prune;
            }
        }
        if self.ignore.is_match_path(relative) {
            return prune_or_skip;
        }
        Decision::Copy
    }
}

fn is_skip_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| SKIP_DIRS.contains(&name))
}

/// An entry that survived classification.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    pub source: PathBuf,
    pub relative: PathBuf,
    pub is_dir: bool,
}

/// Deterministic pre-order walk of a template root applying a [`PathClassifier`].
pub struct TemplateWalker<'a> {
    source_root: &'a Path,
    classifier: PathClassifier<'a>,
}

impl<'a> TemplateWalker<'a> {
    pub fn new(source_root: &'a Path, classifier: PathClassifier<'a>) -> Self {
        Self { source_root, classifier }
    }

    pub fn classifier(&self) -> &PathClassifier<'a> {
        &self.classifier
    }

    /// Calls `visit` for every surviving entry, parents before children,
    /// siblings in file name order. Stops at the first error.
    pub fn for_each<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&WalkEntry) -> Result<()>,
    {
        let mut entries = WalkDir::new(self.source_root).sort_by_file_name().into_iter();
        while let Some(entry) = entries.next() {
            let entry = entry.map_err(|e| walk_error(e, self.source_root))?;
            let is_dir = entry.file_type().is_dir();
            match self.classifier.classify(entry.path(), is_dir) {
                Decision::Prune => {
                    debug!("Pruning directory {}", entry.path().display());
                    entries.skip_current_dir();
                    continue;
                }
                Decision::Skip => {
                    debug!("Skipping {}", entry.path().display());
                    continue;
                }
                Decision::Copy => {}
            }
            let relative = entry
                .path()
                .strip_prefix(self.source_root)
                .map_err(|e| Error::TemplateError(e.to_string()))?
                .to_path_buf();
            visit(&WalkEntry { source: entry.path().to_path_buf(), relative, is_dir })?;
        }
        Ok(())
    }

    /// Relative paths of the files (not directories) the walk would produce.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.for_each(|entry| {
            if !entry.is_dir {
                files.push(entry.relative.clone());
            }
            Ok(())
        })?;
        Ok(files)
    }
}

fn walk_error(err: walkdir::Error, root: &Path) -> Error {
    let path = err.path().unwrap_or(root).display().to_string();
    let message = err.to_string();
    let source = err.into_io_error().unwrap_or_else(|| io::Error::other(message));
    Error::SourceUnreadable { path, source }
}

/// Reports whether data is binary: a zero byte within the first
/// [`BINARY_CHECK_BYTES`] bytes.
pub fn is_binary(data: &[u8]) -> bool {
    let checked = data.len().min(BINARY_CHECK_BYTES);
    data[..checked].contains(&0)
}

/// Copies one template file. Binary content is written unchanged, text goes
/// through the renderer. The source permission bits are carried over.
///
/// No cleanup happens on failure; a partially written destination may remain.
pub fn copy_file_with_substitution(
    source: &Path,
    target: &Path,
    renderer: &dyn TemplateRenderer,
) -> Result<()> {
    let content = fs::read(source).map_err(|e| source_error(source, e))?;
    let permissions = fs::metadata(source).map_err(|e| source_error(source, e))?.permissions();

    if is_binary(&content) {
        debug!("Copying binary file: {}", target.display());
        fs::write(target, &content).map_err(|e| target_error(target, e))?;
    } else {
        debug!("Writing file: {}", target.display());
        fs::write(target, renderer.render(&content)).map_err(|e| target_error(target, e))?;
    }
    fs::set_permissions(target, permissions).map_err(|e| target_error(target, e))
}

fn create_dir_like(source: &Path, target: &Path) -> Result<()> {
    let permissions = fs::metadata(source).map_err(|e| source_error(source, e))?.permissions();
    fs::create_dir_all(target).map_err(|e| target_error(target, e))?;
    fs::set_permissions(target, permissions).map_err(|e| target_error(target, e))
}

fn source_error(path: &Path, source: io::Error) -> Error {
    Error::SourceUnreadable { path: path.display().to_string(), source }
}

fn target_error(path: &Path, source: io::Error) -> Error {
    Error::DestinationUnwritable { path: path.display().to_string(), source }
}

/// Materializes a template root into a target root.
pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    target_root: &'a Path,
    walker: TemplateWalker<'a>,
}

impl<'a> Processor<'a> {
    /// Both roots must be absolute and symlink-resolved; the target root may
    /// not exist yet.
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        source_root: &'a Path,
        target_root: &'a Path,
        ignore: &'a IgnoreRules,
    ) -> Self {
        let classifier = PathClassifier::new(source_root, Some(target_root), ignore);
        Self { renderer, target_root, walker: TemplateWalker::new(source_root, classifier) }
    }

    pub fn target_inside_source(&self) -> bool {
        self.walker.classifier().target_inside_source()
    }

    /// Copies the template, returning the produced paths relative to the target root.
    pub fn materialize(&self) -> Result<Vec<PathBuf>> {
        self.run(WalkMode::Materialize)
    }

    /// Returns the paths relative to the target root that [`Processor::materialize`]
    /// would produce, without touching the filesystem.
    pub fn preview(&self) -> Result<Vec<PathBuf>> {
        self.run(WalkMode::Preview)
    }

    pub fn run(&self, mode: WalkMode) -> Result<Vec<PathBuf>> {
        debug!("Processing template ({:?})...", mode);
        if mode == WalkMode::Materialize {
            fs::create_dir_all(self.target_root).map_err(|e| target_error(self.target_root, e))?;
        }

        let mut produced = Vec::new();
        self.walker.for_each(|entry| {
            if mode == WalkMode::Materialize {
                let target = self.target_root.join(&entry.relative);
                if entry.is_dir {
                    create_dir_like(&entry.source, &target)?;
                } else {
                    copy_file_with_substitution(&entry.source, &target, self.renderer)?;
                }
            }
            produced.push(entry.relative.clone());
            Ok(())
        })?;
        Ok(produced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_binary_detects_zero_byte() {
        assert!(is_binary(b"PNG\0data"));
        assert!(!is_binary(b"plain text"));
        assert!(!is_binary(b""));
    }

    #[test]
    fn test_is_binary_only_scans_prefix() {
        let mut data = vec![b'a'; BINARY_CHECK_BYTES];
        data.push(0);
        assert!(!is_binary(&data));

        data[BINARY_CHECK_BYTES - 1] = 0;
        assert!(is_binary(&data));
    }

    #[test]
    fn test_is_skip_dir() {
        assert!(is_skip_dir(Path::new("/t/node_modules")));
        assert!(is_skip_dir(Path::new("/t/a/.git")));
        assert!(!is_skip_dir(Path::new("/t/src")));
    }
}
