//! Foundry is a project scaffolding tool.
//! It keeps a registry of template directories, detects the tools installed
//! on the system and creates new projects by copying a template while
//! substituting `{{PLACEHOLDER}}` tokens in text files.

/// Command-line interface module for the Foundry application
pub mod cli;

/// Subcommand implementations
pub mod commands;

/// YAML configuration store and template registry
pub mod config;

/// Common constants
pub mod constants;

/// Installed tool detection
pub mod detect;

/// Error types and handling for the Foundry application
pub mod error;

/// Git clone, init and .gitignore fetching
pub mod git;

/// Post-create commands
pub mod hooks;

/// `.foundryignore` pattern matching
pub mod ignore;

pub mod logger;

/// Project creation and dry-run entry points
pub mod project;

/// Core template processing: classification, materialization, tree walk
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Placeholder substitution
pub mod renderer;

/// Template scanning and language detection
pub mod template;
