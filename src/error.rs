//! Error handling for the Foundry application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for Foundry operations.
///
/// This enum represents all possible errors that can occur within the Foundry application.
/// It implements the standard Error trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A template file or directory could not be read
    #[error("Failed to read '{path}': {source}.")]
    SourceUnreadable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A directory or file in the generated project could not be created or written
    #[error("Failed to write '{path}': {source}.")]
    DestinationUnwritable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Directory '{output_dir}' already exists.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Template path no longer exists: {template_dir}.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Template '{name}' not found.")]
    TemplateNotFound { name: String },

    #[error("Invalid template name: {0}.")]
    InvalidTemplateName(String),

    #[error("No default template set for language '{language}'.")]
    NoDefaultTemplate { language: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("Unknown config key: {0}.")]
    UnknownConfigKey(String),

    #[error("Invalid variable '{0}', expected key=value.")]
    InvalidVariable(String),

    /// Represents errors building the placeholder substitution table
    #[error("Placeholder error: {0}.")]
    PlaceholderError(String),

    #[error("Failed to parse config: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    #[error("HTTP error: {0}.")]
    HttpError(#[from] reqwest::Error),

    /// Represents errors that occur while running post-create commands
    #[error("Hook execution error: {0}.")]
    HookError(String),

    #[error("Prompt error: {0}.")]
    PromptError(String),

    #[error("Template error: {0}.")]
    TemplateError(String),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}
