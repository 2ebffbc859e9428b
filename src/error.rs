//! Error handling for cookiepowder.
//! Defines the error type and result alias used by every task.

use thiserror::Error;

/// All errors a task invocation can end with.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}.")]
    TomlDeError(#[from] toml::de::Error),

    #[error("TOML write error: {0}.")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Pattern error: {0}.")]
    RegexError(#[from] regex::Error),

    #[error("Glob error: {0}.")]
    GlobError(#[from] globset::Error),

    #[error("Directory walk error: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// The tasks configuration is missing or malformed
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// `pyproject.toml` has a section of an unexpected shape
    #[error("Manifest error: {0}.")]
    ManifestError(String),

    /// A variable assignment was looked up in a file that does not contain it
    #[error("Variable '{name}' not found in '{file}'.")]
    NotFoundError { name: String, file: String },

    #[error("Unknown task '{name}'.")]
    UnknownTaskError { name: String },

    #[error("Task '{name}' is registered twice.")]
    DuplicateTaskError { name: String },

    #[error("Task '{task}' depends on unknown task '{prerequisite}'.")]
    UnknownPrerequisiteError { task: String, prerequisite: String },

    /// The prerequisite graph contains a cycle; `path` lists it in order
    #[error("Circular task dependency: {}.", .path.join(" -> "))]
    CycleError { path: Vec<String> },

    #[error("Prompt error: {0}.")]
    PromptError(String),

    #[error("No distribution artifacts found in '{dist_dir}'.")]
    ArtifactsNotFoundError { dist_dir: String },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
