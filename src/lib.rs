//! cookiepowder runs the routine chores of a project generated from the
//! cookiepowder template: publishing the package, bootstrapping Sphinx and
//! Read the Docs, and keeping `pyproject.toml` in sync with the tasks
//! configuration.

/// Command-line interface module
pub mod cli;

/// Tasks configuration loading
/// Supports TOML, YAML and JSON (tasks/tasks_conf.toml, .yaml, .yml, .json)
pub mod config;

/// Common file names
pub mod constants;

/// Shared state of one invocation
pub mod context;

/// Error types and handling
pub mod error;

/// `pyproject.toml` load -> transform -> save editing
pub mod manifest;

/// Enabled task modules (tasks/modules.toml)
pub mod modules;

/// Text-file patching: variable assignments and list entries
pub mod patcher;

/// User confirmation prompts
pub mod prompt;

/// File template rendering
pub mod renderer;

/// External process execution
pub mod runner;

/// Task units, prerequisite graph validation and execution order
pub mod task;

/// Built-in task modules
pub mod tasks;
