//! Tasks configuration handling.
//! This module loads the static `tasks/tasks_conf.*` document that drives the
//! packaging and documentation tasks. TOML, YAML and JSON are accepted.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root of the tasks configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TasksConfig {
    #[serde(default)]
    pub pyproject: PyprojectConfig,
    #[serde(default)]
    pub sphinx: Option<SphinxConfig>,
    /// Named file templates: plain text or structured values
    #[serde(default)]
    pub file_templates: IndexMap<String, serde_json::Value>,
    /// Text templates rendered with MiniJinja before they are written;
    /// any other text template is written as is
    #[serde(default)]
    pub render_templates: Vec<String>,
    #[serde(default)]
    pub publish: PublishConfig,
}

/// Values merged into `pyproject.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PyprojectConfig {
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub optional_dependencies: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub requires: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SphinxConfig {
    pub paths: SphinxPaths,
    #[serde(default)]
    pub conf: SphinxConf,
}

/// Location of the Sphinx tree relative to the project root.
#[derive(Debug, Clone, Deserialize)]
pub struct SphinxPaths {
    /// Directory `sphinx-quickstart` runs in, e.g. `docs/sphinx/`
    pub parent: String,
    /// Source directory below `parent`, e.g. `source/`
    pub source: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SphinxConf {
    #[serde(default)]
    pub html_theme: Option<String>,
    #[serde(default)]
    pub exclude_patterns: Option<String>,
}

/// Settings for the installer and the publishing tool.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishConfig {
    #[serde(default = "default_installer")]
    pub installer: String,
    #[serde(default = "default_publisher")]
    pub publisher: String,
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
    /// Glob patterns selecting the uploaded files inside `dist_dir`
    #[serde(default = "default_artifacts")]
    pub artifacts: Vec<String>,
    #[serde(default = "default_test_repository")]
    pub test_repository: String,
    #[serde(default = "default_repository")]
    pub repository: String,
}

fn default_installer() -> String {
    "pip".to_string()
}

fn default_publisher() -> String {
    "twine".to_string()
}

fn default_dist_dir() -> String {
    "dist".to_string()
}

fn default_artifacts() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_test_repository() -> String {
    "testpypi".to_string()
}

fn default_repository() -> String {
    "pypi".to_string()
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            installer: default_installer(),
            publisher: default_publisher(),
            dist_dir: default_dist_dir(),
            artifacts: default_artifacts(),
            test_repository: default_test_repository(),
            repository: default_repository(),
        }
    }
}

impl SphinxPaths {
    pub fn parent_dir(&self) -> PathBuf {
        PathBuf::from(&self.parent)
    }

    pub fn source_dir(&self) -> PathBuf {
        self.parent_dir().join(&self.source)
    }

    /// Path of the generated `conf.py`, relative to the project root.
    pub fn conf_file(&self) -> PathBuf {
        self.source_dir().join(crate::constants::SPHINX_CONF_FILE)
    }
}

impl TasksConfig {
    /// Returns the `[sphinx]` section.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the section is absent
    pub fn sphinx(&self) -> Result<&SphinxConfig> {
        self.sphinx
            .as_ref()
            .ok_or_else(|| Error::ConfigError("missing [sphinx] section".to_string()))
    }

    /// Returns a structured file template.
    pub fn template(&self, name: &str) -> Result<&serde_json::Value> {
        self.file_templates
            .get(name)
            .ok_or_else(|| Error::ConfigError(format!("missing file template '{name}'")))
    }

    /// Returns a text file template.
    pub fn template_text(&self, name: &str) -> Result<&str> {
        self.template(name)?.as_str().ok_or_else(|| {
            Error::ConfigError(format!("file template '{name}' must be a string"))
        })
    }

    pub fn renders_template(&self, name: &str) -> bool {
        self.render_templates.iter().any(|t| t == name)
    }

    /// Optional dependency group, empty if not configured.
    pub fn optional_group(&self, group: &str) -> &[String] {
        self.pyproject
            .optional_dependencies
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Supported serialization formats of the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension, defaulting to TOML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Locates the configuration file below the project root.
///
/// # Arguments
/// * `root` - Project root directory
/// * `config_files` - Candidate relative paths, tried in order
///
/// # Errors
/// * `Error::ConfigError` if none of the candidates exist
pub fn find_config_file<P: AsRef<Path>>(root: P, config_files: &[&str]) -> Result<PathBuf> {
    for file in config_files {
        let config_path = root.as_ref().join(file);
        if config_path.is_file() {
            return Ok(config_path);
        }
    }

    Err(Error::ConfigError(format!(
        "No configuration file found (tried: {})",
        config_files.join(", ")
    )))
}

/// Parses configuration content of the given format.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<TasksConfig> {
    let config = match format {
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
    };
    Ok(config)
}

/// Loads the tasks configuration of a project.
pub fn load_config<P: AsRef<Path>>(root: P) -> Result<TasksConfig> {
    let config_path = find_config_file(root, &CONFIG_FILES)?;
    debug!("Loading configuration from {}", config_path.display());
    let content = std::fs::read_to_string(&config_path)?;
    parse_config(&content, ConfigFormat::from_path(&config_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(ConfigFormat::from_path("tasks/tasks_conf.toml"), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("tasks/tasks_conf.yml"), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("tasks/tasks_conf.json"), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path("tasks/tasks_conf"), ConfigFormat::Toml);
    }

    #[test]
    fn test_publish_defaults() {
        let config = parse_config("", ConfigFormat::Toml).unwrap();
        assert_eq!(config.publish.installer, "pip");
        assert_eq!(config.publish.dist_dir, "dist");
        assert_eq!(config.publish.artifacts, vec!["*"]);
        assert!(!config.renders_template("run_livereload"));
        assert!(config.sphinx().is_err());
    }
}
