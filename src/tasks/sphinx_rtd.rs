//! Documentation tasks: Sphinx scaffolding and Read the Docs configuration.

use crate::constants::{LIVERELOAD_FILE, RTD_CONFIG_FILE};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::manifest::{
    add_optional_dependencies, optional_dependency_packages, project, project_version,
    requires_python,
};
use crate::patcher::{append_list_entry_in_file, get_var_val, move_file, replace_var_val};
use crate::runner::ProcessCommand;
use crate::task::Task;
use log::{debug, info, warn};
use serde_json::{json, Value};
use std::fs;

pub const MODULE: &str = "sphinx_rtd";

/// Printed by `make_run_livereload` when the docs group lacks livereload.
pub const LIVERELOAD_MISSING: &str =
    "\"livereload\" package not found in tasks_conf -> pyproject.optional_dependencies.docs";

/// True if any package name starts with `name`.
pub fn has_package(packages: &[String], name: &str) -> bool {
    packages.iter().any(|package| package.starts_with(name))
}

/// Message printed instead of writing the live-reload script, or `None`
/// when `docs` declares livereload.
pub fn livereload_missing(docs: &[String]) -> Option<&'static str> {
    if has_package(docs, "livereload") {
        None
    } else {
        Some(LIVERELOAD_MISSING)
    }
}

/// Quotes a value as a Python string literal unless it is quoted already.
pub fn python_str(value: &str) -> String {
    let quoted = value.len() >= 2
        && ((value.starts_with('\'') && value.ends_with('\''))
            || (value.starts_with('"') && value.ends_with('"')));
    if quoted {
        value.to_string()
    } else {
        format!("'{value}'")
    }
}

/// Python version from a `requires-python` specifier: `">=3.8"` gives `"3.8"`.
pub fn python_version(requires_python: &str) -> &str {
    requires_python
        .split(',')
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| "<>=~!".contains(c) || c.is_whitespace())
        .trim_end()
}

/// Sets `value[path[0]][path[1]]...`, creating intermediate mappings.
fn set_key(value: &mut Value, path: &[&str], new_value: Value) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };
    let not_a_mapping =
        |key: &str| Error::ConfigError(format!("rtd_config: '{key}' must be a mapping"));

    let mut current = value;
    for key in parents {
        current = current
            .as_object_mut()
            .ok_or_else(|| not_a_mapping(*key))?
            .entry(key.to_string())
            .or_insert_with(|| json!({}));
    }
    current
        .as_object_mut()
        .ok_or_else(|| not_a_mapping(*last))?
        .insert(last.to_string(), new_value);
    Ok(())
}

/// Context for rendering file templates: the manifest's `[project]` table
/// and the Sphinx paths.
fn template_context(ctx: &Context) -> Result<Value> {
    let paths = &ctx.config()?.sphinx()?.paths;
    let manifest = ctx.manifest();
    let project_table = if manifest.path().exists() {
        let doc = manifest.load()?;
        project(&doc).map(serde_json::to_value).transpose()?.unwrap_or(Value::Null)
    } else {
        Value::Null
    };

    Ok(json!({
        "project": project_table,
        "sphinx": {
            "parent": paths.parent_dir().display().to_string(),
            "source": paths.source_dir().display().to_string(),
        },
    }))
}

pub fn add_opt_deps(ctx: &Context) -> Result<()> {
    let groups = &ctx.config()?.pyproject.optional_dependencies;
    ctx.manifest().update(|doc| add_optional_dependencies(doc, groups))?;
    info!(
        "Optional dependency groups written: {}",
        groups.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

pub fn install_opt_deps(ctx: &Context) -> Result<()> {
    let installer = &ctx.config()?.publish.installer;
    let doc = ctx.manifest().load()?;
    for package in optional_dependency_packages(&doc)? {
        ctx.run(ProcessCommand::new(installer).args(["install".to_string(), package]))?;
    }
    Ok(())
}

pub fn start_sphinx(ctx: &Context) -> Result<()> {
    let parent = ctx.config()?.sphinx()?.paths.parent_dir();
    let target = ctx.path(&parent);
    if target.exists() {
        warn!("{} already exists", target.display());
    }
    fs::create_dir_all(&target)?;
    ctx.run(ProcessCommand::new("sphinx-quickstart").current_dir(&parent))
}

pub fn move_readme(ctx: &Context) -> Result<()> {
    let parent = ctx.config()?.sphinx()?.paths.parent_dir();

    let mut readmes = Vec::new();
    for entry in fs::read_dir(ctx.root())? {
        let entry = entry?;
        let is_readme = entry.file_name().to_string_lossy().starts_with("README");
        if is_readme && entry.file_type()?.is_file() {
            readmes.push(entry.path());
        }
    }
    readmes.sort();

    match readmes.first() {
        Some(readme) => {
            move_file(readme, ctx.path(&parent))?;
        }
        None => warn!("No README file in {}", ctx.root().display()),
    }
    Ok(())
}

pub fn update_index(ctx: &Context) -> Result<()> {
    let conf = ctx.path(ctx.config()?.sphinx()?.paths.conf_file());
    let project_name = get_var_val(&conf, "project")?;
    info!("Sphinx project: {}", project_name);
    Ok(())
}

pub fn update_conf(ctx: &Context) -> Result<()> {
    let sphinx = ctx.config()?.sphinx()?;
    let conf = ctx.path(sphinx.paths.conf_file());

    match sphinx.conf.html_theme.as_deref() {
        Some(theme) if !theme.is_empty() => {
            replace_var_val(&conf, "html_theme", &python_str(theme))?;
            info!("html_theme set to {}", theme);
        }
        _ => debug!("No html_theme configured"),
    }

    if let Some(pattern) = sphinx.conf.exclude_patterns.as_deref().filter(|p| !p.is_empty()) {
        append_list_entry_in_file(&conf, "exclude_patterns", pattern)?;
        info!("'{}' added to exclude_patterns", pattern);
    }
    Ok(())
}

pub fn make_run_livereload(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    if let Some(message) = livereload_missing(config.optional_group("docs")) {
        println!("{message}");
        return Ok(());
    }

    let template = config.template_text("run_livereload")?;
    let content = if config.renders_template("run_livereload") {
        ctx.render(template, &template_context(ctx)?)?
    } else {
        template.to_string()
    };
    let target = ctx.path(config.sphinx()?.paths.parent_dir().join(LIVERELOAD_FILE));
    fs::write(&target, content)?;
    info!("Generated {}", target.display());
    Ok(())
}

pub fn make_rtd_conf(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let doc = ctx.manifest().load()?;
    let conf_file = config.sphinx()?.paths.conf_file();

    let mut rtd_config = config.template("rtd_config")?.clone();
    set_key(&mut rtd_config, &["version"], json!(project_version(&doc)?))?;
    set_key(
        &mut rtd_config,
        &["build", "tools", "python"],
        json!(python_version(requires_python(&doc)?)),
    )?;
    set_key(
        &mut rtd_config,
        &["sphinx", "configuration"],
        json!(conf_file.display().to_string()),
    )?;

    let target = ctx.path(RTD_CONFIG_FILE);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, serde_yaml::to_string(&rtd_config)?)?;
    info!("Generated {}", target.display());
    Ok(())
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task::new(
            MODULE,
            "add_opt_deps",
            "Write configured optional dependency groups to pyproject.toml",
            add_opt_deps,
        ),
        Task::new(
            MODULE,
            "install_opt_deps",
            "Install every optional dependency of pyproject.toml",
            install_opt_deps,
        ),
        Task::new(MODULE, "start_sphinx", "Quick-start Sphinx in the docs directory", start_sphinx),
        Task::new(MODULE, "move_readme", "Move the README into the Sphinx directory", move_readme),
        Task::new(MODULE, "update_index", "Read the project name from conf.py", update_index),
        Task::new(
            MODULE,
            "update_conf",
            "Set the theme and exclude patterns in conf.py",
            update_conf,
        ),
        Task::new(
            MODULE,
            "make_run_livereload",
            "Write run_livereload.py when livereload is a docs dependency",
            make_run_livereload,
        ),
        Task::new(
            MODULE,
            "make_rtd_conf",
            "Generate docs/.readthedocs.yml from pyproject.toml",
            make_rtd_conf,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_version() {
        assert_eq!(python_version(">=3.8"), "3.8");
        assert_eq!(python_version(">= 3.10, <4"), "3.10");
        assert_eq!(python_version("3.12"), "3.12");
    }

    #[test]
    fn test_python_str() {
        assert_eq!(python_str("furo"), "'furo'");
        assert_eq!(python_str("\"furo\""), "\"furo\"");
        assert_eq!(python_str("'furo'"), "'furo'");
    }

    #[test]
    fn test_set_key_creates_mappings() {
        let mut value = json!({"version": 2});
        set_key(&mut value, &["build", "tools", "python"], json!("3.11")).unwrap();
        assert_eq!(value, json!({"version": 2, "build": {"tools": {"python": "3.11"}}}));
    }
}
