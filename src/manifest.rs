//! Project manifest (`pyproject.toml`) editing.
//!
//! Edits follow a load -> transform -> save pipeline: every transform takes
//! the parsed document by value and returns the updated document, so the
//! merge rules can be exercised without touching the file system.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

/// Handle on a manifest file.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
}

impl Manifest {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the manifest.
    pub fn load(&self) -> Result<Table> {
        debug!("Loading manifest {}", self.path.display());
        let content = fs::read_to_string(&self.path)?;
        Ok(content.parse::<Table>()?)
    }

    /// Serializes `doc` over the manifest file.
    pub fn save(&self, doc: &Table) -> Result<()> {
        fs::write(&self.path, toml::to_string(doc)?)?;
        debug!("Saved manifest {}", self.path.display());
        Ok(())
    }

    /// Loads the manifest, applies `transform` and saves the result.
    ///
    /// Nothing is written when the transform fails.
    pub fn update<F>(&self, transform: F) -> Result<Table>
    where
        F: FnOnce(Table) -> Result<Table>,
    {
        let doc = transform(self.load()?)?;
        self.save(&doc)?;
        Ok(doc)
    }
}

/// Returns the table stored under `key`, creating it when absent.
fn table_entry<'a>(table: &'a mut Table, key: &str, path: &str) -> Result<&'a mut Table> {
    table
        .entry(key.to_string())
        .or_insert_with(|| Value::Table(Table::new()))
        .as_table_mut()
        .ok_or_else(|| Error::ManifestError(format!("'{path}' must be a table")))
}

fn string_list(value: &Value, path: &str) -> Result<Vec<String>> {
    let invalid = || Error::ManifestError(format!("'{path}' must be an array of strings"));
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

fn to_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

/// Appends each requirement missing from `build-system.requires`.
///
/// The section and key are created when absent. Membership is exact string
/// equality, so running this twice leaves the list unchanged.
///
/// # Errors
/// * `Error::ManifestError` if `build-system` or its `requires` key has the
///   wrong type
pub fn add_build_requirements(mut doc: Table, requirements: &[String]) -> Result<Table> {
    let build_system = table_entry(&mut doc, "build-system", "build-system")?;
    let requires = build_system
        .entry("requires".to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| {
            Error::ManifestError("'build-system.requires' must be an array".to_string())
        })?;

    for requirement in requirements {
        let value = Value::String(requirement.clone());
        if !requires.contains(&value) {
            debug!("Adding build requirement '{}'", requirement);
            requires.push(value);
        }
    }
    Ok(doc)
}

/// Sets `project.optional-dependencies` to exactly `groups`.
///
/// The table is rebuilt in the order of `groups`; groups already in the
/// manifest but absent from `groups` are dropped.
pub fn add_optional_dependencies(
    mut doc: Table,
    groups: &IndexMap<String, Vec<String>>,
) -> Result<Table> {
    let project = table_entry(&mut doc, "project", "project")?;
    let mut optional = Table::new();
    for (group, packages) in groups {
        debug!("Setting optional dependency group '{}'", group);
        optional.insert(group.clone(), to_array(packages));
    }
    project.insert("optional-dependencies".to_string(), Value::Table(optional));
    Ok(doc)
}

/// Packages listed in `build-system.requires`.
pub fn build_requirements(doc: &Table) -> Result<Vec<String>> {
    let requires = doc
        .get("build-system")
        .and_then(|build| build.get("requires"))
        .ok_or_else(|| {
            Error::ManifestError("missing 'build-system.requires'".to_string())
        })?;
    string_list(requires, "build-system.requires")
}

/// Optional dependency groups as declared in the manifest.
pub fn optional_dependencies(doc: &Table) -> Result<IndexMap<String, Vec<String>>> {
    let Some(groups) = project(doc).and_then(|p| p.get("optional-dependencies")) else {
        return Ok(IndexMap::new());
    };
    let groups = groups.as_table().ok_or_else(|| {
        Error::ManifestError("'project.optional-dependencies' must be a table".to_string())
    })?;
    groups
        .iter()
        .map(|(group, packages)| {
            let path = format!("project.optional-dependencies.{group}");
            Ok((group.clone(), string_list(packages, &path)?))
        })
        .collect()
}

/// Package names of every optional group, version constraints dropped.
///
/// Only the leading token before a space is kept, so `"sphinx >=7"` installs
/// `sphinx`.
pub fn optional_dependency_packages(doc: &Table) -> Result<Vec<String>> {
    Ok(optional_dependencies(doc)?
        .into_values()
        .flatten()
        .filter_map(|package| package.split_whitespace().next().map(str::to_string))
        .collect())
}

/// The `[project]` table, if present.
pub fn project(doc: &Table) -> Option<&Table> {
    doc.get("project").and_then(Value::as_table)
}

fn project_str<'a>(doc: &'a Table, key: &str) -> Result<&'a str> {
    project(doc)
        .and_then(|p| p.get(key))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::ManifestError(format!("missing string 'project.{key}'")))
}

pub fn project_version(doc: &Table) -> Result<&str> {
    project_str(doc, "version")
}

pub fn requires_python(doc: &Table) -> Result<&str> {
    project_str(doc, "requires-python")
}
