//! Built-in task modules.
//!
//! * `run` - chained Sphinx setup and module visibility toggles
//! * `pypi_pub` - build requirements and package upload
//! * `sphinx_rtd` - Sphinx and Read the Docs scaffolding

pub mod pypi_pub;
pub mod run;
pub mod sphinx_rtd;

use crate::error::{Error, Result};
use crate::modules::ModuleList;
use crate::task::{normalize_name, Registry, Task};

/// Builds and validates the registry of every built-in task.
///
/// All modules are registered so that their tasks can serve as
/// prerequisites; `modules` only decides which toggle tasks exist.
pub fn registry(modules: &ModuleList) -> Result<Registry> {
    let mut registry = Registry::new();
    let tasks = run::tasks(modules)
        .into_iter()
        .chain(pypi_pub::tasks())
        .chain(sphinx_rtd::tasks());
    for task in tasks {
        registry.register(task)?;
    }
    registry.validate()?;
    Ok(registry)
}

/// Tasks the user may invoke directly.
pub fn invocable<'r>(
    registry: &'r Registry,
    modules: &'r ModuleList,
) -> impl Iterator<Item = &'r Task> {
    registry.tasks().filter(|task| modules.is_enabled(task.module()))
}

/// Looks up a task given on the command line.
///
/// # Errors
/// * `Error::UnknownTaskError` if there is no such task or its module is
///   not enabled
pub fn resolve<'r>(registry: &'r Registry, modules: &ModuleList, name: &str) -> Result<&'r Task> {
    registry
        .get(&normalize_name(name))
        .filter(|task| modules.is_enabled(task.module()))
        .ok_or_else(|| Error::UnknownTaskError { name: name.to_string() })
}
