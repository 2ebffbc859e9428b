//! Task units and their dependency-ordered execution.
//!
//! Tasks declare the tasks that must run before them. The registry checks
//! that every prerequisite exists and that the prerequisite graph has no
//! cycles, then computes a depth-first topological order: prerequisites in
//! declared order, each task once, before anything runs.

use crate::context::Context;
use crate::error::{Error, Result};
use cruet::Inflector;
use indexmap::IndexMap;
use log::{debug, info};
use std::collections::HashSet;

pub type TaskAction = Box<dyn Fn(&Context) -> Result<()>>;

/// A named unit of work.
pub struct Task {
    name: String,
    module: String,
    help: String,
    prerequisites: Vec<String>,
    action: TaskAction,
}

impl Task {
    pub fn new<F>(module: &str, name: &str, help: &str, action: F) -> Self
    where
        F: Fn(&Context) -> Result<()> + 'static,
    {
        Self {
            name: name.to_string(),
            module: module.to_string(),
            help: help.to_string(),
            prerequisites: Vec::new(),
            action: Box::new(action),
        }
    }

    /// Sets the tasks that run before this one, in order.
    pub fn prerequisites(mut self, prerequisites: &[&str]) -> Self {
        self.prerequisites = prerequisites.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn prerequisite_names(&self) -> &[String] {
        &self.prerequisites
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("module", &self.module)
            .field("prerequisites", &self.prerequisites)
            .finish_non_exhaustive()
    }
}

/// Normalizes a task name given on the command line (`init-sphinx`) to the
/// registered form (`init_sphinx`).
pub fn normalize_name(name: &str) -> String {
    name.to_snake_case()
}

/// Name of a task as shown to the user.
pub fn display_name(name: &str) -> String {
    name.to_kebab_case()
}

#[derive(Debug, Default)]
pub struct Registry {
    tasks: IndexMap<String, Task>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// * `Error::DuplicateTaskError` if a task of that name exists
    pub fn register(&mut self, task: Task) -> Result<()> {
        if self.tasks.contains_key(&task.name) {
            return Err(Error::DuplicateTaskError { name: task.name });
        }
        self.tasks.insert(task.name.clone(), task);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Checks that all prerequisites exist and that the graph is acyclic.
    pub fn validate(&self) -> Result<()> {
        for task in self.tasks.values() {
            for prerequisite in task.prerequisite_names() {
                if !self.tasks.contains_key(prerequisite) {
                    return Err(Error::UnknownPrerequisiteError {
                        task: task.name.clone(),
                        prerequisite: prerequisite.clone(),
                    });
                }
            }
        }

        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = Vec::new();
        for name in self.tasks.keys() {
            self.visit(name, &mut order, &mut seen, &mut stack)?;
        }
        Ok(())
    }

    /// Computes the execution order for `targets`.
    ///
    /// # Returns
    /// * `Result<Vec<&str>>` - Task names, prerequisites first, each once
    ///
    /// # Errors
    /// * `Error::UnknownTaskError` if a target or prerequisite is not registered
    /// * `Error::CycleError` if the prerequisites form a cycle
    pub fn plan<S: AsRef<str>>(&self, targets: &[S]) -> Result<Vec<&str>> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = Vec::new();
        for target in targets {
            self.visit(target.as_ref(), &mut order, &mut seen, &mut stack)?;
        }
        Ok(order)
    }

    fn visit<'r>(
        &'r self,
        name: &str,
        order: &mut Vec<&'r str>,
        seen: &mut HashSet<&'r str>,
        stack: &mut Vec<&'r str>,
    ) -> Result<()> {
        let (key, task) = self
            .tasks
            .get_key_value(name)
            .ok_or_else(|| Error::UnknownTaskError { name: name.to_string() })?;
        let key = key.as_str();

        if let Some(pos) = stack.iter().position(|n| *n == key) {
            let mut path: Vec<String> = stack[pos..].iter().map(|n| n.to_string()).collect();
            path.push(key.to_string());
            return Err(Error::CycleError { path });
        }
        if seen.contains(key) {
            return Ok(());
        }

        stack.push(key);
        for prerequisite in &task.prerequisites {
            self.visit(prerequisite, order, seen, stack)?;
        }
        stack.pop();

        seen.insert(key);
        order.push(key);
        Ok(())
    }

    /// Validates the registry and runs `targets` with their prerequisites.
    ///
    /// The first failing action stops the chain.
    pub fn run<S: AsRef<str>>(&self, targets: &[S], ctx: &Context) -> Result<()> {
        self.validate()?;
        let order = self.plan(targets)?;
        debug!("Execution order: {}", order.join(", "));

        for name in order {
            if let Some(task) = self.tasks.get(name) {
                info!("Running task '{}'", display_name(name));
                (task.action)(ctx)?;
            }
        }
        Ok(())
    }
}
