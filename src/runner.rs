//! External process execution.
//! Tasks describe the command they need as a [`ProcessCommand`] and hand it
//! to a [`CommandRunner`], which either spawns it or only logs it.

use crate::error::Result;
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A program invocation: program name, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl ProcessCommand {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into(), args: Vec::new(), cwd: None }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl fmt::Display for ProcessCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Trait for executing external commands.
pub trait CommandRunner {
    /// Runs the command to completion.
    ///
    /// # Returns
    /// * `Result<Option<i32>>` - `None` on success, the exit code otherwise
    ///   (`-1` when the process was killed by a signal)
    ///
    /// # Errors
    /// * `Error::IoError` if the program cannot be spawned
    fn run(&self, command: &ProcessCommand) -> Result<Option<i32>>;
}

/// Spawns commands with inherited stdio, so interactive tools keep working.
pub struct ShellRunner {
    root: PathBuf,
}

impl ShellRunner {
    /// Creates a runner resolving relative working directories against `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &ProcessCommand) -> Result<Option<i32>> {
        info!("Running: {}", command);
        let cwd = match &command.cwd {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        };
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .status()?;

        if status.success() {
            Ok(None)
        } else {
            Ok(Some(status.code().unwrap_or(-1)))
        }
    }
}

/// Logs commands without running them.
#[derive(Default)]
pub struct DryRunner;

impl CommandRunner for DryRunner {
    fn run(&self, command: &ProcessCommand) -> Result<Option<i32>> {
        match &command.cwd {
            Some(dir) => info!("[dry-run] (in {}) {}", dir.display(), command),
            None => info!("[dry-run] {}", command),
        }
        Ok(None)
    }
}
