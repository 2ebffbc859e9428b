//! Command-line interface implementation for cookiepowder.
//! Provides argument parsing and task listing using clap.

use crate::modules::ModuleList;
use crate::task::{display_name, Registry};
use crate::tasks::invocable;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for `powder`.
#[derive(Parser, Debug)]
#[command(author, version, about = "powder: routine chores for your generated project", long_about = None)]
pub struct Args {
    /// Tasks to run, in order; prerequisites run first
    #[arg(value_name = "TASK")]
    pub tasks: Vec<String>,

    /// List the available tasks
    #[arg(short, long)]
    pub list: bool,

    /// Project root directory
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log external commands instead of running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Answer "yes" to every confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}

/// Formats the invocable tasks, one per line, with their help text.
pub fn task_listing(registry: &Registry, modules: &ModuleList) -> String {
    let names: Vec<(String, &str)> = invocable(registry, modules)
        .map(|task| (display_name(task.name()), task.help()))
        .collect();
    let width = names.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let mut out = String::from("Available tasks:\n\n");
    for (name, help) in names {
        out.push_str(&format!("  {name:<width$}  {help}\n"));
    }
    out
}
