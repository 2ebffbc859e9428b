#![allow(dead_code)]

use cookiepowder::error::Result;
use cookiepowder::prompt::Prompter;
use cookiepowder::runner::{CommandRunner, ProcessCommand};
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

pub const TASKS_CONF: &str = r#"
[pyproject.build]
requires = ["setuptools>=61", "wheel"]

[pyproject.optional_dependencies]
docs = ["sphinx", "sphinx-rtd-theme", "livereload >=2.6"]
test = ["pytest"]

[sphinx.paths]
parent = "docs/sphinx/"
source = "source/"

[sphinx.conf]
html_theme = "sphinx_rtd_theme"
exclude_patterns = "README.md"

[file_templates]
run_livereload = """
from livereload import Server, shell
# {{ project.name }}
print(f"serving on {{port}}")
server = Server()
server.serve(root="build/html")
"""

[file_templates.rtd_config]
version = 2

[file_templates.rtd_config.build]
os = "ubuntu-22.04"

[file_templates.rtd_config.build.tools]
python = "3"

[file_templates.rtd_config.sphinx]
configuration = ""
"#;

pub const PYPROJECT: &str = r#"[build-system]
requires = ["setuptools>=61"]
build-backend = "setuptools.build_meta"

[project]
name = "my-lib"
version = "0.1.0"
requires-python = ">=3.8"
"#;

pub const SPHINX_CONF: &str = "project = 'my-lib'
copyright = '2024, Jane'
extensions = []
templates_path = ['_templates']
exclude_patterns = ['_build', 'Thumbs.db']
html_theme = 'alabaster'
html_static_path = ['_static']
";

/// Creates a project directory holding `files` (relative path, content).
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let path = dir.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

/// Remembers every command instead of running it.
#[derive(Default)]
pub struct RecordingRunner {
    pub commands: RefCell<Vec<ProcessCommand>>,
    pub exit_code: Option<i32>,
}

impl RecordingRunner {
    pub fn failing(code: i32) -> Self {
        Self { commands: RefCell::new(Vec::new()), exit_code: Some(code) }
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.commands.borrow().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &ProcessCommand) -> Result<Option<i32>> {
        self.commands.borrow_mut().push(command.clone());
        Ok(self.exit_code)
    }
}

/// Gives the same answer to every question.
pub struct FixedPrompter(pub bool);

impl Prompter for FixedPrompter {
    fn confirm(&self, skip_prompt: bool, _prompt: String) -> Result<bool> {
        Ok(skip_prompt || self.0)
    }
}
