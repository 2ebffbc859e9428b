//! Shared state handed to every task action.

use crate::config::{load_config, TasksConfig};
use crate::constants::MANIFEST_FILE;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::runner::{CommandRunner, ProcessCommand};
use log::warn;
use std::cell::{Cell, OnceCell};
use std::path::{Path, PathBuf};

/// Execution context of one invocation.
///
/// The tasks configuration is loaded on first use and kept for the rest of
/// the invocation; manifests and other files are always read fresh.
pub struct Context<'a> {
    root: PathBuf,
    runner: &'a dyn CommandRunner,
    prompt: &'a dyn Prompter,
    renderer: &'a dyn TemplateRenderer,
    skip_confirm: bool,
    config: OnceCell<TasksConfig>,
    exit_code: Cell<Option<i32>>,
}

impl<'a> Context<'a> {
    pub fn new<P: Into<PathBuf>>(
        root: P,
        runner: &'a dyn CommandRunner,
        prompt: &'a dyn Prompter,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self {
            root: root.into(),
            runner,
            prompt,
            renderer,
            skip_confirm: false,
            config: OnceCell::new(),
            exit_code: Cell::new(None),
        }
    }

    /// Answer every confirmation with "yes".
    pub fn skip_confirm(mut self, skip_confirm: bool) -> Self {
        self.skip_confirm = skip_confirm;
        self
    }

    /// Uses `config` instead of reading the configuration file, replacing
    /// any configuration loaded before.
    pub fn with_config(mut self, config: TasksConfig) -> Self {
        self.config = OnceCell::from(config);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a project-relative path.
    pub fn path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.root.join(relative)
    }

    pub fn config(&self) -> Result<&TasksConfig> {
        if let Some(config) = self.config.get() {
            return Ok(config);
        }
        let config = load_config(&self.root)?;
        Ok(self.config.get_or_init(|| config))
    }

    pub fn manifest(&self) -> Manifest {
        Manifest::new(self.path(MANIFEST_FILE))
    }

    /// Runs an external command.
    ///
    /// A non-zero exit status does not stop the task chain; it is logged and
    /// remembered as the exit code of the invocation.
    pub fn run(&self, command: ProcessCommand) -> Result<()> {
        if let Some(code) = self.runner.run(&command)? {
            warn!("'{}' exited with status {}", command, code);
            self.exit_code.set(Some(code));
        }
        Ok(())
    }

    pub fn confirm<S: Into<String>>(&self, prompt: S) -> Result<bool> {
        self.prompt.confirm(self.skip_confirm, prompt.into())
    }

    pub fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.renderer.render(template, context)
    }

    /// Exit code of the last failed external command, if any.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, ConfigFormat};
    use crate::prompt::DialoguerPrompter;
    use crate::renderer::MiniJinjaRenderer;
    use crate::runner::DryRunner;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_with_config_replaces_loaded_config() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("tasks")).unwrap();
        fs::write(
            dir.path().join("tasks/tasks_conf.toml"),
            "[publish]\ninstaller = \"uv\"\n",
        )
        .unwrap();
        let (runner, prompt, renderer) =
            (DryRunner, DialoguerPrompter::new(), MiniJinjaRenderer::new());

        let ctx = Context::new(dir.path(), &runner, &prompt, &renderer);
        assert_eq!(ctx.config().unwrap().publish.installer, "uv");

        let ctx = ctx.with_config(parse_config("", ConfigFormat::Toml).unwrap());
        assert_eq!(ctx.config().unwrap().publish.installer, "pip");
    }
}
