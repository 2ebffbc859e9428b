//! Enabled task modules.
//!
//! `tasks/modules.toml` lists the task modules whose tasks can be invoked
//! directly. Tasks of other modules still run as prerequisites.

use crate::error::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Module always enabled: holds the chained setup tasks.
pub const BASE_MODULE: &str = "run";

/// Modules toggled by `show_all` / `hide_extra`.
pub const EXTRA_MODULES: [&str; 2] = ["pypi_pub", "sphinx_rtd"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleList {
    pub modules: Vec<String>,
}

impl Default for ModuleList {
    fn default() -> Self {
        Self { modules: vec![BASE_MODULE.to_string()] }
    }
}

impl ModuleList {
    /// Reads the module list; a missing file yields the default list.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("{} does not exist, using default modules", path.display());
            return Ok(Self::default());
        }
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }

    pub fn is_enabled(&self, module: &str) -> bool {
        module == BASE_MODULE || self.modules.iter().any(|m| m == module)
    }

    /// True once every extra module is enabled.
    pub fn extras_shown(&self) -> bool {
        EXTRA_MODULES.iter().all(|m| self.is_enabled(m))
    }

    /// True while any extra module is enabled.
    pub fn any_extra_shown(&self) -> bool {
        EXTRA_MODULES.iter().any(|m| self.is_enabled(m))
    }

    /// Enables the extra modules, keeping existing entries.
    pub fn show_extras(mut self) -> Self {
        for module in EXTRA_MODULES {
            if !self.modules.iter().any(|m| m == module) {
                self.modules.push(module.to_string());
            }
        }
        self
    }

    /// Disables the extra modules; any other entry is kept.
    pub fn hide_extras(mut self) -> Self {
        self.modules.retain(|m| !EXTRA_MODULES.contains(&m.as_str()));
        self
    }
}
