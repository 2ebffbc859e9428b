//! Chained Sphinx setup tasks and the extra-module visibility toggles.

use crate::constants::MODULES_FILE;
use crate::context::Context;
use crate::error::Result;
use crate::modules::{ModuleList, BASE_MODULE};
use crate::task::Task;
use log::info;

pub const MODULE: &str = BASE_MODULE;

pub fn init_sphinx(_ctx: &Context) -> Result<()> {
    info!("Initializing Sphinx");
    Ok(())
}

pub fn setup_sphinx(_ctx: &Context) -> Result<()> {
    info!("Setting up Sphinx");
    Ok(())
}

pub fn show_all(ctx: &Context) -> Result<()> {
    let path = ctx.path(MODULES_FILE);
    ModuleList::load(&path)?.show_extras().save(&path)?;
    info!("Enabled task modules in {}", path.display());
    Ok(())
}

pub fn hide_extra(ctx: &Context) -> Result<()> {
    let path = ctx.path(MODULES_FILE);
    ModuleList::load(&path)?.hide_extras().save(&path)?;
    info!("Disabled extra task modules in {}", path.display());
    Ok(())
}

/// Tasks of the `run` module. The visibility toggles are only offered when
/// they would change something.
pub fn tasks(modules: &ModuleList) -> Vec<Task> {
    let mut tasks = vec![
        Task::new(
            MODULE,
            "init_sphinx",
            "Add docs dependencies, install them and quick-start Sphinx",
            init_sphinx,
        )
        .prerequisites(&["add_opt_deps", "install_opt_deps", "start_sphinx"]),
        Task::new(
            MODULE,
            "setup_sphinx",
            "Patch the generated Sphinx configuration",
            setup_sphinx,
        )
        .prerequisites(&["update_index", "update_conf", "make_run_livereload"]),
    ];

    if !modules.extras_shown() {
        tasks.push(Task::new(
            MODULE,
            "show_all",
            "Make the pypi_pub and sphinx_rtd tasks invocable",
            show_all,
        ));
    }
    if modules.any_extra_shown() {
        tasks.push(Task::new(
            MODULE,
            "hide_extra",
            "Hide the pypi_pub and sphinx_rtd tasks again",
            hide_extra,
        ));
    }
    tasks
}
