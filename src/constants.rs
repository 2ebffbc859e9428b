//! Common constants used throughout cookiepowder.

/// Project manifest edited by the packaging and docs tasks
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// Supported tasks configuration file names, tried in order
pub const CONFIG_FILES: [&str; 4] = [
    "tasks/tasks_conf.toml",
    "tasks/tasks_conf.yaml",
    "tasks/tasks_conf.yml",
    "tasks/tasks_conf.json",
];

/// Declarative list of enabled task modules
pub const MODULES_FILE: &str = "tasks/modules.toml";

/// Read the Docs configuration written by `make_rtd_conf`
pub const RTD_CONFIG_FILE: &str = "docs/.readthedocs.yml";

/// Live-reload helper written next to the Sphinx sources
pub const LIVERELOAD_FILE: &str = "run_livereload.py";

/// Sphinx configuration file inside the source directory
pub const SPHINX_CONF_FILE: &str = "conf.py";
