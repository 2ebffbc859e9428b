mod common;

use common::{FixedPrompter, RecordingRunner};
use cookiepowder::context::Context;
use cookiepowder::error::Error;
use cookiepowder::renderer::MiniJinjaRenderer;
use cookiepowder::task::{display_name, normalize_name, Registry, Task};
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::TempDir;

type Log = Rc<RefCell<Vec<String>>>;

fn recording_task(log: &Log, name: &str, prerequisites: &[&str]) -> Task {
    let log = Rc::clone(log);
    let owned = name.to_string();
    Task::new("test", name, "", move |_ctx| {
        log.borrow_mut().push(owned.clone());
        Ok(())
    })
    .prerequisites(prerequisites)
}

fn registry(log: &Log, tasks: &[(&str, &[&str])]) -> Registry {
    let mut registry = Registry::new();
    for (name, prerequisites) in tasks {
        registry.register(recording_task(log, name, prerequisites)).unwrap();
    }
    registry
}

#[test]
fn test_plan_runs_prerequisites_in_declared_order() {
    let log = Log::default();
    let registry = registry(
        &log,
        &[
            ("add_opt_deps", &[]),
            ("install_opt_deps", &[]),
            ("start_sphinx", &[]),
            ("init_sphinx", &["add_opt_deps", "install_opt_deps", "start_sphinx"]),
        ],
    );

    assert_eq!(
        registry.plan(&["init_sphinx"]).unwrap(),
        vec!["add_opt_deps", "install_opt_deps", "start_sphinx", "init_sphinx"]
    );
}

#[test]
fn test_shared_prerequisite_runs_once() {
    let log = Log::default();
    let registry = registry(
        &log,
        &[
            ("a", &[]),
            ("b", &["a"]),
            ("c", &["a"]),
            ("d", &["b", "c"]),
        ],
    );

    assert_eq!(registry.plan(&["d"]).unwrap(), vec!["a", "b", "c", "d"]);
    assert_eq!(registry.plan(&["c", "d"]).unwrap(), vec!["a", "c", "b", "d"]);
}

#[test]
fn test_cycle_is_detected() {
    let log = Log::default();
    let registry = registry(&log, &[("a", &["c"]), ("b", &["a"]), ("c", &["b"]), ("d", &[])]);

    match registry.validate() {
        Err(Error::CycleError { path }) => assert_eq!(path, vec!["a", "c", "b", "a"]),
        other => panic!("Expected CycleError, got {other:?}"),
    }
    assert!(matches!(registry.plan(&["b"]), Err(Error::CycleError { .. })));
    // planning only walks the tasks reachable from the targets
    assert!(registry.plan(&["d"]).is_ok());
}

#[test]
fn test_unknown_tasks() {
    let log = Log::default();
    let registry = registry(&log, &[("a", &["missing"])]);

    assert!(matches!(
        registry.validate(),
        Err(Error::UnknownPrerequisiteError { .. })
    ));
    assert!(matches!(
        registry.plan(&["nope"]),
        Err(Error::UnknownTaskError { .. })
    ));
}

#[test]
fn test_duplicate_registration() {
    let log = Log::default();
    let mut registry = registry(&log, &[("a", &[])]);
    assert!(matches!(
        registry.register(recording_task(&log, "a", &[])),
        Err(Error::DuplicateTaskError { .. })
    ));
}

#[test]
fn test_run_executes_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let (runner, prompt, renderer) =
        (RecordingRunner::default(), FixedPrompter(true), MiniJinjaRenderer::new());
    let ctx = Context::new(temp_dir.path(), &runner, &prompt, &renderer);

    let log = Log::default();
    let registry = registry(
        &log,
        &[("upgrade_twine", &[]), ("twine_upload", &["upgrade_twine"])],
    );
    registry.run(&["twine_upload", "upgrade_twine"], &ctx).unwrap();

    assert_eq!(*log.borrow(), vec!["upgrade_twine", "twine_upload"]);
}

#[test]
fn test_cycle_prevents_any_action() {
    let temp_dir = TempDir::new().unwrap();
    let (runner, prompt, renderer) =
        (RecordingRunner::default(), FixedPrompter(true), MiniJinjaRenderer::new());
    let ctx = Context::new(temp_dir.path(), &runner, &prompt, &renderer);

    let log = Log::default();
    let registry = registry(&log, &[("ok", &[]), ("x", &["y"]), ("y", &["x"])]);

    assert!(registry.run(&["ok"], &ctx).is_err());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_failing_action_stops_chain() {
    let temp_dir = TempDir::new().unwrap();
    let (runner, prompt, renderer) =
        (RecordingRunner::default(), FixedPrompter(true), MiniJinjaRenderer::new());
    let ctx = Context::new(temp_dir.path(), &runner, &prompt, &renderer);

    let log = Log::default();
    let mut registry = registry(&log, &[("after", &["broken"])]);
    registry
        .register(Task::new("test", "broken", "", |_ctx| {
            Err(Error::ConfigError("boom".to_string()))
        }))
        .unwrap();

    assert!(matches!(registry.run(&["after"], &ctx), Err(Error::ConfigError(_))));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_name_conversion() {
    assert_eq!(normalize_name("init-sphinx"), "init_sphinx");
    assert_eq!(normalize_name("make_rtd_conf"), "make_rtd_conf");
    assert_eq!(display_name("test_twine_upload"), "test-twine-upload");
}
