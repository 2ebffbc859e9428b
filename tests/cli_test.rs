use cookiepowder::cli::{task_listing, Args};
use cookiepowder::modules::ModuleList;
use cookiepowder::tasks::registry;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("powder")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["init-sphinx"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.tasks, vec!["init-sphinx"]);
    assert_eq!(parsed.project_dir, PathBuf::from("."));
    assert!(!parsed.list);
    assert!(!parsed.verbose);
    assert!(!parsed.dry_run);
    assert!(!parsed.yes);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--list",
        "--verbose",
        "--dry-run",
        "--yes",
        "--project-dir",
        "./my-lib",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.list);
    assert!(parsed.verbose);
    assert!(parsed.dry_run);
    assert!(parsed.yes);
    assert_eq!(parsed.project_dir, PathBuf::from("./my-lib"));
    assert!(parsed.tasks.is_empty());
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-l", "-v", "-n", "-y", "-C", "proj"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.list);
    assert!(parsed.verbose);
    assert!(parsed.dry_run);
    assert!(parsed.yes);
    assert_eq!(parsed.project_dir, PathBuf::from("proj"));
}

#[test]
fn test_multiple_tasks_keep_order() {
    let args = make_args(&["setup-sphinx", "init_sphinx"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.tasks, vec!["setup-sphinx", "init_sphinx"]);
}

#[test]
fn test_unknown_flag() {
    let args = make_args(&["--force", "init-sphinx"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_task_listing_shows_only_enabled_modules() {
    let modules = ModuleList::default();
    let registry = registry(&modules).unwrap();
    let listing = task_listing(&registry, &modules);

    assert!(listing.contains("init-sphinx"));
    assert!(listing.contains("setup-sphinx"));
    assert!(listing.contains("show-all"));
    assert!(!listing.contains("hide-extra"));
    assert!(!listing.contains("twine-upload"));
}
