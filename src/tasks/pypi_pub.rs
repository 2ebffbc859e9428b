//! Packaging tasks: build requirements and upload with the publishing tool.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::manifest::{add_build_requirements, build_requirements};
use crate::runner::ProcessCommand;
use crate::task::Task;
use globset::{Glob, GlobSetBuilder};
use log::{info, warn};
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;

pub const MODULE: &str = "pypi_pub";

pub fn add_build_reqs(ctx: &Context) -> Result<()> {
    let requires = &ctx.config()?.pyproject.build.requires;
    ctx.manifest().update(|doc| add_build_requirements(doc, requires))?;
    info!("Build requirements added to {}", ctx.manifest().path().display());
    Ok(())
}

pub fn install_build_reqs(ctx: &Context) -> Result<()> {
    let installer = &ctx.config()?.publish.installer;
    let doc = ctx.manifest().load()?;
    for package in build_requirements(&doc)? {
        ctx.run(ProcessCommand::new(installer).args(["install".to_string(), package]))?;
    }
    Ok(())
}

pub fn upgrade_twine(ctx: &Context) -> Result<()> {
    let publish = &ctx.config()?.publish;
    let command = ProcessCommand::new(&publish.installer).args([
        "install",
        "--upgrade",
        publish.publisher.as_str(),
    ]);
    ctx.run(command)
}

pub fn test_twine_upload(ctx: &Context) -> Result<()> {
    let publish = &ctx.config()?.publish;
    upload(ctx, &publish.test_repository)
}

pub fn twine_upload(ctx: &Context) -> Result<()> {
    let publish = &ctx.config()?.publish;
    let prompt = format!("Upload the distribution to '{}'?", publish.repository);
    if !ctx.confirm(prompt)? {
        warn!("Upload to '{}' cancelled", publish.repository);
        return Ok(());
    }
    upload(ctx, &publish.repository)
}

fn upload(ctx: &Context, repository: &str) -> Result<()> {
    let publish = &ctx.config()?.publish;
    let artifacts = collect_artifacts(ctx.root(), &publish.dist_dir, &publish.artifacts)?;
    let command = ProcessCommand::new(&publish.publisher)
        .arg("upload")
        .args(repository_args(repository))
        .args(artifacts.iter().map(|a| a.display().to_string()));
    ctx.run(command)
}

/// Publisher flags selecting `repository`: a URL is passed with
/// `--repository-url`, anything else is a named repository.
pub fn repository_args(repository: &str) -> Vec<String> {
    let is_url = Url::parse(repository)
        .map(|url| url.scheme() == "https" || url.scheme() == "http")
        .unwrap_or(false);
    let flag = if is_url { "--repository-url" } else { "--repository" };
    vec![flag.to_string(), repository.to_string()]
}

/// Lists the files of `dist_dir` whose names match one of `patterns`.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Paths relative to `root`, sorted by name
///
/// # Errors
/// * `Error::ArtifactsNotFoundError` if the directory is missing or nothing
///   matches
pub fn collect_artifacts<P: AsRef<Path>>(
    root: P,
    dist_dir: &str,
    patterns: &[String],
) -> Result<Vec<PathBuf>> {
    let not_found = || Error::ArtifactsNotFoundError { dist_dir: dist_dir.to_string() };
    let dist_path = root.as_ref().join(dist_dir);
    if !dist_path.is_dir() {
        return Err(not_found());
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    let globs = builder.build()?;

    let mut artifacts = Vec::new();
    for entry in WalkDir::new(&dist_path).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name();
        if globs.is_match(Path::new(file_name)) {
            artifacts.push(Path::new(dist_dir).join(file_name));
        }
    }

    if artifacts.is_empty() {
        return Err(not_found());
    }
    Ok(artifacts)
}

pub fn tasks() -> Vec<Task> {
    vec![
        Task::new(
            MODULE,
            "add_build_reqs",
            "Add configured build requirements to pyproject.toml",
            add_build_reqs,
        ),
        Task::new(
            MODULE,
            "install_build_reqs",
            "Install the build requirements of pyproject.toml",
            install_build_reqs,
        ),
        Task::new(MODULE, "upgrade_twine", "Upgrade the publishing tool", upgrade_twine),
        Task::new(
            MODULE,
            "test_twine_upload",
            "Upload the distribution to the test index",
            test_twine_upload,
        ),
        Task::new(
            MODULE,
            "twine_upload",
            "Upload the distribution to the production index",
            twine_upload,
        )
        .prerequisites(&["upgrade_twine"]),
    ]
}
