//! `powder` entry point: parses arguments, builds the task registry and runs
//! the requested tasks.

use cookiepowder::{
    cli::{get_args, task_listing, Args},
    constants::MODULES_FILE,
    context::Context,
    error::{default_error_handler, Result},
    modules::ModuleList,
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    runner::{CommandRunner, DryRunner, ShellRunner},
    tasks::{registry, resolve},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_target(false)
        .format_timestamp(None)
        .init();

    match run(args) {
        Ok(Some(code)) => std::process::exit(code),
        Ok(None) => {}
        Err(err) => default_error_handler(err),
    }
}

/// Main application logic execution.
///
/// # Returns
/// * `Result<Option<i32>>` - Exit code of the last failed external command
///
/// # Flow
/// 1. Reads the enabled task modules
/// 2. Builds and validates the task registry
/// 3. Lists tasks, or resolves the requested ones
/// 4. Runs them with their prerequisites
fn run(args: Args) -> Result<Option<i32>> {
    let root = args.project_dir;
    let modules = ModuleList::load(root.join(MODULES_FILE))?;
    let registry = registry(&modules)?;

    if args.list || args.tasks.is_empty() {
        print!("{}", task_listing(&registry, &modules));
        return Ok(None);
    }

    let targets = args
        .tasks
        .iter()
        .map(|name| resolve(&registry, &modules, name).map(|task| task.name().to_string()))
        .collect::<Result<Vec<_>>>()?;

    let runner: Box<dyn CommandRunner> = if args.dry_run {
        Box::new(DryRunner)
    } else {
        Box::new(ShellRunner::new(&root))
    };
    let prompt = DialoguerPrompter::new();
    let renderer = MiniJinjaRenderer::new();
    let ctx = Context::new(&root, &*runner, &prompt, &renderer).skip_confirm(args.yes);

    registry.run(&targets, &ctx)?;
    Ok(ctx.exit_code())
}
