//! Foundry's main application entry point.
//! Parses arguments, sets up logging and colors, and dispatches the subcommand.

use foundry::{
    cli::{get_args, Args},
    commands,
    config::ConfigStore,
    error::{default_error_handler, Result},
    logger::init_logger,
    prompt::DialoguerPrompter,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);
    configure_colors(&args);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// `--color` wins over `--no-color` and `NO_COLOR`.
fn configure_colors(args: &Args) {
    let no_color_env = std::env::var("NO_COLOR").map(|v| !v.trim().is_empty()).unwrap_or(false);
    let enabled = if args.color {
        Some(true)
    } else if args.no_color || no_color_env {
        Some(false)
    } else {
        None
    };
    if let Some(enabled) = enabled {
        console::set_colors_enabled(enabled);
        console::set_colors_enabled_stderr(enabled);
    }
}

fn run(args: Args) -> Result<()> {
    let store = ConfigStore::new(args.config)?;
    let prompt = DialoguerPrompter::new();
    commands::run(args.command, &store, &prompt)
}
