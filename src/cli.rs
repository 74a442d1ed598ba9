//! Command-line interface implementation for Foundry.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments structure for Foundry.
#[derive(Parser, Debug)]
#[command(
    name = "foundry",
    author,
    version,
    about = "Create new projects from templates and manage Foundry settings",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file (overrides ~/.foundry/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    pub no_color: bool,

    /// Force colored output (overrides NO_COLOR)
    #[arg(long, global = true)]
    pub color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project from a template
    New(NewArgs),

    /// Manage project templates
    #[command(subcommand)]
    Template(TemplateCommand),

    /// View or update configuration settings
    Config(ConfigArgs),

    /// Detect installed languages, package managers, and tools
    Detect(DetectArgs),
}

#[derive(ClapArgs, Debug)]
pub struct NewArgs {
    /// Name of the project, also the directory name
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: String,

    /// Language/framework to use (uses default template for that language)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Specific template to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Target path for the new project (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Skip git initialization
    #[arg(long)]
    pub no_git: bool,

    /// Do not prompt; require --language or --template
    #[arg(long)]
    pub non_interactive: bool,

    /// Template variable in KEY=VALUE form (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Author used for {{AUTHOR}} (default: configured author)
    #[arg(long)]
    pub author: Option<String>,

    /// Print the files that would be created without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Fetch a .gitignore for the template language if the template has none
    #[arg(long)]
    pub gitignore: bool,

    /// Run language specific setup commands (dependency install, build) afterwards
    #[arg(long)]
    pub post: bool,

    /// Open the new project in VS Code
    #[arg(long)]
    pub open: bool,
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Add a new template from a directory or git repository
    Add {
        /// Template name
        name: String,

        /// Template directory or git repository URL
        #[arg(value_name = "PATH_OR_URL")]
        source: String,

        /// Description of the template
        #[arg(short, long, default_value = "")]
        description: String,

        /// Override detected language/framework tag (e.g. React, Vue)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List all saved templates
    List {
        /// Sort templates by name or language
        #[arg(long, value_enum, default_value_t = SortBy::Name)]
        sort: SortBy,

        /// Only print template names
        #[arg(short, long)]
        quiet: bool,
    },

    /// Remove a saved template (the files are not deleted)
    Remove {
        name: String,

        /// Remove even if the template is a language default
        #[arg(short, long)]
        force: bool,
    },

    /// Show details of a specific template
    Show {
        name: String,

        /// Only print the file list
        #[arg(long, conflicts_with_all = ["summary", "json"])]
        files_only: bool,

        /// Only print template metadata
        #[arg(long)]
        summary: bool,

        /// Output template details as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortBy {
    Name,
    Language,
}

#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Language to set a default template for
    #[arg(requires = "template")]
    pub language: Option<String>,

    /// Template to use as the language default
    pub template: Option<String>,

    /// Set the author name
    #[arg(long)]
    pub user: Option<String>,

    /// Set the license type
    #[arg(long)]
    pub license: Option<String>,

    /// Set the default language
    #[arg(long)]
    pub default_language: Option<String>,

    /// Enable or disable Dockerfile generation
    #[arg(long, value_name = "BOOL")]
    pub docker: Option<bool>,

    /// Enable or disable interactive mode
    #[arg(long, value_name = "BOOL")]
    pub interactive: Option<bool>,

    /// Clear the default template for a language
    #[arg(long, value_name = "LANGUAGE")]
    pub clear_default: Option<String>,

    /// Print a single setting
    #[arg(long, value_name = "KEY")]
    pub get: Option<String>,

    /// Show current configuration settings
    #[arg(long)]
    pub view: bool,
}

#[derive(ClapArgs, Debug)]
pub struct DetectArgs {
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Save results without asking (use with --non-interactive)
    #[arg(short, long)]
    pub yes: bool,

    /// Do not prompt; just print, or save if --yes is given
    #[arg(long)]
    pub non_interactive: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if no subcommand is given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingSubcommand {
                let _ = Args::command().print_help();
                std::process::exit(1);
            }
            e.exit()
        }
    }
}
