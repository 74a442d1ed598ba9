//! Subcommand implementations.
//! Each `run_*` function loads what it needs from the [`ConfigStore`],
//! performs its work and prints the result.

use crate::cli::{Commands, ConfigArgs, DetectArgs, NewArgs, SortBy, TemplateCommand};
use crate::config::{Config, ConfigStore, Template};
use crate::detect::{format_result, scan_system};
use crate::error::{Error, Result};
use crate::git;
use crate::hooks;
use crate::project::{create_from_template, preview_from_template, resolve_path};
use crate::prompt::Prompter;
use crate::renderer::{parse_vars, PlaceholderRenderer};
use crate::template::{scan_template, validate_name};
use console::style;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Dispatches a parsed command.
pub fn run(command: Commands, store: &ConfigStore, prompt: &dyn Prompter) -> Result<()> {
    if !matches!(command, Commands::Detect(_)) {
        ensure_config(store)?;
    }
    match command {
        Commands::New(args) => run_new(store, prompt, args),
        Commands::Template(command) => run_template(store, prompt, command),
        Commands::Config(args) => run_config(store, args),
        Commands::Detect(args) => run_detect(store, prompt, args),
    }
}

/// Writes a default configuration, seeded with a tool scan, on first run.
pub fn ensure_config(store: &ConfigStore) -> Result<()> {
    if store.exists() {
        return Ok(());
    }
    debug!("Creating configuration at {}", store.path().display());
    let mut config = Config::default();
    scan_system().apply_to(&mut config);
    store.save(&config)?;
    println!("Created configuration at {}.", store.path().display());
    println!("You can now run 'foundry config' to view or update your configuration.");
    Ok(())
}

/// Picks the template for `foundry new`: explicit name, then language
/// default, then an interactive language and template menu.
pub fn select_template<'c>(
    config: &'c Config,
    prompt: &dyn Prompter,
    args: &NewArgs,
) -> Result<&'c Template> {
    if let Some(name) = &args.template {
        return config.get_template(name);
    }
    if let Some(language) = &args.language {
        return config.template_for_language(language);
    }
    if config.templates.is_empty() {
        return Err(Error::TemplateError(
            "no templates available, add one with: foundry template add <name> <path>".to_string(),
        ));
    }
    if args.non_interactive || !config.interactive {
        println!("Available templates:");
        for (i, template) in config.templates.iter().enumerate() {
            let defaults = config.default_languages_for(&template.name);
            let default_info = if defaults.is_empty() {
                String::new()
            } else {
                format!(" (default for: {})", defaults.join(", "))
            };
            println!("  {}. {} - {}{}", i + 1, template.name, template.language, default_info);
        }
        return Err(Error::TemplateError(
            "please specify --language or --template (or enable interactive mode)".to_string(),
        ));
    }

    let languages = config.template_languages();
    if languages.is_empty() {
        return Err(Error::TemplateError("no languages detected from templates".to_string()));
    }
    let language = languages
        .get(prompt.select("Select a language:".to_string(), &languages)?)
        .ok_or_else(|| Error::PromptError("selection out of range".to_string()))?;

    let candidates: Vec<&Template> =
        config.templates.iter().filter(|t| &t.language == language).collect();
    let labels: Vec<String> = candidates
        .iter()
        .map(|t| {
            if config.default_languages_for(&t.name).is_empty() {
                t.name.clone()
            } else {
                format!("{} (default)", t.name)
            }
        })
        .collect();
    let index = prompt.select(format!("Select a {} template:", language), &labels)?;
    candidates
        .get(index)
        .copied()
        .ok_or_else(|| Error::PromptError("selection out of range".to_string()))
}

/// Directory the project is created in: `<path>/<name>` or `<name>`.
pub fn project_dir(args: &NewArgs) -> PathBuf {
    match &args.path {
        Some(path) => path.join(&args.project_name),
        None => PathBuf::from(&args.project_name),
    }
}

fn run_new(store: &ConfigStore, prompt: &dyn Prompter, args: NewArgs) -> Result<()> {
    let config = store.load()?;
    let template = select_template(&config, prompt, &args)?;
    let project_dir = resolve_path(project_dir(&args))?;

    let vars = parse_vars(&args.vars)?;
    let author = args.author.clone().unwrap_or_else(|| config.author.clone());
    let renderer = PlaceholderRenderer::new(&args.project_name, &author, &vars)?;

    if args.dry_run {
        let summary = preview_from_template(template, &args.project_name, &project_dir, &renderer)?;
        println!(
            "{}",
            style(format!(
                "Dry run: project '{}' from template '{}' ({})",
                summary.project_name, summary.template, summary.language
            ))
            .cyan()
        );
        println!("  Target: {}", summary.target_dir.display());
        println!("  Would create {} entries:", summary.files.len());
        for file in &summary.files {
            println!("    {}", summary.target_dir.join(file).display());
        }
        return Ok(());
    }

    println!(
        "{}",
        style(format!(
            "Creating project '{}' from template '{}'...",
            args.project_name, template.name
        ))
        .cyan()
    );
    println!("  Language: {}", template.language);
    println!("  Target: {}", project_dir.display());

    let created = create_from_template(template, &project_dir, &renderer)?;
    println!(
        "\n{}",
        style(format!("✓ Project '{}' created successfully!", args.project_name)).green()
    );
    println!("  Location: {} ({} entries)", project_dir.display(), created.len());

    // The copy is complete; nothing below unwinds it.
    if args.gitignore {
        if let Err(e) = add_gitignore(&template.language, &project_dir) {
            warn!("Could not fetch .gitignore: {}", e);
        }
    }
    if !args.no_git && !config.has_git() {
        warn!("git was not detected, skipping repository initialization");
    } else if !args.no_git {
        println!("\n{}", style("Initializing git repository...").magenta());
        if let Err(e) = git::init_repository(&project_dir, &author) {
            warn!("Git initialization failed: {}", e);
        }
    }
    if args.post {
        println!("\n{}", style("Running setup commands...").magenta());
        if let Err(e) = hooks::run_post_create(&template.language, &project_dir) {
            warn!("Post-create setup failed: {}", e);
        }
    }
    if args.open {
        let editor = if config.vscode_path.is_empty() { "code" } else { config.vscode_path.as_str() };
        if let Err(e) = hooks::open_in_editor(editor, &project_dir) {
            warn!("Could not open editor: {}", e);
        }
    }

    let steps = hooks::next_steps(&template.language);
    println!("\n{}", style("Next steps:").bold());
    println!("  cd {}", project_dir.display());
    for step in steps {
        println!("  {}", step);
    }
    Ok(())
}

/// Writes a `.gitignore` for the language unless the project already has one.
fn add_gitignore(language: &str, project_dir: &Path) -> Result<()> {
    let target = project_dir.join(".gitignore");
    if target.exists() {
        debug!("Template already ships a .gitignore");
        return Ok(());
    }
    let Some(name) = git::gitignore_template_for(language) else {
        debug!("No .gitignore template for language '{}'", language);
        return Ok(());
    };
    let content = git::fetch_gitignore(name)?;
    fs::write(&target, content)?;
    Ok(())
}

fn run_template(store: &ConfigStore, prompt: &dyn Prompter, command: TemplateCommand) -> Result<()> {
    match command {
        TemplateCommand::Add { name, source, description, language } => {
            validate_name(&name)?;
            let path = if git::is_git_url(&source) {
                clone_template(store, prompt, &name, &source)?
            } else {
                PathBuf::from(&source)
            };

            println!("{}", style(format!("Scanning template directory: {}", path.display())).cyan());
            let mut template = scan_template(&name, &path, &description)?;
            if let Some(language) = language.map(|l| l.trim().to_string()).filter(|l| !l.is_empty()) {
                template.language = language;
            }
            println!("{}", style(format!("✓ Detected language: {}", template.language)).green());
            println!("{}", style(format!("✓ Found {} files", template.files.len())).green());

            store.update(|config| {
                config.add_template(template.clone());
                Ok(())
            })?;

            println!("\n{}", style(format!("✓ Template '{}' saved successfully!", name)).green());
            println!("  Path: {}", template.path.display());
            println!("  Language: {}", template.language);
            if !template.description.is_empty() {
                println!("  Description: {}", template.description);
            }
            Ok(())
        }
        TemplateCommand::List { sort, quiet } => {
            let config = store.load()?;
            print!("{}", format_template_list(&config, sort, quiet));
            Ok(())
        }
        TemplateCommand::Remove { name, force } => {
            store.update(|config| {
                let defaults = config.default_languages_for(&name);
                if !defaults.is_empty() {
                    if !force {
                        return Err(Error::ConfigError(format!(
                            "template '{}' is the default for: {}; use --force to remove it anyway",
                            name,
                            defaults.join(", ")
                        )));
                    }
                    for language in &defaults {
                        config.clear_language_default(language);
                    }
                }
                config.remove_template(&name).map(|_| ())
            })?;
            println!("{}", style(format!("✓ Template '{}' removed successfully", name)).green());
            Ok(())
        }
        TemplateCommand::Show { name, files_only, summary, json } => {
            let config = store.load()?;
            let template = config.get_template(&name)?;
            if json {
                println!("{}", serde_json::to_string_pretty(template)?);
                return Ok(());
            }
            print!("{}", format_template_details(&config, template, files_only, summary));
            Ok(())
        }
    }
}

fn clone_template(
    store: &ConfigStore,
    prompt: &dyn Prompter,
    name: &str,
    repo_url: &str,
) -> Result<PathBuf> {
    let dest = store.templates_dir().join(name);
    if dest.exists() {
        let replace = prompt.confirm(
            false,
            format!("Directory '{}' already exists. Replace it?", dest.display()),
        )?;
        if !replace {
            debug!("Using existing directory '{}'.", dest.display());
            return Ok(dest);
        }
        fs::remove_dir_all(&dest)?;
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    println!("{}", style(format!("Cloning {}...", git::repo_name(repo_url))).cyan());
    git::clone_repository(repo_url, &dest)
}

/// Text for `foundry template list`.
pub fn format_template_list(config: &Config, sort: SortBy, quiet: bool) -> String {
    if config.templates.is_empty() {
        return "No templates saved yet.\n\nAdd a template with: foundry template add <name> <path>\n"
            .to_string();
    }

    let mut templates: Vec<&Template> = config.templates.iter().collect();
    match sort {
        SortBy::Name => templates.sort_by(|a, b| a.name.cmp(&b.name)),
        SortBy::Language => templates
            .sort_by(|a, b| a.language.cmp(&b.language).then_with(|| a.name.cmp(&b.name))),
    }

    let mut out = String::new();
    if quiet {
        for template in templates {
            out.push_str(&format!("{}\n", template.name));
        }
        return out;
    }

    out.push_str(&format!("{}\n\n", style(format!("Saved Templates ({}):", templates.len())).bold()));
    for (i, template) in templates.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, template.name));
        out.push_str(&format!("   Language: {}\n", template.language));
        out.push_str(&format!("   Path: {}\n", template.path.display()));
        if !template.description.is_empty() {
            out.push_str(&format!("   Description: {}\n", template.description));
        }
        out.push_str(&format!("   Files: {}\n", template.files.len()));
        let defaults = config.default_languages_for(&template.name);
        if !defaults.is_empty() {
            out.push_str(&format!("{}\n", style(format!("   ⭐ Default for: {}", defaults.join(", "))).cyan()));
        }
        if !template.path.exists() {
            out.push_str(&format!("{}\n", style("   ⚠  Warning: Path no longer exists").yellow()));
        }
        out.push('\n');
    }
    out
}

/// Text for `foundry template show`.
pub fn format_template_details(
    config: &Config,
    template: &Template,
    files_only: bool,
    summary: bool,
) -> String {
    let mut out = String::new();
    if !files_only {
        out.push_str(&format!("Template: {}\n", template.name));
        out.push_str(&format!("Language: {}\n", template.language));
        out.push_str(&format!("Path: {}\n", template.path.display()));
        if !template.description.is_empty() {
            out.push_str(&format!("Description: {}\n", template.description));
        }
        let defaults = config.default_languages_for(&template.name);
        if !defaults.is_empty() {
            out.push_str(&format!("{}\n", style(format!("Default for: {}", defaults.join(", "))).cyan()));
        }
        if !template.path.exists() {
            out.push_str(&format!("{}\n", style("\n⚠  Warning: Template path no longer exists").yellow()));
        }
    }
    if summary {
        return out;
    }

    out.push_str(&format!("\nFiles ({}):\n", template.files.len()));
    let mut by_dir: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for file in &template.files {
        let (dir, name) = file.rsplit_once('/').unwrap_or(("(root)", file.as_str()));
        by_dir.entry(dir).or_default().push(name);
    }
    for (dir, names) in by_dir {
        out.push_str(&format!("\n  {}/\n", dir));
        for name in names {
            out.push_str(&format!("    - {}\n", name));
        }
    }
    out
}

/// Text for `foundry config --view`.
pub fn format_config(config: &Config) -> String {
    let mut out = String::new();
    out.push_str(&format!("Author: {}\n", config.author));
    out.push_str(&format!("License: {}\n", config.license));
    out.push_str(&format!("Default Language: {}\n", config.default_language));
    out.push_str(&format!("Docker: {}\n", config.docker));
    out.push_str(&format!("Interactive: {}\n", config.interactive));
    out.push_str(&format!("Installed Languages: {}\n", config.installed_languages.join(", ")));
    out.push_str(&format!(
        "Installed Package Managers: {}\n",
        config.installed_package_managers.join(", ")
    ));
    out.push_str(&format!("Installed Dev Tools: {}\n", config.installed_dev_tools.join(", ")));
    out.push_str(&format!("Templates: {} saved\n", config.templates.len()));
    if !config.language_defaults.is_empty() {
        out.push_str("\nLanguage Defaults:\n");
        for (language, template) in &config.language_defaults {
            out.push_str(&format!("  {}: {}\n", language, template));
        }
    }
    out
}

fn run_config(store: &ConfigStore, args: ConfigArgs) -> Result<()> {
    if let Some(key) = &args.get {
        println!("{}", store.load()?.get_value(key)?);
        return Ok(());
    }
    if args.view {
        print!("{}", format_config(&store.load()?));
        return Ok(());
    }

    let mut messages = Vec::new();
    let config = store.update(|config| {
        if let (Some(language), Some(template)) = (&args.language, &args.template) {
            config.set_language_default(language, template)?;
            messages.push(format!("✓ Set default template for {}: {}", language, template));
        }
        if let Some(language) = &args.clear_default {
            config.clear_language_default(language);
            messages.push(format!("✓ Cleared default template for {}", language));
        }
        if let Some(user) = args.user.as_deref().filter(|u| !u.is_empty()) {
            config.set_value("author", user)?;
            messages.push("✓ Updated author".to_string());
        }
        if let Some(license) = args.license.as_deref().filter(|l| !l.is_empty()) {
            config.set_value("license", license)?;
            messages.push("✓ Updated license".to_string());
        }
        if let Some(language) = args.default_language.as_deref().filter(|l| !l.is_empty()) {
            config.set_value("default_language", language)?;
            messages.push("✓ Updated default language".to_string());
        }
        if let Some(docker) = args.docker {
            config.docker = docker;
            messages.push("✓ Updated docker".to_string());
        }
        if let Some(interactive) = args.interactive {
            config.interactive = interactive;
            messages.push("✓ Updated interactive".to_string());
        }
        Ok(())
    })?;

    if messages.is_empty() {
        print!("{}", format_config(&config));
        return Ok(());
    }
    for message in messages {
        println!("{}", style(message).green());
    }
    println!("\nConfiguration updated. Current values:");
    print!("{}", format_config(&config));
    Ok(())
}

fn run_detect(store: &ConfigStore, prompt: &dyn Prompter, args: DetectArgs) -> Result<()> {
    println!("{}", style("Scanning your system...").cyan());
    let result = scan_system();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", format_result(&result));
    }

    println!("{}", style("Detection complete. Please review the detected tools above.").green());
    let save = if args.non_interactive {
        args.yes
    } else {
        prompt.confirm(args.yes, "Does this look correct?".to_string())?
    };
    if save {
        store.update(|config| {
            result.apply_to(config);
            Ok(())
        })?;
        println!("{}", style("Configuration saved.").green());
    } else {
        println!("{}", style("Please adjust configuration manually or re-run detection.").yellow());
    }
    Ok(())
}
