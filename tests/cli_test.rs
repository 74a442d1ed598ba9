use clap::Parser;
use foundry::cli::{Args, Commands, SortBy, TemplateCommand};
use std::path::PathBuf;

#[test]
fn test_new_command_flags() {
    let args = Args::try_parse_from([
        "foundry",
        "new",
        "my-app",
        "--language",
        "Go",
        "-p",
        "/tmp/work",
        "--var",
        "PORT=8080",
        "--var",
        "DB=app",
        "--dry-run",
        "--no-git",
    ])
    .unwrap();

    match args.command {
        Commands::New(new) => {
            assert_eq!(new.project_name, "my-app");
            assert_eq!(new.language.as_deref(), Some("Go"));
            assert_eq!(new.template, None);
            assert_eq!(new.path, Some(PathBuf::from("/tmp/work")));
            assert_eq!(new.vars, vec!["PORT=8080", "DB=app"]);
            assert!(new.dry_run);
            assert!(new.no_git);
            assert!(!new.post);
            assert!(!new.non_interactive);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_new_requires_project_name() {
    assert!(Args::try_parse_from(["foundry", "new"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = Args::try_parse_from([
        "foundry",
        "template",
        "list",
        "--verbose",
        "--config",
        "alt.yaml",
        "--sort",
        "language",
        "-q",
    ])
    .unwrap();

    assert!(args.verbose);
    assert_eq!(args.config, Some(PathBuf::from("alt.yaml")));
    match args.command {
        Commands::Template(TemplateCommand::List { sort, quiet }) => {
            assert_eq!(sort, SortBy::Language);
            assert!(quiet);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_template_add() {
    let args = Args::try_parse_from([
        "foundry",
        "template",
        "add",
        "web",
        "https://github.com/acme/web-template.git",
        "-d",
        "Web starter",
        "-l",
        "React",
    ])
    .unwrap();

    match args.command {
        Commands::Template(TemplateCommand::Add { name, source, description, language }) => {
            assert_eq!(name, "web");
            assert_eq!(source, "https://github.com/acme/web-template.git");
            assert_eq!(description, "Web starter");
            assert_eq!(language.as_deref(), Some("React"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_template_show_conflicting_flags() {
    assert!(Args::try_parse_from(["foundry", "template", "show", "web", "--files-only", "--json"])
        .is_err());
    assert!(Args::try_parse_from(["foundry", "template", "show", "web", "--summary"]).is_ok());
}

#[test]
fn test_config_language_requires_template() {
    assert!(Args::try_parse_from(["foundry", "config", "Go"]).is_err());

    let args = Args::try_parse_from(["foundry", "config", "Go", "go-api", "--docker", "true"]).unwrap();
    match args.command {
        Commands::Config(config) => {
            assert_eq!(config.language.as_deref(), Some("Go"));
            assert_eq!(config.template.as_deref(), Some("go-api"));
            assert_eq!(config.docker, Some(true));
            assert_eq!(config.interactive, None);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_color_flags_conflict() {
    assert!(Args::try_parse_from(["foundry", "detect", "--color", "--no-color"]).is_err());

    let args = Args::try_parse_from(["foundry", "detect", "--json", "-y", "--no-color"]).unwrap();
    assert!(args.no_color);
    match args.command {
        Commands::Detect(detect) => {
            assert!(detect.json);
            assert!(detect.yes);
            assert!(!detect.non_interactive);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_missing_subcommand_is_an_error() {
    assert!(Args::try_parse_from(["foundry"]).is_err());
}
