//! Post-create hooks: language specific setup commands and the editor launch
//! that run after a project has been generated.
use crate::error::{Error, Result};
use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};

/// A single command run inside the new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub program: String,
    pub args: Vec<String>,
}

impl Step {
    fn new(program: &str, args: &[&str]) -> Self {
        Self { program: program.to_string(), args: args.iter().map(|a| a.to_string()).collect() }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Setup commands for a language tag, in the order they run.
pub fn post_create_steps<P: AsRef<Path>>(language: &str, project_dir: P) -> Vec<Step> {
    match language {
        "Go" => vec![Step::new("go", &["mod", "tidy"]), Step::new("go", &["build"])],
        "JavaScript" | "TypeScript" | "React" | "Vue" => vec![Step::new("npm", &["install"])],
        "Python" if project_dir.as_ref().join("requirements.txt").exists() => {
            vec![Step::new("pip", &["install", "-r", "requirements.txt"])]
        }
        "Rust" => vec![Step::new("cargo", &["build"])],
        _ => Vec::new(),
    }
}

/// Commands suggested to the user after creation.
pub fn next_steps(language: &str) -> Vec<&'static str> {
    match language {
        "Go" => vec!["go mod tidy", "go build"],
        "JavaScript" | "TypeScript" | "React" => vec!["npm install", "npm run dev"],
        "Python" => vec!["pip install -r requirements.txt", "python main.py"],
        "Rust" => vec!["cargo build", "cargo run"],
        _ => Vec::new(),
    }
}

/// Runs one step with inherited stdio, blocking until it exits.
///
/// # Errors
/// * `Error::HookError` if the command cannot start or exits unsuccessfully
pub fn run_step<P: AsRef<Path>>(step: &Step, project_dir: P) -> Result<()> {
    debug!("Running '{}'", step);
    let status = Command::new(&step.program)
        .args(&step.args)
        .current_dir(project_dir.as_ref())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::HookError(format!("'{}' could not start: {}", step, e)))?;

    if !status.success() {
        return Err(Error::HookError(format!("'{}' failed with status: {}", step, status)));
    }
    Ok(())
}

/// Runs all setup steps for the language, stopping at the first failure.
pub fn run_post_create<P: AsRef<Path>>(language: &str, project_dir: P) -> Result<()> {
    let project_dir = project_dir.as_ref();
    for step in post_create_steps(language, project_dir) {
        run_step(&step, project_dir)?;
    }
    Ok(())
}

/// Opens the project in the editor at `editor`.
pub fn open_in_editor<P: AsRef<Path>>(editor: &str, project_dir: P) -> Result<()> {
    let step = Step { program: editor.to_string(), args: vec![project_dir.as_ref().display().to_string()] };
    run_step(&step, project_dir)
}
