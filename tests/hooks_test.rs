use foundry::error::Error;
use foundry::hooks::{next_steps, post_create_steps, run_post_create, run_step, Step};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_post_create_steps_by_language() {
    let temp_dir = TempDir::new().unwrap();

    let steps: Vec<String> =
        post_create_steps("Go", temp_dir.path()).iter().map(Step::to_string).collect();
    assert_eq!(steps, vec!["go mod tidy", "go build"]);

    let steps = post_create_steps("React", temp_dir.path());
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].program, "npm");
    assert_eq!(steps[0].args, vec!["install"]);

    assert_eq!(post_create_steps("Rust", temp_dir.path())[0].to_string(), "cargo build");
    assert!(post_create_steps("Unknown", temp_dir.path()).is_empty());
}

#[test]
fn test_python_steps_need_requirements_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(post_create_steps("Python", temp_dir.path()).is_empty());

    fs::write(temp_dir.path().join("requirements.txt"), "requests\n").unwrap();
    let steps = post_create_steps("Python", temp_dir.path());
    assert_eq!(steps[0].to_string(), "pip install -r requirements.txt");
}

#[test]
fn test_next_steps() {
    assert_eq!(next_steps("Rust"), vec!["cargo build", "cargo run"]);
    assert_eq!(next_steps("TypeScript"), vec!["npm install", "npm run dev"]);
    assert!(next_steps("Haskell").is_empty());
}

#[test]
fn test_run_step_missing_program() {
    let temp_dir = TempDir::new().unwrap();
    let step = Step { program: "foundry-no-such-program".to_string(), args: Vec::new() };
    let result = run_step(&step, temp_dir.path());
    match result {
        Err(Error::HookError(message)) => assert!(message.contains("foundry-no-such-program")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_run_post_create_without_steps() {
    let temp_dir = TempDir::new().unwrap();
    assert!(run_post_create("Unknown", temp_dir.path()).is_ok());
}

#[cfg(unix)]
#[test]
fn test_run_step_reports_failure_status() {
    let temp_dir = TempDir::new().unwrap();
    let ok = Step { program: "sh".to_string(), args: vec!["-c".to_string(), "exit 0".to_string()] };
    assert!(run_step(&ok, temp_dir.path()).is_ok());

    let failing = Step { program: "sh".to_string(), args: vec!["-c".to_string(), "exit 3".to_string()] };
    assert!(matches!(run_step(&failing, temp_dir.path()), Err(Error::HookError(_))));
}
