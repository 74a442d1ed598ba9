use foundry::constants::IGNORE_FILE;
use foundry::error::Error;
use foundry::ignore::IgnoreRules;
use foundry::template::{detect_language, scan_template, validate_name, UNKNOWN_LANGUAGE};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

#[test]
fn test_validate_name() {
    assert!(validate_name("go-api").is_ok());
    assert!(validate_name("my template").is_ok());
    assert!(matches!(validate_name(""), Err(Error::InvalidTemplateName(_))));
    assert!(matches!(validate_name("   "), Err(Error::InvalidTemplateName(_))));
    for bad in ["a/b", "a\\b", "a:b", "a*", "a?", "\"a\"", "<a>", "a|b"] {
        assert!(validate_name(bad).is_err(), "{} should be rejected", bad);
    }
}

#[test]
fn test_detect_language_indicator_files_outweigh_extensions() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "go.mod");
    touch(temp_dir.path(), "scripts/a.py");
    touch(temp_dir.path(), "scripts/b.py");
    touch(temp_dir.path(), "scripts/c.py");

    let language = detect_language(temp_dir.path(), &IgnoreRules::default()).unwrap();
    assert_eq!(language, "Go");
}

#[test]
fn test_detect_language_by_extension_count() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "src/App.tsx");
    touch(temp_dir.path(), "src/Button.tsx");
    touch(temp_dir.path(), "src/util.ts");

    let language = detect_language(temp_dir.path(), &IgnoreRules::default()).unwrap();
    assert_eq!(language, "React");
}

#[test]
fn test_detect_language_tie_goes_to_first_alphabetically() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "main.rb");
    touch(temp_dir.path(), "main.go");

    let language = detect_language(temp_dir.path(), &IgnoreRules::default()).unwrap();
    assert_eq!(language, "Go");
}

#[test]
fn test_detect_language_skips_dependency_directories() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "main.py");
    for dir in ["node_modules", "vendor", "target", "dist"] {
        touch(temp_dir.path(), &format!("{}/a.js", dir));
        touch(temp_dir.path(), &format!("{}/b.js", dir));
    }

    let language = detect_language(temp_dir.path(), &IgnoreRules::default()).unwrap();
    assert_eq!(language, "Python");
}

#[test]
fn test_detect_language_honours_ignore_rules() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "main.py");
    touch(temp_dir.path(), "legacy/a.rb");
    touch(temp_dir.path(), "legacy/b.rb");

    let ignore = IgnoreRules::from_patterns(["legacy"]);
    assert_eq!(detect_language(temp_dir.path(), &ignore).unwrap(), "Python");
}

#[test]
fn test_detect_language_unknown() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "README.md");
    let language = detect_language(temp_dir.path(), &IgnoreRules::default()).unwrap();
    assert_eq!(language, UNKNOWN_LANGUAGE);
}

#[test]
fn test_detect_language_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let result = detect_language(temp_dir.path().join("missing"), &IgnoreRules::default());
    assert!(matches!(result, Err(Error::TemplateDoesNotExistsError { .. })));
}

#[test]
fn test_scan_template() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("go-api");
    touch(&root, "go.mod");
    touch(&root, "cmd/server/main.go");
    touch(&root, "internal/handler.go");
    touch(&root, "vendor/lib/lib.go");
    touch(&root, "notes/todo.txt");
    fs::write(root.join(IGNORE_FILE), "notes\n").unwrap();

    let template = scan_template("go-api", &root, "HTTP service").unwrap();
    assert_eq!(template.name, "go-api");
    assert_eq!(template.language, "Go");
    assert_eq!(template.description, "HTTP service");
    assert!(template.path.is_absolute());
    assert_eq!(template.path, root.canonicalize().unwrap());
    assert_eq!(
        template.files,
        vec![IGNORE_FILE, "cmd/server/main.go", "go.mod", "internal/handler.go"]
    );
}

#[test]
fn test_scan_template_rejects_missing_and_file_paths() {
    let temp_dir = TempDir::new().unwrap();
    let result = scan_template("x", temp_dir.path().join("missing"), "");
    assert!(matches!(result, Err(Error::TemplateDoesNotExistsError { .. })));

    touch(temp_dir.path(), "file.txt");
    let result = scan_template("x", temp_dir.path().join("file.txt"), "");
    assert!(matches!(result, Err(Error::TemplateDoesNotExistsError { .. })));
}
