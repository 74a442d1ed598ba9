use foundry::config::Config;
use foundry::detect::{format_result, ScanResult};
use std::collections::BTreeMap;

fn tools(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
    entries.iter().map(|(name, found)| (name.to_string(), *found)).collect()
}

fn sample() -> ScanResult {
    ScanResult {
        languages: tools(&[("Go", true), ("Rust", false)]),
        package_managers: tools(&[("npm", true)]),
        dev_tools: tools(&[("git", true), ("docker", false), ("vscode", true)]),
        vscode_path: Some("/usr/bin/code".to_string()),
    }
}

#[test]
fn test_apply_to_keeps_found_tools_only() {
    let mut config = Config::default();
    sample().apply_to(&mut config);

    assert_eq!(config.installed_languages, vec!["Go"]);
    assert_eq!(config.installed_package_managers, vec!["npm"]);
    assert_eq!(config.installed_dev_tools, vec!["git", "vscode"]);
    assert_eq!(config.vscode_path, "/usr/bin/code");
    assert!(config.has_git());
}

#[test]
fn test_format_result() {
    let output = format_result(&sample());

    let languages = output.find("=== Languages ===").unwrap();
    let managers = output.find("=== Package Managers ===").unwrap();
    let tools = output.find("=== Development Tools ===").unwrap();
    assert!(languages < managers && managers < tools);
    assert!(output.contains("✅ Go"));
    assert!(output.contains("❌ Rust"));
    assert!(output.contains("❌ docker"));
}

#[test]
fn test_scan_result_serializes_categories() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["languages"]["Go"], true);
    assert_eq!(json["dev_tools"]["docker"], false);
    assert_eq!(json["vscode_path"], "/usr/bin/code");
}
