//! Detection of installed languages, package managers and development tools.

use crate::config::Config;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// (display name, executable) pairs probed on `PATH`.
const LANGUAGES: &[(&str, &str)] = &[
    ("Go", "go"),
    ("Python", "python3"),
    ("Node.js", "node"),
    ("Rust", "rustc"),
    ("Java", "javac"),
    ("C++", "g++"),
    ("PHP", "php"),
    ("Ruby", "ruby"),
    ("Swift", "swift"),
    ("Kotlin", "kotlinc"),
    ("C#", "csc"),
    ("C", "gcc"),
    ("TypeScript", "tsc"),
];

const PACKAGE_MANAGERS: &[(&str, &str)] = &[
    ("pip", "pip3"),
    ("npm", "npm"),
    ("yarn", "yarn"),
    ("pnpm", "pnpm"),
    ("cargo", "cargo"),
    ("maven", "mvn"),
    ("gradle", "gradle"),
    ("composer", "composer"),
    ("make", "make"),
    ("cmake", "cmake"),
    ("bundler", "bundle"),
    ("brew", "brew"),
    ("apt", "apt"),
];

const DEV_TOOLS: &[(&str, &str)] = &[
    ("git", "git"),
    ("docker", "docker"),
    ("kubectl", "kubectl"),
    ("apache", "apache2"),
    ("nginx", "nginx"),
    ("terraform", "terraform"),
    ("ansible", "ansible"),
    ("sqlite3", "sqlite3"),
    ("mysql", "mysql"),
    ("psql", "psql"),
    ("vscode", "code"),
];

/// Well-known VS Code install locations, checked when `code` is not on `PATH`.
#[cfg(target_os = "linux")]
const VSCODE_PATHS: &[&str] =
    &["/usr/bin/code", "/usr/local/bin/code", "/snap/bin/code", "/usr/share/code/code"];
#[cfg(target_os = "macos")]
const VSCODE_PATHS: &[&str] =
    &["/Applications/Visual Studio Code.app/Contents/Resources/app/bin/code"];
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
const VSCODE_PATHS: &[&str] = &[];

#[derive(Debug, Default, Clone, Serialize)]
pub struct ScanResult {
    pub languages: BTreeMap<String, bool>,
    pub package_managers: BTreeMap<String, bool>,
    pub dev_tools: BTreeMap<String, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vscode_path: Option<String>,
}

impl ScanResult {
    /// Categories in presentation order.
    pub fn categories(&self) -> [(&'static str, &BTreeMap<String, bool>); 3] {
        [
            ("Languages", &self.languages),
            ("Package Managers", &self.package_managers),
            ("Development Tools", &self.dev_tools),
        ]
    }

    /// Copies the detected tools into the configuration.
    pub fn apply_to(&self, config: &mut Config) {
        config.installed_languages = found(&self.languages);
        config.installed_package_managers = found(&self.package_managers);
        config.installed_dev_tools = found(&self.dev_tools);
        if let Some(path) = &self.vscode_path {
            config.vscode_path = path.clone();
        }
    }
}

fn found(tools: &BTreeMap<String, bool>) -> Vec<String> {
    tools.iter().filter(|(_, found)| **found).map(|(name, _)| name.clone()).collect()
}

fn probe(checks: &[(&str, &str)]) -> BTreeMap<String, bool> {
    checks
        .iter()
        .filter(|(name, _)| *name != "vscode")
        .map(|(name, bin)| (name.to_string(), which::which(bin).is_ok()))
        .collect()
}

/// Returns the VS Code executable if one can be found.
pub fn find_vscode() -> Option<String> {
    let candidates = ["code", "code.cmd"];
    if let Some(path) = candidates.iter().find_map(|bin| which::which(bin).ok()) {
        return Some(path.display().to_string());
    }
    VSCODE_PATHS.iter().find(|path| Path::new(path).exists()).map(|path| path.to_string())
}

/// Probes the `PATH` for every known tool.
pub fn scan_system() -> ScanResult {
    let vscode_path = find_vscode();
    let mut dev_tools = probe(DEV_TOOLS);
    dev_tools.insert("vscode".to_string(), vscode_path.is_some());

    ScanResult {
        languages: probe(LANGUAGES),
        package_managers: probe(PACKAGE_MANAGERS),
        dev_tools,
        vscode_path,
    }
}

/// Renders a scan for the terminal, one block per category.
pub fn format_result(result: &ScanResult) -> String {
    let mut out = String::new();
    for (category, tools) in result.categories() {
        out.push_str(&format!("=== {} ===\n", category));
        for (name, found) in tools {
            let mark = if *found { "✅" } else { "❌" };
            out.push_str(&format!("{} {:<10}\n", mark, name));
        }
        out.push('\n');
    }
    out
}
