//! Common constants used throughout the Foundry application.

/// Foundry's ignore file name, read from the template root
pub const IGNORE_FILE: &str = ".foundryignore";

/// Directory names that are never copied out of a template, regardless of
/// what the ignore file says.
pub const SKIP_DIRS: [&str; 6] = ["node_modules", "vendor", ".venv", "dist", "build", ".git"];

/// Number of leading bytes scanned for a zero byte when deciding whether a
/// file is binary.
pub const BINARY_CHECK_BYTES: usize = 8000;

/// Directory under the user's home holding foundry's state
pub const CONFIG_DIR: &str = ".foundry";

/// Configuration file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// Directory next to the configuration file where cloned templates live
pub const TEMPLATES_DIR: &str = "templates";
