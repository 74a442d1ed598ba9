//! Configuration handling for Foundry.
//! User preferences and the template registry live in a single YAML file,
//! `~/.foundry/config.yaml` unless overridden with `--config`.

use crate::constants::{CONFIG_DIR, CONFIG_FILE, TEMPLATES_DIR};
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A saved project template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub description: String,
    /// Relative file paths captured when the template was registered. May
    /// go stale if the directory changes afterwards.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub author: String,
    pub license: String,
    pub default_language: String,
    pub docker: bool,
    pub interactive: bool,

    pub installed_languages: Vec<String>,
    pub installed_package_managers: Vec<String>,
    pub installed_dev_tools: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vscode_path: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<Template>,

    /// Default template per language, e.g. `Go: my-go-template`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub language_defaults: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author: String::new(),
            license: "MIT".to_string(),
            default_language: String::new(),
            docker: false,
            interactive: true,
            installed_languages: Vec::new(),
            installed_package_managers: Vec::new(),
            installed_dev_tools: Vec::new(),
            vscode_path: String::new(),
            templates: Vec::new(),
            language_defaults: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Adds a template, replacing any existing template with the same name.
    pub fn add_template(&mut self, template: Template) {
        match self.templates.iter_mut().find(|t| t.name == template.name) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    /// Removes a template by name. Language defaults pointing at it are left alone.
    pub fn remove_template(&mut self, name: &str) -> Result<Template> {
        let index = self
            .templates
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| Error::TemplateNotFound { name: name.to_string() })?;
        Ok(self.templates.remove(index))
    }

    pub fn get_template(&self, name: &str) -> Result<&Template> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::TemplateNotFound { name: name.to_string() })
    }

    /// Sets the default template for a language. The template must exist.
    pub fn set_language_default(&mut self, language: &str, template_name: &str) -> Result<()> {
        self.get_template(template_name)?;
        self.language_defaults.insert(language.to_string(), template_name.to_string());
        Ok(())
    }

    pub fn language_default(&self, language: &str) -> Option<&str> {
        self.language_defaults.get(language).map(String::as_str)
    }

    pub fn clear_language_default(&mut self, language: &str) -> Option<String> {
        self.language_defaults.remove(language)
    }

    /// Languages, sorted, for which the template is the default.
    pub fn default_languages_for(&self, template_name: &str) -> Vec<String> {
        self.language_defaults
            .iter()
            .filter(|(_, template)| template.as_str() == template_name)
            .map(|(language, _)| language.clone())
            .collect()
    }

    /// Resolves the template for a language through its default.
    pub fn template_for_language(&self, language: &str) -> Result<&Template> {
        let name = self
            .language_default(language)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::NoDefaultTemplate { language: language.to_string() })?;
        self.get_template(name)
    }

    /// Distinct, sorted language tags of the saved templates.
    pub fn template_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self
            .templates
            .iter()
            .filter(|t| !t.language.is_empty())
            .map(|t| t.language.clone())
            .collect();
        languages.sort();
        languages.dedup();
        languages
    }

    pub fn has_git(&self) -> bool {
        self.installed_dev_tools.iter().any(|tool| tool == "git")
    }

    /// Reads a flat setting as display text.
    ///
    /// # Errors
    /// * `Error::UnknownConfigKey` if the key is not a setting
    pub fn get_value(&self, key: &str) -> Result<String> {
        let value = match key {
            "author" => self.author.clone(),
            "license" => self.license.clone(),
            "default_language" => self.default_language.clone(),
            "docker" => self.docker.to_string(),
            "interactive" => self.interactive.to_string(),
            "installed_languages" => self.installed_languages.join(", "),
            "installed_package_managers" => self.installed_package_managers.join(", "),
            "installed_dev_tools" => self.installed_dev_tools.join(", "),
            "git" => self.has_git().to_string(),
            "vscode_path" => self.vscode_path.clone(),
            _ => return Err(Error::UnknownConfigKey(key.to_string())),
        };
        Ok(value)
    }

    /// Updates a flat setting from text. Lists are comma separated.
    ///
    /// # Errors
    /// * `Error::UnknownConfigKey` for unknown or read-only keys
    /// * `Error::ConfigError` if a boolean cannot be parsed
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "author" => self.author = value.to_string(),
            "license" => self.license = value.to_string(),
            "default_language" => self.default_language = value.to_string(),
            "docker" => self.docker = parse_bool(value)?,
            "interactive" => self.interactive = parse_bool(value)?,
            "installed_languages" => self.installed_languages = parse_list(value),
            "installed_package_managers" => self.installed_package_managers = parse_list(value),
            "installed_dev_tools" => self.installed_dev_tools = parse_list(value),
            "vscode_path" => self.vscode_path = value.to_string(),
            _ => return Err(Error::UnknownConfigKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        other => Err(Error::ConfigError(format!("'{}' is not a boolean", other))),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Location of the configuration file. Built once at start-up and passed to
/// whatever needs to read or write settings.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Uses `override_path` when given (relative paths resolve against the
    /// current directory), otherwise `~/.foundry/config.yaml`.
    pub fn new(override_path: Option<PathBuf>) -> Result<Self> {
        let path = match override_path {
            Some(path) if path.is_absolute() => path,
            Some(path) => std::env::current_dir()?.join(path),
            None => dirs::home_dir()
                .ok_or_else(|| Error::ConfigError("cannot determine home directory".to_string()))?
                .join(CONFIG_DIR)
                .join(CONFIG_FILE),
        };
        Ok(Self { path })
    }

    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Directory where templates cloned from git are stored.
    pub fn templates_dir(&self) -> PathBuf {
        self.path.parent().unwrap_or_else(|| Path::new(".")).join(TEMPLATES_DIR)
    }

    /// Loads the configuration, falling back to defaults if the file is missing.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!("No configuration at {}, using defaults", self.path.display());
            return Ok(Config::default());
        }
        debug!("Loading configuration from {}", self.path.display());
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Writes the configuration, creating the parent directory if needed.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigError(format!("cannot create config directory: {}", e))
            })?;
        }
        let content = serde_yaml::to_string(config)?;
        fs::write(&self.path, content)
            .map_err(|e| Error::ConfigError(format!("cannot write config file: {}", e)))
    }

    /// Loads, applies `change`, saves and returns the new configuration.
    pub fn update<F>(&self, change: F) -> Result<Config>
    where
        F: FnOnce(&mut Config) -> Result<()>,
    {
        let mut config = self.load()?;
        change(&mut config)?;
        self.save(&config)?;
        Ok(config)
    }
}
