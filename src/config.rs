use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".dlgsheetrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory searched for `.d` dialogue scripts.
    #[serde(default = "default_root", alias = "dRoot")]
    pub dialog_root: String,
    /// Directory searched for `.tra` string tables.
    #[serde(default = "default_root", alias = "traRoot")]
    pub strings_root: String,
    /// Optional language sub-directory of `strings_root` (e.g. `english`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Suffix of the text columns in exported sheets.
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub keep_going: bool,
}

fn default_root() -> String {
    "./".to_string()
}

fn default_output_dir() -> String {
    "./csv".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialog_root: default_root(),
            strings_root: default_root(),
            language: None,
            output_dir: default_output_dir(),
            locale: default_locale(),
            recursive: false,
            ignores: Vec::new(),
            keep_going: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores` or a locale that
    /// cannot be used as a column suffix.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.locale.is_empty()
            || !self
                .locale
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            bail!(
                "Invalid 'locale': \"{}\" (use letters, digits, '_' or '-')",
                self.locale
            );
        }

        Ok(())
    }

    /// Directory holding the string tables: `strings_root`, plus `language` when set.
    pub fn strings_dir(&self) -> PathBuf {
        let root = PathBuf::from(&self.strings_root);
        match &self.language {
            Some(language) if !language.is_empty() => root.join(language),
            _ => root,
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            log::debug!("loaded config from {}", path.display());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
