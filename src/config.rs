//! Configuration loaded from built-in defaults and an optional TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use dirs_next::config_dir;
use serde::{Deserialize, Serialize};

const USER_CONFIG_PATH: &str = "sprout/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub explorer: ExplorerConfig,
    /// Editor command used to open created files.
    #[serde(default)]
    pub editor: Option<String>,
}

/// Conventions applied to typed files and packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default = "Language::default_name")]
    pub name: String,
    #[serde(default = "Language::default_extension")]
    pub extension: String,
    #[serde(default = "Language::default_initializer")]
    pub initializer: String,
}

impl Language {
    fn default_name() -> String {
        "Python".into()
    }

    fn default_extension() -> String {
        ".py".into()
    }

    fn default_initializer() -> String {
        "__init__.py".into()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            extension: Self::default_extension(),
            initializer: Self::default_initializer(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub show_hidden: bool,
    /// Resolve the selection through the system clipboard instead of asking
    /// the explorer directly.
    #[serde(default)]
    pub clipboard_selection: bool,
}

impl Config {
    /// Loads `explicit` if given, otherwise the user config file when one
    /// exists, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::user_config_path().filter(|path| path.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn user_config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join(USER_CONFIG_PATH))
    }

    pub fn validate(&self) -> Result<()> {
        let extension = &self.language.extension;
        if !extension.starts_with('.') || extension.len() < 2 {
            bail!("language.extension must look like \".ext\", got {extension:?}");
        }
        if self.language.initializer.trim().is_empty() {
            bail!("language.initializer must not be empty");
        }
        Ok(())
    }

    /// Configured editor, falling back to `$VISUAL` then `$EDITOR`.
    pub fn editor_command(&self) -> Option<String> {
        self.editor
            .clone()
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .filter(|editor| !editor.trim().is_empty())
    }
}
