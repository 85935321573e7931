//! TOML-based configuration for vizexec.
//!
//! Supports a config file (vizexec.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [backend]
//! workspace = "${VIZEXEC_WORKSPACE}"
//!
//! [titles]
//! max_length = 50
//! locale = "en-US"
//!
//! [execution]
//! auto_load = true
//! offset = [0, 0]
//! limit = [1000, 1000]
//!
//! [charts]
//! dual_axis_default = true
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::executor::{ExecutorOptions, PageRequest, DEFAULT_LIMIT, DEFAULT_OFFSET};
use crate::sanitize::SanitizeOptions;
use crate::titles::{TitleOptions, DEFAULT_MAX_TITLE_LENGTH};

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "VIZEXEC_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendSettings,
    pub titles: TitleSettings,
    pub execution: ExecutionSettings,
    pub charts: ChartSettings,
}

/// Backend target.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Workspace identifier (supports ${ENV_VAR} expansion).
    pub workspace: Option<String>,
}

/// Title generation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TitleSettings {
    /// Maximum length of generated arithmetic titles.
    pub max_length: usize,

    /// Locale passed to the translator.
    pub locale: String,
}

impl Default for TitleSettings {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_TITLE_LENGTH,
            locale: "en-US".to_string(),
        }
    }
}

/// Execution protocol settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExecutionSettings {
    /// Load as soon as inputs change.
    pub auto_load: bool,

    /// Default page offset per dimension.
    pub offset: Vec<u32>,

    /// Default page size per dimension.
    pub limit: Vec<u32>,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            auto_load: true,
            offset: DEFAULT_OFFSET.to_vec(),
            limit: DEFAULT_LIMIT.to_vec(),
        }
    }
}

/// Chart behavior settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Dual axis state when a chart config leaves it unset.
    pub dual_axis_default: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            dual_axis_default: true,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `VIZEXEC_CONFIG`
    /// 2. `./vizexec.toml`
    /// 3. `~/.config/vizexec/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("vizexec.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("vizexec").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.execution.offset.len() != self.execution.limit.len() {
            return Err(SettingsError::InvalidConfig(format!(
                "execution.offset has {} dimensions but execution.limit has {}",
                self.execution.offset.len(),
                self.execution.limit.len()
            )));
        }
        if self.execution.limit.contains(&0) {
            return Err(SettingsError::InvalidConfig(
                "execution.limit must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the workspace with environment variables expanded.
    pub fn resolved_workspace(&self) -> Result<Option<String>, SettingsError> {
        self.backend
            .workspace
            .as_deref()
            .map(expand_env_vars)
            .transpose()
    }

    pub fn title_options(&self) -> TitleOptions {
        TitleOptions {
            max_length: self.titles.max_length,
            locale: self.titles.locale.clone(),
        }
    }

    pub fn executor_options(&self) -> ExecutorOptions {
        ExecutorOptions {
            auto_load: self.execution.auto_load,
            default_page: PageRequest::new(
                self.execution.offset.clone(),
                self.execution.limit.clone(),
            ),
        }
    }

    pub fn sanitize_options(&self) -> SanitizeOptions {
        SanitizeOptions {
            dual_axis_default: self.charts.dual_axis_default,
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next();
            chars.by_ref().take_while(|&ch| ch != '}').collect()
        } else {
            let mut name = String::new();
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                name.push(ch);
            }
            if name.is_empty() {
                // Lone $, keep it
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
