//! Configuration module for vizexec.
//!
//! Handles the settings file, environment variables, and conversion into the
//! option types of the individual components.

mod settings;

pub use settings::{
    expand_env_vars, BackendSettings, ChartSettings, ExecutionSettings, Settings, SettingsError,
    TitleSettings, CONFIG_ENV_VAR,
};
