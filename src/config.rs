use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::security::InputValidator;
use crate::uploader::UploadMethod;

const APP_DIR_NAME: &str = "bili-temp";

pub const ENV_METHOD: &str = "BILI_TEMP_METHOD";
pub const ENV_CSRF: &str = "BILI_JCT";
pub const ENV_SESSDATA: &str = "BILI_SESSDATA";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// `dynamic` or `article`. Unset or empty means `dynamic`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub cookie: Cookie,
}

/// Session cookie values copied from a logged-in browser.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Cookie {
    pub bili_jct: String,
    #[serde(rename = "SESSDATA")]
    pub sessdata: String,
}

impl fmt::Debug for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cookie")
            .field("bili_jct", &InputValidator::redact(&self.bili_jct))
            .field("SESSDATA", &InputValidator::redact(&self.sessdata))
            .finish()
    }
}

impl Config {
    pub fn new(method: Option<&str>, bili_jct: &str, sessdata: &str) -> Self {
        Self {
            method: method.map(str::to_string),
            cookie: Cookie {
                bili_jct: bili_jct.to_string(),
                sessdata: sessdata.to_string(),
            },
        }
    }

    /// Configured method name with the `dynamic` default applied.
    pub fn method_name(&self) -> &str {
        match self.method.as_deref() {
            Some(method) if !method.is_empty() => method,
            _ => "dynamic",
        }
    }

    /// Overlay values from `BILI_TEMP_METHOD`, `BILI_JCT` and `BILI_SESSDATA`.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(method) = lookup(ENV_METHOD).filter(|v| !v.is_empty()) {
            self.method = Some(method);
        }
        if let Some(csrf) = lookup(ENV_CSRF).filter(|v| !v.is_empty()) {
            self.cookie.bili_jct = csrf;
        }
        if let Some(sessdata) = lookup(ENV_SESSDATA).filter(|v| !v.is_empty()) {
            self.cookie.sessdata = sessdata;
        }
    }
}

pub fn get_config_path() -> AppResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| AppError::Configuration("Could not find config directory".to_string()))?
        .join(APP_DIR_NAME);

    Ok(config_dir.join("config.json"))
}

pub fn load_config() -> AppResult<Config> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> AppResult<Config> {
    let config_str = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&config_str)?;

    validate_config(&config)?;
    log::debug!("Loaded configuration from {}", path.display());

    Ok(config)
}

pub fn save_config(config: &Config) -> AppResult<()> {
    save_config_to(&get_config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &Config) -> AppResult<()> {
    validate_config(config)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Previous file survives as config.json.bak
    if path.exists() {
        let backup_path = path.with_extension("json.bak");
        if let Err(e) = fs::copy(path, &backup_path) {
            log::warn!("Failed to create config backup: {}", e);
        }
    }

    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str)?;

    log::info!("Configuration saved to {}", path.display());
    Ok(())
}

pub fn validate_config(config: &Config) -> AppResult<()> {
    InputValidator::validate_credential("cookie.bili_jct", &config.cookie.bili_jct)?;
    InputValidator::validate_credential("cookie.SESSDATA", &config.cookie.sessdata)?;

    if let Some(method) = config.method.as_deref().filter(|m| !m.is_empty()) {
        method
            .parse::<UploadMethod>()
            .map_err(|e| AppError::validation("method", &e.to_string()))?;
    }

    Ok(())
}
