use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use backend_domain::{
    RuntimeConfig, DEFAULT_BIND_ADDR, DEFAULT_EXPORT_FILE_PREFIX, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_REQUEST_TIMEOUT_SECONDS,
};

use crate::config::validation::{validate_bind_addr, validate_log_format};

pub const CONFIG_ENV: &str = "INVENTORY_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    /// JSON store location. Empty keeps data in memory only.
    pub data_path: String,
    pub default_people: Vec<String>,
    pub export_file_prefix: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub log_dir: Option<String>,
    pub log_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_token: None,
            data_path: "./inventory.json".to_string(),
            default_people: vec![
                "Quản lý".to_string(),
                "Nhân viên 1".to_string(),
                "Nhân viên 2".to_string(),
            ],
            export_file_prefix: DEFAULT_EXPORT_FILE_PREFIX.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            log_dir: None,
            log_format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Config file location: `INVENTORY_CONFIG`, else `./config.toml`.
    pub fn config_path() -> PathBuf {
        PathBuf::from(env::var(CONFIG_ENV).unwrap_or_else(|_| "./config.toml".to_string()))
    }

    /// Loads the config file, or defaults when it is absent. Runs before the
    /// tracing subscriber exists, so callers report a missing file themselves.
    pub async fn load() -> Result<Self> {
        let path = Self::config_path();
        let file_path = path.as_path();
        let base_dir = file_path.parent();
        if !file_path.exists() {
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
        self.data_path = self.data_path.trim().to_string();
        self.export_file_prefix = self.export_file_prefix.trim().to_string();
        if self.export_file_prefix.is_empty() {
            self.export_file_prefix = DEFAULT_EXPORT_FILE_PREFIX.to_string();
        }
        self.log_format = self.log_format.trim().to_lowercase();
        self.default_people = normalize_name_list(std::mem::take(&mut self.default_people));
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_path = resolve_path(base, &self.data_path);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_bind_addr(&self.bind_addr)?;
        validate_log_format(&self.log_format)?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            data_path: Some(self.data_path.clone()).filter(|path| !path.is_empty()),
            default_people: self.default_people.clone(),
            export_file_prefix: self.export_file_prefix.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("INVENTORY_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("INVENTORY_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("INVENTORY_DATA_PATH") {
            self.data_path = value;
        }
        if let Ok(value) = env::var("INVENTORY_DEFAULT_PEOPLE") {
            self.default_people = parse_env_name_list(&value);
        }
        if let Ok(value) = env::var("INVENTORY_EXPORT_FILE_PREFIX") {
            self.export_file_prefix = value;
        }
        if let Ok(value) = env::var("INVENTORY_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("INVENTORY_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("INVENTORY_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Ok(value) = env::var("INVENTORY_LOG_FORMAT") {
            self.log_format = value;
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

fn parse_env_name_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn normalize_name_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if out
            .iter()
            .any(|existing| existing.to_lowercase() == trimmed.to_lowercase())
        {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let mut config = AppConfig::default();
        config.normalize();
        config.validate().expect("valid defaults");
        let runtime = config.to_runtime_config();
        assert_eq!(runtime.default_people.len(), 3);
        assert_eq!(runtime.data_path.as_deref(), Some("./inventory.json"));
    }

    #[test]
    fn defaults_match_runtime_defaults() {
        let runtime = AppConfig::default().to_runtime_config();
        let fallback = RuntimeConfig::default();
        assert_eq!(runtime.bind_addr, fallback.bind_addr);
        assert_eq!(runtime.max_body_bytes, fallback.max_body_bytes);
        assert_eq!(runtime.request_timeout_seconds, fallback.request_timeout_seconds);
        assert_eq!(runtime.export_file_prefix, fallback.export_file_prefix);
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let config = AppConfig {
            bind_addr: "not-an-addr".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_fields_fall_back_to_defaults() {
        let mut config: AppConfig = toml::from_str(
            r#"
            data_path = ""
            default_people = [" Lan ", "lan", "", "Minh"]
            api_token = "  "
            "#,
        )
        .expect("parse");
        config.normalize();
        assert_eq!(config.bind_addr, "127.0.0.1:3240");
        assert_eq!(config.api_token, None);
        assert_eq!(config.default_people, vec!["Lan", "Minh"]);
        assert_eq!(config.to_runtime_config().data_path, None);
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let mut config = AppConfig {
            log_dir: Some("logs".to_string()),
            ..AppConfig::default()
        };
        config.resolve_paths(Some(Path::new("/etc/inventory")));
        assert_eq!(config.data_path, "/etc/inventory/./inventory.json");
        assert_eq!(config.log_dir.as_deref(), Some("/etc/inventory/logs"));
    }
}
