use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "routine-advisor.toml";

const DEFAULT_CATALOG_SOURCE: &str = "products.json";
const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8787/";
const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_BRAND: &str = "L'Oréal";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Local path or `http(s)://` URL of the product catalog.
    pub catalog_source: String,
    /// Completion proxy that accepts `{model, messages}`.
    pub endpoint_url: String,
    pub model: String,
    pub brand: String,
    /// Replaces the generated consultant prompt when set.
    pub system_prompt: Option<String>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_source: DEFAULT_CATALOG_SOURCE.to_string(),
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            brand: DEFAULT_BRAND.to_string(),
            system_prompt: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the config file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn system_prompt(&self) -> String {
        match &self.system_prompt {
            Some(prompt) if !prompt.trim().is_empty() => prompt.clone(),
            _ => format!(
                "You are a helpful beauty consultant for {} products. Provide skincare, haircare, makeup, and beauty advice. Answer questions about routines, products, and beauty tips.",
                self.brand
            ),
        }
    }
}
