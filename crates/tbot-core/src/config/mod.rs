use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TbotError;

#[cfg(test)]
mod tests;

/// Top-level tbot configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Bot credentials and general settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: default_api_base(),
            log_level: default_log_level(),
        }
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout for ordinary requests. Long polls add their own poll timeout on top.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}

impl BotConfig {
    /// Token with everything but the bot id hidden, for display.
    pub fn token_masked(&self) -> String {
        match self.token.split_once(':') {
            Some((id, _)) => format!("{id}:***"),
            None if self.token.is_empty() => String::new(),
            None => "***".to_string(),
        }
    }

    /// Reject configs that cannot possibly authenticate.
    pub fn validate(&self) -> Result<(), TbotError> {
        if self.token.trim().is_empty() {
            return Err(TbotError::Config(
                "bot token is empty. Set [bot].token in the config or TBOT_TOKEN".into(),
            ));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(TbotError::Config(format!(
                "api_base must be an http(s) URL, got '{}'",
                self.api_base
            )));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, TbotError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| TbotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| TbotError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
