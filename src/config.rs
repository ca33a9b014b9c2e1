use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {key} has an invalid value `{value}`")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: log::LevelFilter,
    pub log_file: Option<PathBuf>,
    pub font_dir: Option<PathBuf>,
    pub load_system_fonts: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8188,
            log_level: log::LevelFilter::Info,
            log_file: None,
            font_dir: None,
            load_system_fonts: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        Ok(ServerConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            log_level: parse_or(&lookup, "LOG_LEVEL", defaults.log_level)?,
            log_file: lookup("LOG_FILE").filter(|v| !v.is_empty()).map(PathBuf::from),
            font_dir: lookup("FONT_DIR").filter(|v| !v.is_empty()).map(PathBuf::from),
            load_system_fonts: parse_or(&lookup, "LOAD_SYSTEM_FONTS", defaults.load_system_fonts)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
