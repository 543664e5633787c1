use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::editor::profile_image::DEFAULT_MAX_BYTES;
use crate::i18n::Locale;

/// Where saved resumes live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Memory,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageKind::File),
            "memory" => Ok(StorageKind::Memory),
            other => bail!("STORAGE_BACKEND must be 'file' or 'memory', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage_backend: StorageKind,
    pub storage_dir: PathBuf,
    pub default_locale: Locale,
    pub max_profile_image_bytes: usize,
    pub surface_cache_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            storage_backend: StorageKind::File,
            storage_dir: PathBuf::from("./data"),
            default_locale: Locale::Fr,
            max_profile_image_bytes: DEFAULT_MAX_BYTES,
            surface_cache_limit: 64,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let default_locale = match get("DEFAULT_LANGUAGE") {
            Some(tag) => Locale::from_tag(&tag)
                .with_context(|| format!("DEFAULT_LANGUAGE '{tag}' is not a supported language"))?,
            None => defaults.default_locale,
        };

        Ok(Config {
            port: parse_or(&get, "PORT", defaults.port)?,
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            storage_backend: match get("STORAGE_BACKEND") {
                Some(v) => v.parse()?,
                None => defaults.storage_backend,
            },
            storage_dir: get("STORAGE_DIR").map(PathBuf::from).unwrap_or(defaults.storage_dir),
            default_locale,
            max_profile_image_bytes: parse_or(
                &get,
                "MAX_PROFILE_IMAGE_BYTES",
                defaults.max_profile_image_bytes,
            )?,
            surface_cache_limit: parse_or(&get, "SURFACE_CACHE_LIMIT", defaults.surface_cache_limit)?,
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage_backend, StorageKind::File);
        assert_eq!(config.default_locale, Locale::Fr);
        assert_eq!(config.max_profile_image_bytes, 5 * 1024 * 1024);
        assert_eq!(config.surface_cache_limit, 64);
    }

    #[test]
    fn test_overrides_are_read() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("STORAGE_BACKEND", "memory"),
            ("DEFAULT_LANGUAGE", "en-GB"),
            ("SURFACE_CACHE_LIMIT", "3"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.storage_backend, StorageKind::Memory);
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.surface_cache_limit, 3);
    }

    #[test]
    fn test_malformed_values_fail() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert!(config_from(&[("STORAGE_BACKEND", "s3")]).is_err());
        assert!(config_from(&[("DEFAULT_LANGUAGE", "de")]).is_err());
    }
}
