//! Settings for the `campus` binary.
//!
//! Precedence: CLI flags (and their env fallbacks) override the config file,
//! which overrides defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
pub struct ConfigFile {
  #[serde(default)]
  pub url:      String,
  #[serde(default)]
  pub api_key:  String,
  #[serde(default)]
  pub log_file: String,
}

/// Fully-resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub url:      String,
  pub api_key:  String,
  pub log_file: Option<PathBuf>,
}

/// Default base URL: the local Supabase development stack.
pub const DEFAULT_URL: &str = "http://localhost:54321";

pub fn resolve(
  url: Option<String>,
  api_key: Option<String>,
  log_file: Option<PathBuf>,
  file: &ConfigFile,
) -> Settings {
  Settings {
    url: url
      .or_else(|| (!file.url.is_empty()).then(|| file.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
    api_key: api_key
      .or_else(|| (!file.api_key.is_empty()).then(|| file.api_key.clone()))
      .unwrap_or_default(),
    log_file: log_file
      .or_else(|| (!file.log_file.is_empty()).then(|| file.log_file.clone().into())),
  }
}
