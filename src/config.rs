//! Validated runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::catalog::AgeGroup;
use crate::cli::Cli;
use crate::error::ConfigError;
use crate::llm::{LlmBackend, LlmConfig};

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    /// Wait ceiling for one report request.
    pub timeout: Duration,
    pub export_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub name: Option<String>,
    pub age_group: Option<AgeGroup>,
}

impl Config {
    pub fn from_args(args: &Cli) -> Result<Self, ConfigError> {
        Self::from_args_with(args, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_args`] with an injected environment lookup,
    /// used for the `API_KEY` fallback.
    pub fn from_args_with<F>(args: &Cli, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |k: &String| !k.trim().is_empty();
        let api_key = args
            .api_key
            .clone()
            .filter(present)
            .or_else(|| lookup("API_KEY").filter(present))
            .ok_or_else(|| ConfigError::MissingRequired {
                key: "GEMINI_API_KEY".to_string(),
                hint: "Pass --api-key or export GEMINI_API_KEY=...".to_string(),
            })?;

        if args.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout-secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        let base_url = args.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "base-url".to_string(),
                message: format!("'{}' is not an http(s) URL", args.base_url),
            });
        }

        if args.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "model".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let age_group = args
            .group
            .as_deref()
            .map(str::parse::<AgeGroup>)
            .transpose()
            .map_err(|e| ConfigError::InvalidValue {
                key: "group".to_string(),
                message: e.to_string(),
            })?;

        let name = args
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            llm: LlmConfig {
                backend: LlmBackend::Gemini,
                api_key: SecretString::from(api_key),
                base_url: base_url.to_string(),
                model: args.model.trim().to_string(),
            },
            timeout: Duration::from_secs(args.timeout_secs),
            export_dir: args.export_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
            log_file: args.log_file.clone(),
            name,
            age_group,
        })
    }
}
