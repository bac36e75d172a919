use crate::endpoint::resolve;
use crate::error::config::ConfigError;
use crate::{
    ACCESS_TOKEN_ENV_VAR, API_TIMEOUT_ENV_VAR, API_URL_ENV_VAR, DEFAULT_CLOUD_URL, HOME_ENV_VAR,
};

use common::{ErrorLocation, RedactedToken};

use std::env;
use std::panic::Location;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "config.toml";
const HOME_DIR_NAME: &str = ".nimbus";

/// Request timeout when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================
// CONFIG STRUCTS
// ============================================

/// Everything the client needs, assembled once at process start.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    /// Cloud URL used when the caller does not name one.
    pub api_url: String,
    /// Token from the environment; takes precedence over stored credentials.
    pub access_token: Option<RedactedToken>,
    /// Per-request timeout. `None` disables it.
    pub timeout: Option<Duration>,
    /// Holds `config.toml` and `credentials.json`.
    pub home_dir: PathBuf,
}

/// Optional `{home_dir}/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    api_url: Option<String>,
    timeout: Option<String>,
}

// ============================================
// IMPLEMENTATION
// ============================================

impl CloudConfig {
    /// Built-in defaults rooted at `home_dir`.
    pub fn with_home_dir(home_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_url: DEFAULT_CLOUD_URL.to_string(),
            access_token: None,
            timeout: Some(DEFAULT_TIMEOUT),
            home_dir: home_dir.into(),
        }
    }

    /// Assemble from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|name| env::var(name).ok())
    }

    /// Assemble from defaults, then `config.toml`, then variables from `lookup`.
    ///
    /// Empty variables count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no home directory can be determined, the
    /// config file is unreadable or malformed, or the result fails [`Self::validate`].
    pub fn load<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let home_dir = detect_home_dir(var(HOME_ENV_VAR))?;
        let mut config = Self::with_home_dir(home_dir);

        config.apply_file()?;

        if let Some(api_url) = var(API_URL_ENV_VAR) {
            debug!("Using {API_URL_ENV_VAR} override: {api_url}");
            config.api_url = api_url;
        }

        if let Some(timeout) = var(API_TIMEOUT_ENV_VAR) {
            config.timeout = parse_timeout(&timeout, API_TIMEOUT_ENV_VAR)?;
        }

        if let Some(token) = var(ACCESS_TOKEN_ENV_VAR).and_then(RedactedToken::non_empty) {
            debug!("Using access token from {ACCESS_TOKEN_ENV_VAR} ({} chars)", token.len());
            config.access_token = Some(token);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config_file_path(&self) -> PathBuf {
        self.home_dir.join(CONFIG_FILE_NAME)
    }

    fn apply_file(&mut self) -> Result<(), ConfigError> {
        let config_path = self.config_file_path();

        if !config_path.exists() {
            debug!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            reason: e.to_string(),
        })?;

        if let Some(api_url) = file.api_url {
            self.api_url = api_url;
        }

        if let Some(timeout) = file.timeout {
            self.timeout = parse_timeout(&timeout, &config_path.display().to_string())?;
        }

        info!("Config loaded from {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if `api_url` is empty or does
    /// not resolve to an API endpoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "api_url cannot be empty".to_string(),
            });
        }

        resolve(&self.api_url).map_err(|e| ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("api_url does not resolve to an endpoint: {e}"),
        })?;

        Ok(())
    }
}

/// `NIMBUS_HOME` if set, otherwise `~/.nimbus`.
fn detect_home_dir(override_dir: Option<String>) -> Result<PathBuf, ConfigError> {
    if let Some(custom_dir) = override_dir {
        debug!("Using {HOME_ENV_VAR} override: {custom_dir}");
        return Ok(PathBuf::from(custom_dir));
    }

    dirs::home_dir()
        .map(|home| home.join(HOME_DIR_NAME))
        .ok_or_else(|| ConfigError::HomeDirectory {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Cannot determine home directory. Set {HOME_ENV_VAR}."),
        })
}

/// Humantime duration (`"45s"`, `"2m"`). Zero disables the timeout.
fn parse_timeout(value: &str, source: &str) -> Result<Option<Duration>, ConfigError> {
    let timeout =
        humantime::parse_duration(value.trim()).map_err(|e| ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Invalid timeout '{value}' from {source}: {e}"),
        })?;

    if timeout.is_zero() {
        Ok(None)
    } else {
        Ok(Some(timeout))
    }
}
