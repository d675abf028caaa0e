mod loader;
mod types;
pub mod validation;

pub use loader::{load_config_file_only, load_config_from_file, ENV_PREFIX};
pub use types::*;

use crate::foundation::ClaimError;
use std::path::{Path, PathBuf};

/// Explicit config file path; overrides `<data_dir>/claimdrop.toml`.
pub const CONFIG_PATH_ENV: &str = "CLAIMDROP_CONFIG_PATH";
/// Data directory; defaults to `./.claimdrop`.
pub const DATA_DIR_ENV: &str = "CLAIMDROP_DATA_DIR";
/// ed25519 seed of the local signer (`hex:`, `b64:` or bare hex).
pub const SIGNER_SEED_ENV: &str = "CLAIMDROP_SIGNER_SEED";
/// Raw `Cookie` header carrying the backend CSRF cookie.
pub const CSRF_COOKIE_ENV: &str = "CLAIMDROP_CSRF_COOKIE";
/// Fallback CSRF form token.
pub const CSRF_TOKEN_ENV: &str = "CLAIMDROP_CSRF_TOKEN";

pub const CONFIG_FILE_NAME: &str = "claimdrop.toml";
pub const DEFAULT_DATA_DIR_NAME: &str = ".claimdrop";

pub fn load_app_config() -> Result<AppConfig, ClaimError> {
    let data_dir = resolve_data_dir()?;
    let config_path = resolve_config_path(&data_dir);
    let config = load_config_from_file(&config_path)?;
    config.validate().map_err(|errors| ClaimError::ConfigError(format!("validation failed: {:?}", errors)))?;
    Ok(config)
}

pub fn resolve_config_path(data_dir: &Path) -> PathBuf {
    env_value(CONFIG_PATH_ENV).map(PathBuf::from).unwrap_or_else(|| data_dir.join(CONFIG_FILE_NAME))
}

pub fn resolve_data_dir() -> Result<PathBuf, ClaimError> {
    if let Some(data_dir) = env_value(DATA_DIR_ENV) {
        return Ok(PathBuf::from(data_dir));
    }
    let cwd = std::env::current_dir().map_err(|err| ClaimError::ConfigError(format!("cannot resolve current directory: {err}")))?;
    Ok(cwd.join(DEFAULT_DATA_DIR_NAME))
}

/// Trimmed, non-empty value of an environment variable.
pub fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
