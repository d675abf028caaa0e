//! Configuration loader using Figment for layered config management.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML config file
//! 3. Environment variables (CLAIMDROP_* prefix)

use crate::foundation::util::encoding::redact_url;
use crate::foundation::ClaimError;
use crate::infrastructure::config::types::*;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable prefix for config overrides.
///
/// Example: `CLAIMDROP_NODE__URL` -> `node.url`
pub const ENV_PREFIX: &str = "CLAIMDROP_";

/// Load configuration from `path`, layering `CLAIMDROP_*` environment overrides on top.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig, ClaimError> {
    info!(path = %path.display(), "loading configuration");
    let figment = figment_base(path).merge(Env::prefixed(ENV_PREFIX).split("__"));
    extract(figment)
}

/// Load configuration from `path` only, ignoring the environment.
pub fn load_config_file_only(path: &Path) -> Result<AppConfig, ClaimError> {
    if !path.exists() {
        debug!(path = %path.display(), "configuration file missing; using defaults");
        return finish(AppConfig::default());
    }
    let contents = fs::read_to_string(path)
        .map_err(|err| ClaimError::ConfigError(format!("failed to read config {}: {}", path.display(), err)))?;
    let config: AppConfig = toml::from_str(&contents)?;
    finish(config)
}

fn extract(figment: Figment) -> Result<AppConfig, ClaimError> {
    let config: AppConfig = figment.extract().map_err(|e| ClaimError::ConfigError(format!("config extraction failed: {e}")))?;
    finish(config)
}

fn finish(mut config: AppConfig) -> Result<AppConfig, ClaimError> {
    postprocess(&mut config);
    debug!(
        active_network = %config.network.active,
        networks = config.network.app_ids.len(),
        node_url = %redact_url(&config.node.url),
        backend_url = %redact_url(&config.backend.base_url),
        "configuration loaded"
    );
    Ok(config)
}

fn figment_base(path: &Path) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    } else {
        debug!(path = %path.display(), "configuration file missing; using defaults and env only");
    }
    figment
}

fn postprocess(config: &mut AppConfig) {
    let defaults = AppConfig::default();

    config.network.active = config.network.active.trim().to_string();
    if config.network.active.is_empty() {
        config.network.active = defaults.network.active;
    }
    if config.node.url.trim().is_empty() {
        config.node.url = defaults.node.url;
    }
    if config.node.wait_rounds == 0 {
        config.node.wait_rounds = defaults.node.wait_rounds;
    }
    if config.node.validity_window == 0 {
        config.node.validity_window = defaults.node.validity_window;
    }
    if config.node.timeout_secs == 0 {
        config.node.timeout_secs = defaults.node.timeout_secs;
    }
    if config.backend.base_url.trim().is_empty() {
        config.backend.base_url = defaults.backend.base_url;
    }
    if config.backend.timeout_secs == 0 {
        config.backend.timeout_secs = defaults.backend.timeout_secs;
    }
    if config.contract.token_id_key.is_empty() {
        config.contract.token_id_key = defaults.contract.token_id_key;
    }
    if config.logging.filters.trim().is_empty() {
        config.logging.filters = defaults.logging.filters;
    }
}
