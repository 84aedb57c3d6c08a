// src/config/validate.rs

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, WslctlError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::WslctlError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        let exclude = build_exclude_set(&raw.catalog.exclude)?;
        Ok(ConfigFile::new_unchecked(raw, exclude))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_programs(cfg)?;
    validate_timeouts(cfg)?;
    validate_provision(cfg)?;
    Ok(())
}

fn validate_programs(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.frontend.trim().is_empty() {
        return Err(WslctlError::ConfigError(
            "[config].frontend must not be empty".to_string(),
        ));
    }
    if cfg.config.script_host.trim().is_empty() {
        return Err(WslctlError::ConfigError(
            "[config].script_host must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_timeouts(cfg: &RawConfigFile) -> Result<()> {
    let quick = cfg.config.quick_timeout_ms;
    let slow = cfg.config.slow_timeout_ms;

    if quick == 0 {
        return Err(WslctlError::ConfigError(
            "[config].quick_timeout_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    if slow == 0 {
        return Err(WslctlError::ConfigError(
            "[config].slow_timeout_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    if quick > slow {
        return Err(WslctlError::ConfigError(format!(
            "[config].quick_timeout_ms ({quick}) must not exceed slow_timeout_ms ({slow})"
        )));
    }
    Ok(())
}

fn validate_provision(cfg: &RawConfigFile) -> Result<()> {
    for (idx, command) in cfg.provision.commands.iter().enumerate() {
        if command.trim().is_empty() {
            return Err(WslctlError::ConfigError(format!(
                "[provision].commands[{idx}] is empty"
            )));
        }
    }
    Ok(())
}

fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            WslctlError::ConfigError(format!(
                "invalid [catalog].exclude pattern '{pattern}': {e}"
            ))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| WslctlError::ConfigError(format!("building exclude patterns: {e}")))
}
