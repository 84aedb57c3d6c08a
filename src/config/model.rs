// src/config/model.rs

use std::time::Duration;

use globset::GlobSet;
use serde::Deserialize;

use crate::probe::DEFAULT_SCRIPT_HOST;
use crate::remote::DEFAULT_FRONTEND;
use crate::types::Timeouts;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// frontend = "wsl.exe"
/// script_host = "powershell.exe"
/// quick_timeout_ms = 1000
/// slow_timeout_ms = 100000
/// default_environment = "Ubuntu"
///
/// [catalog]
/// exclude = ["docker-desktop*"]
///
/// [provision]
/// commands = ["apt update", "apt install -y build-essential"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub catalog: CatalogSection,

    #[serde(default)]
    pub provision: ProvisionSection,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Virtualization front end binary.
    #[serde(default = "default_frontend")]
    pub frontend: String,

    /// Scripting front end used by the platform probe.
    #[serde(default = "default_script_host")]
    pub script_host: String,

    /// Budget for directory and permission changes.
    #[serde(default = "default_quick_timeout_ms")]
    pub quick_timeout_ms: u64,

    /// Budget for listing, launching and arbitrary commands.
    #[serde(default = "default_slow_timeout_ms")]
    pub slow_timeout_ms: u64,

    /// Environment used when `-d` is not given. `None` means the front
    /// end's own default.
    #[serde(default)]
    pub default_environment: Option<String>,
}

fn default_frontend() -> String {
    DEFAULT_FRONTEND.to_string()
}

fn default_script_host() -> String {
    DEFAULT_SCRIPT_HOST.to_string()
}

fn default_quick_timeout_ms() -> u64 {
    1_000
}

fn default_slow_timeout_ms() -> u64 {
    100_000
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            frontend: default_frontend(),
            script_host: default_script_host(),
            quick_timeout_ms: default_quick_timeout_ms(),
            slow_timeout_ms: default_slow_timeout_ms(),
            default_environment: None,
        }
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CatalogSection {
    /// Glob patterns of environment names hidden from `list`.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// `[provision]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProvisionSection {
    /// Command lines run as root, in order.
    #[serde(default)]
    pub commands: Vec<String>,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub catalog: CatalogSection,
    pub provision: ProvisionSection,
    exclude: GlobSet,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile, exclude: GlobSet) -> Self {
        Self {
            config: raw.config,
            catalog: raw.catalog,
            provision: raw.provision,
            exclude,
        }
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            quick: Duration::from_millis(self.config.quick_timeout_ms),
            slow: Duration::from_millis(self.config.slow_timeout_ms),
        }
    }

    /// True when `name` matches one of the `[catalog].exclude` patterns.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.is_match(name)
    }

    /// `--environment` if given, else `[config].default_environment`.
    pub fn target_environment(&self, cli_environment: Option<&str>) -> Option<String> {
        cli_environment
            .map(str::to_string)
            .or_else(|| self.config.default_environment.clone())
    }
}
