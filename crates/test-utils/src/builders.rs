#![allow(dead_code)]

use wslctl::config::{ConfigFile, RawConfigFile};
use wslctl::exec::ProcessResult;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn frontend(mut self, program: &str) -> Self {
        self.config.config.frontend = program.to_string();
        self
    }

    pub fn script_host(mut self, program: &str) -> Self {
        self.config.config.script_host = program.to_string();
        self
    }

    pub fn timeouts_ms(mut self, quick: u64, slow: u64) -> Self {
        self.config.config.quick_timeout_ms = quick;
        self.config.config.slow_timeout_ms = slow;
        self
    }

    pub fn default_environment(mut self, name: &str) -> Self {
        self.config.config.default_environment = Some(name.to_string());
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.config.catalog.exclude.push(pattern.to_string());
        self
    }

    pub fn provision(mut self, command: &str) -> Self {
        self.config.provision.commands.push(command.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Successful exit with the given stdout.
pub fn success(stdout: &str) -> ProcessResult {
    ProcessResult::exited(0, stdout.to_string(), String::new())
}

/// Failed exit with the given code and streams.
pub fn failure(code: i32, stdout: &str, stderr: &str) -> ProcessResult {
    ProcessResult::exited(code, stdout.to_string(), stderr.to_string())
}

/// A catalog listing as the front end prints it (already decoded).
pub fn catalog_listing(rows: &[(&str, &str, u32, bool)]) -> String {
    let mut out = String::from("  NAME                   STATE           VERSION\n");
    for (name, state, version, is_default) in rows {
        let marker = if *is_default { '*' } else { ' ' };
        out.push_str(&format!("{marker} {name:<22} {state:<15} {version}\n"));
    }
    out
}
