// src/probe.rs

//! Platform capability probes.
//!
//! These invoke native tools directly (not through a remote environment) and
//! only look at the raw output. Any failure to get a usable answer (start
//! failure, timeout, garbage output) means "not enabled".

use std::time::Duration;

use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::{CommandRunner, CommandSpec, ProcessResult};
use crate::remote::DEFAULT_FRONTEND;
use crate::types::{DEFAULT_QUICK_TIMEOUT, OutputEncoding};

/// Default scripting front end used for platform feature queries.
pub const DEFAULT_SCRIPT_HOST: &str = "powershell.exe";

/// Link the front end prints when the subsystem itself is not installed.
const NOT_INSTALLED_HINT: &str = "https://aka.ms/wslinstall";

const VMP_QUERY: &str = "Write-Output (Get-WmiObject -query \"select InstallState from \
     Win32_OptionalFeature where name = 'VirtualMachinePlatform'\").InstallState";

/// Checks whether the virtualization front end is installed and usable.
#[derive(Debug, Clone)]
pub struct SubsystemProbe {
    frontend: String,
    timeout: Duration,
}

impl Default for SubsystemProbe {
    fn default() -> Self {
        Self {
            frontend: DEFAULT_FRONTEND.to_string(),
            timeout: DEFAULT_QUICK_TIMEOUT,
        }
    }
}

impl SubsystemProbe {
    pub fn new(frontend: impl Into<String>, timeout: Duration) -> Self {
        Self {
            frontend: frontend.into(),
            timeout,
        }
    }

    pub fn command_spec(&self) -> CommandSpec {
        CommandSpec::new(&self.frontend)
            .arg("--help")
            .output_encoding(OutputEncoding::Utf16)
    }

    pub async fn probe<R>(&self, runner: &R) -> Result<bool>
    where
        R: CommandRunner + ?Sized,
    {
        let result = runner.run(self.command_spec(), self.timeout).await?;
        let enabled = Self::interpret(&result);
        info!(frontend = %self.frontend, enabled, "virtualization subsystem probe");
        Ok(enabled)
    }

    /// Enabled when the help text came back and does not point at the
    /// installer. The exit code is not consulted: the help command exits
    /// nonzero on some releases.
    pub fn interpret(result: &ProcessResult) -> bool {
        result.completed()
            && result.exit_code() != crate::exec::START_FAILURE_EXIT_CODE
            && !result.output().is_empty()
            && !result.output().contains(NOT_INSTALLED_HINT)
    }
}

/// Checks whether the virtual machine platform feature is enabled.
#[derive(Debug, Clone)]
pub struct VirtualMachinePlatformProbe {
    script_host: String,
    timeout: Duration,
}

impl Default for VirtualMachinePlatformProbe {
    fn default() -> Self {
        Self {
            script_host: DEFAULT_SCRIPT_HOST.to_string(),
            timeout: DEFAULT_QUICK_TIMEOUT,
        }
    }
}

impl VirtualMachinePlatformProbe {
    pub fn new(script_host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            script_host: script_host.into(),
            timeout,
        }
    }

    pub fn command_spec(&self) -> CommandSpec {
        CommandSpec::new(&self.script_host)
            .args(["-NoProfile", "-NonInteractive", "-Command", VMP_QUERY])
            .output_encoding(OutputEncoding::Ascii)
    }

    pub async fn probe<R>(&self, runner: &R) -> Result<bool>
    where
        R: CommandRunner + ?Sized,
    {
        let result = runner.run(self.command_spec(), self.timeout).await?;
        let enabled = Self::interpret(&result);
        info!(script_host = %self.script_host, enabled, "virtual machine platform probe");
        Ok(enabled)
    }

    /// Enabled when the install state printed is exactly `1`.
    pub fn interpret(result: &ProcessResult) -> bool {
        if !result.is_success() {
            debug!(
                completed = result.completed(),
                exit_code = result.exit_code(),
                "install state query did not succeed"
            );
            return false;
        }

        result
            .output()
            .trim_matches(['\r', '\n'])
            .trim()
            .parse::<i32>()
            .is_ok_and(|state| state == 1)
    }
}

/// Result of running every probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityReport {
    pub subsystem_enabled: bool,
    pub vm_platform_enabled: bool,
}

impl CapabilityReport {
    pub fn is_ready(&self) -> bool {
        self.subsystem_enabled && self.vm_platform_enabled
    }
}

/// Run both probes, one after the other.
pub async fn probe_all<R>(
    subsystem: &SubsystemProbe,
    vm_platform: &VirtualMachinePlatformProbe,
    runner: &R,
) -> Result<CapabilityReport>
where
    R: CommandRunner + ?Sized,
{
    Ok(CapabilityReport {
        subsystem_enabled: subsystem.probe(runner).await?,
        vm_platform_enabled: vm_platform.probe(runner).await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsystem_disabled_when_installer_link_shown() {
        let r = ProcessResult::exited(
            1,
            "Install it with: https://aka.ms/wslinstall\n".into(),
            String::new(),
        );
        assert!(!SubsystemProbe::interpret(&r));
    }

    #[test]
    fn subsystem_enabled_with_help_text_even_on_nonzero_exit() {
        let r = ProcessResult::exited(-1, "Usage: wsl.exe [Argument]\n".into(), String::new());
        assert!(SubsystemProbe::interpret(&r));
    }

    #[test]
    fn subsystem_disabled_when_binary_missing_or_silent() {
        assert!(!SubsystemProbe::interpret(&ProcessResult::start_failure("not found")));
        assert!(!SubsystemProbe::interpret(&ProcessResult::timed_out()));
        assert!(!SubsystemProbe::interpret(&ProcessResult::exited(
            0,
            String::new(),
            String::new()
        )));
    }

    #[test]
    fn vm_platform_reads_install_state() {
        let on = ProcessResult::exited(0, "1\n".into(), String::new());
        let off = ProcessResult::exited(0, "2\n".into(), String::new());
        let junk = ProcessResult::exited(0, "Access denied\n".into(), String::new());
        assert!(VirtualMachinePlatformProbe::interpret(&on));
        assert!(!VirtualMachinePlatformProbe::interpret(&off));
        assert!(!VirtualMachinePlatformProbe::interpret(&junk));
    }

    #[test]
    fn vm_platform_query_is_a_single_argument() {
        let spec = VirtualMachinePlatformProbe::default().command_spec();
        assert_eq!(spec.program(), DEFAULT_SCRIPT_HOST);
        assert_eq!(spec.arguments().len(), 4);
        assert_eq!(spec.encoding(), OutputEncoding::Ascii);
    }
}
