// src/remote/builder.rs

//! Argument composition for remote-environment invocations.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::{CommandRunner, CommandSpec, ProcessResult};
use crate::remote::command::{RemoteCommand, TimeoutClass};
use crate::types::Timeouts;

/// Default virtualization front end binary.
pub const DEFAULT_FRONTEND: &str = "wsl.exe";

/// Exit code returned when a required parameter is missing and nothing was
/// executed.
pub const MISSING_PARAMETER_EXIT_CODE: i32 = -1;

/// Builds and executes one [`RemoteCommand`] against an optional target
/// environment.
///
/// The full invocation is
/// `<frontend> [-d <environment>] [--user root] [-e] <payload...>`, where
/// `-e` is present exactly when an environment is set; without one the
/// payload goes to the front end bare and lands in its default environment.
#[derive(Debug, Clone)]
pub struct RemoteCommandBuilder {
    frontend: String,
    command: RemoteCommand,
    environment: Option<String>,
    as_root: bool,
    timeouts: Timeouts,
    timeout: Option<Duration>,
}

impl RemoteCommandBuilder {
    pub fn new(command: RemoteCommand) -> Self {
        Self {
            frontend: DEFAULT_FRONTEND.to_string(),
            command,
            environment: None,
            as_root: false,
            timeouts: Timeouts::default(),
            timeout: None,
        }
    }

    pub fn remove_directory(dir: impl Into<String>) -> Self {
        Self::new(RemoteCommand::RemoveDirectory(dir.into()))
    }

    pub fn make_directory(dir: impl Into<String>) -> Self {
        Self::new(RemoteCommand::MakeDirectory(dir.into()))
    }

    pub fn set_executable(path: impl Into<String>) -> Self {
        Self::new(RemoteCommand::SetExecutable(path.into()))
    }

    pub fn launch_executable(path: impl Into<String>) -> Self {
        Self::new(RemoteCommand::LaunchExecutable(path.into()))
    }

    pub fn list_environments() -> Self {
        Self::new(RemoteCommand::ListEnvironments)
    }

    /// Run `argv` directly; each element reaches the program unchanged.
    pub fn exec<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RemoteCommand::Exec(argv.into_iter().map(Into::into).collect()))
    }

    /// Run `command_line` through the remote shell.
    pub fn shell(command_line: impl Into<String>) -> Self {
        Self::new(RemoteCommand::Shell(command_line.into()))
    }

    pub fn frontend(mut self, program: impl Into<String>) -> Self {
        self.frontend = program.into();
        self
    }

    /// Target a named environment. An empty name means the default one.
    pub fn environment(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.environment = (!name.trim().is_empty()).then_some(name);
        self
    }

    pub fn environment_opt(self, name: Option<String>) -> Self {
        match name {
            Some(name) => self.environment(name),
            None => Self {
                environment: None,
                ..self
            },
        }
    }

    /// Run the payload as the root user inside the environment.
    pub fn as_root(mut self, value: bool) -> Self {
        self.as_root = value;
        self
    }

    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Override the timeout for this call only.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn command(&self) -> &RemoteCommand {
        &self.command
    }

    pub fn target_environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    pub fn effective_timeout(&self) -> Duration {
        self.timeout.unwrap_or(match self.command.timeout_class() {
            TimeoutClass::Quick => self.timeouts.quick,
            TimeoutClass::Slow => self.timeouts.slow,
        })
    }

    /// Compose the front end arguments for this command.
    ///
    /// The catalog listing is a front end option, not a payload, so it never
    /// carries an environment or user.
    pub fn arguments(&self) -> Vec<String> {
        if matches!(self.command, RemoteCommand::ListEnvironments) {
            return self.command.payload();
        }

        let mut args = Vec::new();

        if let Some(env) = &self.environment {
            args.push("-d".to_string());
            args.push(env.clone());
        }
        if self.as_root {
            args.push("--user".to_string());
            args.push("root".to_string());
        }
        if self.environment.is_some() {
            args.push("-e".to_string());
        }

        args.extend(self.command.payload());
        args
    }

    /// The `CommandSpec` that [`execute`](Self::execute) would hand to the
    /// runner.
    pub fn command_spec(&self) -> CommandSpec {
        let captures = self.command.captures_output();
        CommandSpec::new(&self.frontend)
            .args(self.arguments())
            .redirect_output(captures)
            .create_no_window(captures)
            .use_shell_execute(!captures)
            .output_encoding(self.command.output_encoding())
    }

    /// Execute the command and return the full process result, or `None`
    /// when the required parameter is missing and nothing was spawned.
    pub async fn run<R>(&self, runner: &R) -> Result<Option<ProcessResult>>
    where
        R: CommandRunner + ?Sized,
    {
        if self.command.is_missing_parameter() {
            warn!(
                command = self.command.name(),
                "required parameter is empty; not executing"
            );
            return Ok(None);
        }

        let spec = self.command_spec();
        let timeout = self.effective_timeout();
        debug!(
            command = self.command.name(),
            environment = self.environment.as_deref().unwrap_or("<default>"),
            as_root = self.as_root,
            "dispatching remote command"
        );

        let result = runner.run(spec, timeout).await?;

        if result.is_timeout() {
            warn!(command = self.command.name(), "remote command timed out");
        } else {
            info!(
                command = self.command.name(),
                exit_code = result.exit_code(),
                "remote command finished"
            );
        }

        Ok(Some(result))
    }

    /// Execute the command and return only its exit code.
    ///
    /// Returns [`MISSING_PARAMETER_EXIT_CODE`] without spawning anything when
    /// the required parameter is empty. A timed out command reports the
    /// result's zero-value exit code; use [`run`](Self::run) to tell the two
    /// apart.
    pub async fn execute<R>(&self, runner: &R) -> Result<i32>
    where
        R: CommandRunner + ?Sized,
    {
        Ok(self
            .run(runner)
            .await?
            .map_or(MISSING_PARAMETER_EXIT_CODE, |r| r.exit_code()))
    }
}
