// src/provision.rs

//! Dependency installation inside a remote environment.
//!
//! A provisioning plan is an ordered list of shell command lines run as root
//! in the target environment. Steps run strictly one after another and the plan
//! stops at the first step that does not exit with 0; nothing is retried.

use tracing::{info, warn};

use crate::errors::Result;
use crate::exec::CommandRunner;
use crate::remote::{MISSING_PARAMETER_EXIT_CODE, RemoteCommandBuilder};
use crate::types::Timeouts;

/// Ordered provisioning steps for one environment.
#[derive(Debug, Clone)]
pub struct ProvisionPlan {
    frontend: String,
    environment: Option<String>,
    timeouts: Timeouts,
    commands: Vec<String>,
}

/// A step that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub index: usize,
    pub command: String,
    /// `None` when the step timed out.
    pub exit_code: Option<i32>,
    pub output: String,
}

/// Outcome of running a [`ProvisionPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProvisionReport {
    pub completed_steps: usize,
    pub failure: Option<StepFailure>,
}

impl ProvisionReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

impl ProvisionPlan {
    pub fn new(
        frontend: impl Into<String>,
        environment: Option<String>,
        timeouts: Timeouts,
        commands: Vec<String>,
    ) -> Self {
        Self {
            frontend: frontend.into(),
            environment,
            timeouts,
            commands,
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// One builder per step, in order.
    pub fn steps(&self) -> Vec<RemoteCommandBuilder> {
        self.commands
            .iter()
            .map(|command| {
                RemoteCommandBuilder::shell(command.as_str())
                    .frontend(&self.frontend)
                    .environment_opt(self.environment.clone())
                    .timeouts(self.timeouts)
                    .as_root(true)
            })
            .collect()
    }

    pub async fn run<R>(&self, runner: &R) -> Result<ProvisionReport>
    where
        R: CommandRunner + ?Sized,
    {
        let mut report = ProvisionReport::default();

        for (index, (step, command)) in self.steps().iter().zip(&self.commands).enumerate() {
            info!(step = index + 1, total = self.commands.len(), command = %command, "provisioning step");

            let failure = match step.run(runner).await? {
                Some(result) if result.is_success() => None,
                Some(result) => Some(StepFailure {
                    index,
                    command: command.clone(),
                    exit_code: result.completed().then(|| result.exit_code()),
                    output: result.into_output(),
                }),
                None => Some(StepFailure {
                    index,
                    command: command.clone(),
                    exit_code: Some(MISSING_PARAMETER_EXIT_CODE),
                    output: "empty provisioning command".to_string(),
                }),
            };

            if let Some(failure) = failure {
                warn!(
                    step = index + 1,
                    command = %command,
                    exit_code = ?failure.exit_code,
                    "provisioning step failed; stopping"
                );
                report.failure = Some(failure);
                return Ok(report);
            }

            report.completed_steps += 1;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_run_as_root_in_target_environment() {
        let plan = ProvisionPlan::new(
            "wsl.exe",
            Some("Ubuntu".into()),
            Timeouts::default(),
            vec!["apt update".into()],
        );
        let steps = plan.steps();
        assert_eq!(steps.len(), 1);
        assert_eq!(
            steps[0].arguments(),
            ["-d", "Ubuntu", "--user", "root", "-e", "sh", "-c", "apt update"]
        );
    }
}
