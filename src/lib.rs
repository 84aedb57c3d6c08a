// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod probe;
pub mod provision;
pub mod remote;
pub mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, load_or_default};
use crate::exec::{CommandRunner, ProcessRunner};
use crate::probe::{SubsystemProbe, VirtualMachinePlatformProbe, probe_all};
use crate::provision::ProvisionPlan;
use crate::remote::{EnvironmentCatalogTask, RemoteCommandBuilder};

/// High-level entry point used by `main.rs`.
///
/// Loads the config, then executes the requested command with the real
/// process runner. Returns the exit code the binary should exit with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let cfg = load_or_default(&args.config)
        .with_context(|| format!("loading config from '{}'", args.config.display()))?;
    let runner = ProcessRunner::new();
    dispatch(&args, &cfg, &runner).await
}

/// Execute one CLI command against `runner`.
///
/// The returned code mirrors the remote exit code (or the `-1` sentinel for
/// a missing parameter); `probe` returns 0 when the machine is ready and 1
/// otherwise.
pub async fn dispatch<R>(args: &CliArgs, cfg: &ConfigFile, runner: &R) -> Result<i32>
where
    R: CommandRunner + ?Sized,
{
    let environment = cfg.target_environment(args.environment.as_deref());
    let timeout = args.timeout_ms.map(Duration::from_millis);
    debug!(?environment, ?timeout, command = ?args.command, "dispatching");

    let remote = |builder: RemoteCommandBuilder| {
        let builder = builder
            .frontend(&cfg.config.frontend)
            .timeouts(cfg.timeouts())
            .environment_opt(environment.clone());
        match timeout {
            Some(t) => builder.timeout(t),
            None => builder,
        }
    };

    let code = match &args.command {
        Command::List { all } => {
            let mut catalog = EnvironmentCatalogTask::new()
                .frontend(&cfg.config.frontend)
                .timeouts(cfg.timeouts());
            if let Some(t) = timeout {
                catalog = catalog.timeout(t);
            }

            let code = catalog.execute(runner).await?;
            match catalog.last_result() {
                Some(result) if result.is_success() => {
                    for env in catalog.environments() {
                        if *all || !cfg.is_excluded(&env.name) {
                            println!("{}", env.name);
                        }
                    }
                    0
                }
                Some(result) => {
                    report_failure("list", result);
                    if result.is_timeout() { 1 } else { code }
                }
                None => code,
            }
        }
        Command::Probe => {
            let probe_timeout = timeout.unwrap_or(cfg.timeouts().quick);
            let subsystem = SubsystemProbe::new(&cfg.config.frontend, probe_timeout);
            let vm_platform = VirtualMachinePlatformProbe::new(&cfg.config.script_host, probe_timeout);
            let report = probe_all(&subsystem, &vm_platform, runner).await?;

            println!("subsystem enabled: {}", report.subsystem_enabled);
            println!("vm platform enabled: {}", report.vm_platform_enabled);
            if report.is_ready() { 0 } else { 1 }
        }
        Command::Rmdir { dir } => {
            run_remote(remote(RemoteCommandBuilder::remove_directory(dir)), runner).await?
        }
        Command::Mkdir { dir } => {
            run_remote(remote(RemoteCommandBuilder::make_directory(dir)), runner).await?
        }
        Command::Chmod { path } => {
            run_remote(remote(RemoteCommandBuilder::set_executable(path)), runner).await?
        }
        Command::Launch { path } => {
            run_remote(remote(RemoteCommandBuilder::launch_executable(path)), runner).await?
        }
        Command::Exec {
            root,
            shell,
            command,
        } => {
            let builder = if *shell {
                RemoteCommandBuilder::shell(command.join(" "))
            } else {
                RemoteCommandBuilder::exec(command)
            };
            run_remote(remote(builder).as_root(*root), runner).await?
        }
        Command::Provision { dry_run } => {
            let plan = ProvisionPlan::new(
                &cfg.config.frontend,
                environment.clone(),
                cfg.timeouts(),
                cfg.provision.commands.clone(),
            );

            if *dry_run {
                for step in plan.steps() {
                    println!("{}", step.command_spec());
                }
                0
            } else {
                let report = plan.run(runner).await?;
                info!(completed = report.completed_steps, "provisioning finished");
                match report.failure {
                    None => 0,
                    Some(failure) => {
                        eprintln!(
                            "step {} failed: {}\n{}",
                            failure.index + 1,
                            failure.command,
                            failure.output
                        );
                        failure.exit_code.unwrap_or(1)
                    }
                }
            }
        }
    };

    Ok(code)
}

/// Run one remote command, echoing its output, and return its exit code.
async fn run_remote<R>(builder: RemoteCommandBuilder, runner: &R) -> Result<i32>
where
    R: CommandRunner + ?Sized,
{
    let name = builder.command().name();
    match builder.run(runner).await? {
        None => {
            eprintln!("{name}: missing required argument");
            Ok(remote::MISSING_PARAMETER_EXIT_CODE)
        }
        Some(result) if result.is_success() => {
            print!("{}", result.output());
            Ok(0)
        }
        Some(result) => {
            report_failure(name, &result);
            Ok(if result.is_timeout() { 1 } else { result.exit_code() })
        }
    }
}

fn report_failure(name: &str, result: &exec::ProcessResult) {
    if result.is_timeout() {
        eprintln!("{name}: timed out");
    } else {
        eprintln!("{name}: exited with {}", result.exit_code());
        eprint!("{}", result.output());
    }
}
