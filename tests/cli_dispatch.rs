// tests/cli_dispatch.rs

mod common;
use crate::common::builders::{ConfigFileBuilder, catalog_listing, failure, success};
use crate::common::{SpyRunner, init_tracing, with_timeout};

use std::time::Duration;

use clap::Parser;

use wslctl::cli::{CliArgs, Command};
use wslctl::dispatch;
use wslctl::exec::ProcessResult;

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["wslctl"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).unwrap()
}

#[test]
fn parses_global_flags_after_subcommand() {
    let parsed = args(&["mkdir", "/tmp/app", "-d", "Ubuntu", "--timeout-ms", "250"]);

    assert_eq!(parsed.environment.as_deref(), Some("Ubuntu"));
    assert_eq!(parsed.timeout_ms, Some(250));
    assert!(matches!(parsed.command, Command::Mkdir { ref dir } if dir == "/tmp/app"));
}

#[test]
fn exec_keeps_hyphenated_payload() {
    let parsed = args(&["exec", "--root", "apt", "install", "-y", "curl"]);
    match parsed.command {
        Command::Exec {
            root,
            shell,
            command,
        } => {
            assert!(root);
            assert!(!shell);
            assert_eq!(command, ["apt", "install", "-y", "curl"]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn config_defaults_to_working_directory_file() {
    assert_eq!(args(&["list"]).config, wslctl::config::default_config_path());
    assert_eq!(
        args(&["--config", "/etc/wslctl.toml", "list"]).config,
        std::path::PathBuf::from("/etc/wslctl.toml")
    );
}

#[tokio::test]
async fn exec_arguments_reach_the_runner_unsplit() {
    let cfg = ConfigFileBuilder::new().default_environment("Ubuntu").build();
    let spy = SpyRunner::new();

    dispatch(&args(&["exec", "mkdir", "/tmp/My Build"]), &cfg, &spy)
        .await
        .unwrap();
    dispatch(
        &args(&["exec", "--shell", "--root", "echo 'a b' | tee /tmp/x.list"]),
        &cfg,
        &spy,
    )
    .await
    .unwrap();

    let calls = spy.calls();
    assert_eq!(calls[0].spec.arguments(), ["-d", "Ubuntu", "-e", "mkdir", "/tmp/My Build"]);
    assert_eq!(
        calls[1].spec.arguments(),
        ["-d", "Ubuntu", "--user", "root", "-e", "sh", "-c", "echo 'a b' | tee /tmp/x.list"]
    );
}

#[test]
fn exec_requires_a_payload() {
    assert!(CliArgs::try_parse_from(["wslctl", "exec"]).is_err());
}

#[tokio::test]
async fn remote_commands_use_configured_environment_and_budgets() {
    init_tracing();
    let cfg = ConfigFileBuilder::new()
        .default_environment("Ubuntu")
        .timeouts_ms(300, 4000)
        .build();
    let spy = SpyRunner::new();

    let code = with_timeout(dispatch(&args(&["chmod", "/opt/app/run"]), &cfg, &spy))
        .await
        .unwrap();
    assert_eq!(code, 0);

    with_timeout(dispatch(&args(&["launch", "/opt/app/run", "-d", "Debian"]), &cfg, &spy))
        .await
        .unwrap();

    let calls = spy.calls();
    assert_eq!(calls[0].command_line(), "-d Ubuntu -e chmod +x /opt/app/run");
    assert_eq!(calls[0].timeout, Duration::from_millis(300));
    assert_eq!(calls[1].command_line(), "-d Debian -e /opt/app/run");
    assert_eq!(calls[1].timeout, Duration::from_millis(4000));
    assert!(!calls[1].spec.redirects_output());
}

#[tokio::test]
async fn timeout_flag_overrides_configured_budget() {
    let cfg = ConfigFileBuilder::new().build();
    let spy = SpyRunner::new();

    dispatch(&args(&["rmdir", "/tmp/x", "--timeout-ms", "42"]), &cfg, &spy)
        .await
        .unwrap();

    assert_eq!(spy.calls()[0].timeout, Duration::from_millis(42));
}

#[tokio::test]
async fn exit_code_mirrors_remote_command() {
    let cfg = ConfigFileBuilder::new().build();
    let spy = SpyRunner::answering(failure(2, "", "mkdir: cannot create directory\n"));

    let code = dispatch(&args(&["mkdir", "/root/x"]), &cfg, &spy).await.unwrap();
    assert_eq!(code, 2);
}

#[tokio::test]
async fn blank_argument_returns_sentinel_without_spawning() {
    let cfg = ConfigFileBuilder::new().build();
    let spy = SpyRunner::new();

    let code = dispatch(&args(&["rmdir", ""]), &cfg, &spy).await.unwrap();

    assert_eq!(code, -1);
    assert_eq!(spy.call_count(), 0);
}

#[tokio::test]
async fn timed_out_command_exits_with_one() {
    let cfg = ConfigFileBuilder::new().build();
    let spy = SpyRunner::answering(ProcessResult::timed_out());

    let code = dispatch(&args(&["exec", "sleep", "600"]), &cfg, &spy).await.unwrap();
    assert_eq!(code, 1);
}

#[tokio::test]
async fn list_succeeds_and_failed_list_reports_exit_code() {
    let cfg = ConfigFileBuilder::new().exclude("docker-desktop*").build();
    let spy = SpyRunner::new();
    spy.push_result(success(&catalog_listing(&[
        ("Ubuntu", "Running", 2, true),
        ("docker-desktop", "Running", 2, false),
    ])))
    .push_result(failure(5, "", "access denied\n"))
    .push_result(ProcessResult::timed_out());

    assert_eq!(dispatch(&args(&["list"]), &cfg, &spy).await.unwrap(), 0);
    assert_eq!(dispatch(&args(&["list", "--all"]), &cfg, &spy).await.unwrap(), 5);
    assert_eq!(dispatch(&args(&["list"]), &cfg, &spy).await.unwrap(), 1);

    // The catalog is never targeted at an environment.
    assert!(spy.calls().iter().all(|c| c.command_line() == "-l -v"));
}

#[tokio::test]
async fn probe_exit_code_reflects_readiness() {
    let cfg = ConfigFileBuilder::new().script_host("pwsh").build();

    let ready = SpyRunner::new();
    ready.push_result(success("Usage: wsl.exe\n")).push_result(success("1\n"));
    assert_eq!(dispatch(&args(&["probe"]), &cfg, &ready).await.unwrap(), 0);
    assert_eq!(ready.calls()[1].spec.program(), "pwsh");

    let not_ready = SpyRunner::answering(ProcessResult::start_failure("not found"));
    assert_eq!(dispatch(&args(&["probe"]), &cfg, &not_ready).await.unwrap(), 1);
}

#[tokio::test]
async fn provision_runs_configured_commands() {
    let cfg = ConfigFileBuilder::new()
        .default_environment("Ubuntu")
        .provision("apt update")
        .provision("apt install -y curl")
        .build();

    let dry = SpyRunner::new();
    let code = dispatch(&args(&["provision", "--dry-run"]), &cfg, &dry).await.unwrap();
    assert_eq!(code, 0);
    assert_eq!(dry.call_count(), 0);

    let spy = SpyRunner::new();
    spy.push_result(success("")).push_result(failure(100, "", "E: broken\n"));
    let code = dispatch(&args(&["provision"]), &cfg, &spy).await.unwrap();
    assert_eq!(code, 100);
    assert_eq!(
        spy.calls()[1].command_line(),
        "-d Ubuntu --user root -e sh -c apt install -y curl"
    );
}
