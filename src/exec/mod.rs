// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs exactly one external command per call using
//! `tokio::process::Command` and turns whatever happens (exit, start
//! failure, timeout) into a [`ProcessResult`].
//!
//! - [`spec`] holds the immutable `CommandSpec` handed to a runner.
//! - [`result`] defines `ProcessResult` and its output-combining rules.
//! - [`drain`] owns the per-stream reader tasks and text decoding.
//! - [`runner`] is the spawn / drain / timeout / kill core.
//! - [`backend`] provides the `CommandRunner` trait and the production
//!   `ProcessRunner`, which tests can replace with a spy.

pub mod backend;
pub mod drain;
pub mod result;
pub mod runner;
pub mod spec;

pub use backend::{CommandRunner, ProcessRunner};
pub use result::{ProcessResult, START_FAILURE_EXIT_CODE};
pub use runner::run_process;
pub use spec::CommandSpec;
