// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! Remote command builders, the catalog task and the capability probes talk
//! to a `CommandRunner` rather than spawning processes themselves. Production
//! code uses [`ProcessRunner`]; tests can provide a runner that records every
//! `CommandSpec` it receives and answers with canned results.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::errors::Result;
use crate::exec::result::ProcessResult;
use crate::exec::runner::run_process;
use crate::exec::spec::CommandSpec;

/// Trait abstracting how a single command is executed.
pub trait CommandRunner: Send + Sync {
    /// Execute `spec` once, waiting at most `timeout`.
    ///
    /// Implementations must report start failures and timeouts through the
    /// returned [`ProcessResult`], never as `Err`.
    fn run(
        &self,
        spec: CommandSpec,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + '_>>;
}

/// Runner that spawns real OS processes via [`run_process`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        spec: CommandSpec,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + '_>> {
        Box::pin(run_process(spec, timeout))
    }
}
