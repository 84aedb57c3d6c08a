use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use wslctl::errors::{Result, WslctlError};
use wslctl::exec::{CommandRunner, CommandSpec, ProcessResult};

/// One call observed by a [`SpyRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub spec: CommandSpec,
    pub timeout: Duration,
}

impl RecordedCall {
    /// Arguments joined by spaces, for compact assertions.
    pub fn command_line(&self) -> String {
        self.spec.command_line()
    }
}

enum Scripted {
    Result(ProcessResult),
    Fatal(String),
}

/// A runner that never spawns anything:
/// - records every `CommandSpec` it is asked to run
/// - answers with queued results in order, then with a default result.
#[derive(Clone)]
pub struct SpyRunner {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    queued: Arc<Mutex<VecDeque<Scripted>>>,
    fallback: ProcessResult,
}

impl Default for SpyRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SpyRunner {
    /// A spy that answers every call with a successful, silent exit.
    pub fn new() -> Self {
        Self::answering(ProcessResult::exited(0, String::new(), String::new()))
    }

    /// A spy that answers every unscripted call with `fallback`.
    pub fn answering(fallback: ProcessResult) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            fallback,
        }
    }

    /// Queue the result for the next unanswered call.
    pub fn push_result(&self, result: ProcessResult) -> &Self {
        self.queued.lock().unwrap().push_back(Scripted::Result(result));
        self
    }

    /// Make the next unanswered call fail as if the OS broke mid-wait.
    pub fn push_fatal(&self, message: &str) -> &Self {
        self.queued
            .lock()
            .unwrap()
            .push_back(Scripted::Fatal(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CommandRunner for SpyRunner {
    fn run(
        &self,
        spec: CommandSpec,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + '_>> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall { spec, timeout });

        let next = self.queued.lock().unwrap().pop_front();
        let answer = match next {
            Some(Scripted::Result(result)) => Ok(result),
            Some(Scripted::Fatal(message)) => {
                Err(WslctlError::Other(anyhow::anyhow!(message)))
            }
            None => Ok(self.fallback.clone()),
        };

        Box::pin(async move { answer })
    }
}
