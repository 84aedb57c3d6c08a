// src/exec/result.rs

/// Outcome of a single process execution.
///
/// - `completed == false`: the timeout fired and the child was killed;
///   exit code is 0 and output is empty.
/// - `completed == true, exit_code == -1` with a diagnostic in `output`: the
///   process could not be started at all.
/// - otherwise `exit_code` is the child's own exit code and `output` holds
///   stdout, followed by stderr when the exit code is nonzero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessResult {
    completed: bool,
    exit_code: i32,
    output: String,
}

/// Exit code reported when the process never started.
pub const START_FAILURE_EXIT_CODE: i32 = -1;

impl ProcessResult {
    /// Result for a child that exited on its own.
    ///
    /// Both buffers must already be complete; stderr is only kept when the
    /// exit code signals failure.
    pub fn exited(exit_code: i32, stdout: String, stderr: String) -> Self {
        let output = if exit_code == 0 {
            stdout
        } else {
            let mut combined = stdout;
            combined.push_str(&stderr);
            combined
        };

        Self {
            completed: true,
            exit_code,
            output,
        }
    }

    pub fn start_failure(diagnostic: impl Into<String>) -> Self {
        Self {
            completed: true,
            exit_code: START_FAILURE_EXIT_CODE,
            output: diagnostic.into(),
        }
    }

    pub fn timed_out() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    pub fn is_success(&self) -> bool {
        self.completed && self.exit_code == 0
    }

    pub fn is_timeout(&self) -> bool {
        !self.completed
    }
}
