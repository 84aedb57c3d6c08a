// src/exec/spec.rs

//! Immutable description of one external command invocation.

use std::fmt;

use crate::types::OutputEncoding;

/// Everything the runner needs to launch one child process.
///
/// Arguments are kept argv-style; no shell ever sees them. `command_line()`
/// renders them space-joined for logs and assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    arguments: Vec<String>,
    use_shell_execute: bool,
    redirect_output: bool,
    create_no_window: bool,
    output_encoding: OutputEncoding,
}

impl CommandSpec {
    /// A captured, windowless invocation of `program` decoding UTF-8.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            arguments: Vec::new(),
            use_shell_execute: false,
            redirect_output: true,
            create_no_window: true,
            output_encoding: OutputEncoding::Utf8,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn use_shell_execute(mut self, value: bool) -> Self {
        self.use_shell_execute = value;
        self
    }

    /// When false, the child inherits our stdio and the result output is
    /// always empty.
    pub fn redirect_output(mut self, value: bool) -> Self {
        self.redirect_output = value;
        self
    }

    pub fn create_no_window(mut self, value: bool) -> Self {
        self.create_no_window = value;
        self
    }

    pub fn output_encoding(mut self, encoding: OutputEncoding) -> Self {
        self.output_encoding = encoding;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn uses_shell_execute(&self) -> bool {
        self.use_shell_execute
    }

    pub fn redirects_output(&self) -> bool {
        self.redirect_output
    }

    pub fn creates_no_window(&self) -> bool {
        self.create_no_window
    }

    pub fn encoding(&self) -> OutputEncoding {
        self.output_encoding
    }

    /// Arguments joined by single spaces (without the program).
    pub fn command_line(&self) -> String {
        self.arguments.join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arguments.is_empty() {
            write!(f, "{}", self.program)
        } else {
            write!(f, "{} {}", self.program, self.command_line())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_capture_output_without_window() {
        let spec = CommandSpec::new("wsl.exe");
        assert!(spec.redirects_output());
        assert!(spec.creates_no_window());
        assert!(!spec.uses_shell_execute());
        assert_eq!(spec.encoding(), OutputEncoding::Utf8);
    }

    #[test]
    fn display_joins_program_and_arguments() {
        let spec = CommandSpec::new("wsl.exe").args(["-l", "-v"]);
        assert_eq!(spec.command_line(), "-l -v");
        assert_eq!(spec.to_string(), "wsl.exe -l -v");
        assert_eq!(CommandSpec::new("true").to_string(), "true");
    }
}
