// src/remote/command.rs

//! The one-shot commands that can be sent to a remote environment.

use crate::types::OutputEncoding;

/// Which timeout budget a command runs under by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutClass {
    Quick,
    Slow,
}

/// A command to run through the virtualization front end, together with its
/// required parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    /// `rm -rf <dir>`.
    RemoveDirectory(String),
    /// `mkdir <dir>`.
    MakeDirectory(String),
    /// `chmod +x <path>`.
    SetExecutable(String),
    /// Runs `<path>` directly in a visible console, output not captured.
    LaunchExecutable(String),
    /// The catalog listing, `-l -v`.
    ListEnvironments,
    /// A program and its arguments, passed through as-is.
    Exec(Vec<String>),
    /// A command line interpreted by `sh -c`, so quoting, pipes and
    /// redirections work.
    Shell(String),
}

/// Shell used for [`RemoteCommand::Shell`] command lines.
pub const REMOTE_SHELL: &str = "sh";

impl RemoteCommand {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            RemoteCommand::RemoveDirectory(_) => "rmdir",
            RemoteCommand::MakeDirectory(_) => "mkdir",
            RemoteCommand::SetExecutable(_) => "chmod",
            RemoteCommand::LaunchExecutable(_) => "launch",
            RemoteCommand::ListEnvironments => "list",
            RemoteCommand::Exec(_) => "exec",
            RemoteCommand::Shell(_) => "shell",
        }
    }

    /// The required parameter, or `None` for commands that take none. For
    /// `Exec` this is the program.
    pub fn required_parameter(&self) -> Option<&str> {
        match self {
            RemoteCommand::RemoveDirectory(p)
            | RemoteCommand::MakeDirectory(p)
            | RemoteCommand::SetExecutable(p)
            | RemoteCommand::LaunchExecutable(p)
            | RemoteCommand::Shell(p) => Some(p.as_str()),
            RemoteCommand::Exec(argv) => Some(argv.first().map_or("", String::as_str)),
            RemoteCommand::ListEnvironments => None,
        }
    }

    /// True when the required parameter is present but blank.
    pub fn is_missing_parameter(&self) -> bool {
        self.required_parameter()
            .is_some_and(|p| p.trim().is_empty())
    }

    /// The payload tokens, before environment composition.
    pub fn payload(&self) -> Vec<String> {
        match self {
            RemoteCommand::RemoveDirectory(dir) => vec!["rm".into(), "-rf".into(), dir.clone()],
            RemoteCommand::MakeDirectory(dir) => vec!["mkdir".into(), dir.clone()],
            RemoteCommand::SetExecutable(path) => vec!["chmod".into(), "+x".into(), path.clone()],
            RemoteCommand::LaunchExecutable(path) => vec![path.clone()],
            RemoteCommand::ListEnvironments => vec!["-l".into(), "-v".into()],
            RemoteCommand::Exec(argv) => argv.clone(),
            RemoteCommand::Shell(line) => vec![REMOTE_SHELL.into(), "-c".into(), line.clone()],
        }
    }

    pub fn timeout_class(&self) -> TimeoutClass {
        match self {
            RemoteCommand::RemoveDirectory(_)
            | RemoteCommand::MakeDirectory(_)
            | RemoteCommand::SetExecutable(_) => TimeoutClass::Quick,
            RemoteCommand::LaunchExecutable(_)
            | RemoteCommand::ListEnvironments
            | RemoteCommand::Exec(_)
            | RemoteCommand::Shell(_) => TimeoutClass::Slow,
        }
    }

    /// The front end's own listing is UTF-16; output relayed from inside the
    /// environment is UTF-8.
    pub fn output_encoding(&self) -> OutputEncoding {
        match self {
            RemoteCommand::ListEnvironments => OutputEncoding::Utf16,
            _ => OutputEncoding::Utf8,
        }
    }

    /// Launching hands the console to the executable instead of capturing it.
    pub fn captures_output(&self) -> bool {
        !matches!(self, RemoteCommand::LaunchExecutable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shapes() {
        assert_eq!(
            RemoteCommand::RemoveDirectory("/tmp/x".into()).payload(),
            ["rm", "-rf", "/tmp/x"]
        );
        assert_eq!(RemoteCommand::MakeDirectory("/tmp/x".into()).payload(), ["mkdir", "/tmp/x"]);
        assert_eq!(
            RemoteCommand::SetExecutable("/tmp/x/app".into()).payload(),
            ["chmod", "+x", "/tmp/x/app"]
        );
        assert_eq!(RemoteCommand::LaunchExecutable("/tmp/x/app".into()).payload(), ["/tmp/x/app"]);
        assert_eq!(RemoteCommand::ListEnvironments.payload(), ["-l", "-v"]);
        assert_eq!(
            RemoteCommand::Exec(vec!["mkdir".into(), "/tmp/My Build".into()]).payload(),
            ["mkdir", "/tmp/My Build"]
        );
        assert_eq!(
            RemoteCommand::Shell("echo \"deb x\" | tee /tmp/a.list".into()).payload(),
            ["sh", "-c", "echo \"deb x\" | tee /tmp/a.list"]
        );
    }

    #[test]
    fn list_never_misses_a_parameter() {
        assert!(!RemoteCommand::ListEnvironments.is_missing_parameter());
        assert!(RemoteCommand::MakeDirectory(String::new()).is_missing_parameter());
        assert!(RemoteCommand::Shell("   ".into()).is_missing_parameter());
        assert!(RemoteCommand::Exec(Vec::new()).is_missing_parameter());
        assert!(RemoteCommand::Exec(vec![" ".into(), "x".into()]).is_missing_parameter());
    }

    #[test]
    fn launch_and_listing_use_the_slow_budget() {
        assert_eq!(RemoteCommand::ListEnvironments.timeout_class(), TimeoutClass::Slow);
        assert_eq!(
            RemoteCommand::LaunchExecutable("a".into()).timeout_class(),
            TimeoutClass::Slow
        );
        assert_eq!(RemoteCommand::SetExecutable("a".into()).timeout_class(), TimeoutClass::Quick);
    }
}
