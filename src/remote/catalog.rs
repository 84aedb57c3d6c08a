// src/remote/catalog.rs

//! Environment catalog: run the listing command and parse its table.
//!
//! The listing looks like:
//!
//! ```text
//!   NAME            STATE           VERSION
//! * Ubuntu          Running         2
//!   Alpine          Stopped         1
//! ```

use std::time::Duration;

use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::{CommandRunner, ProcessResult};
use crate::remote::builder::RemoteCommandBuilder;
use crate::types::Timeouts;

/// Column label identifying the header row.
const HEADER_MARKER: &str = "NAME";

/// Marker the front end puts in front of the default environment.
const DEFAULT_MARKER: char = '*';

/// Entries whose third column equals this are never listed.
const EXCLUDED_STATE_CODE: i64 = 1;

/// A named remote environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvironmentDescriptor {
    pub name: String,
}

impl EnvironmentDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Runs `-l -v` and keeps the parsed environments of the last successful
/// query.
#[derive(Debug, Clone)]
pub struct EnvironmentCatalogTask {
    builder: RemoteCommandBuilder,
    environments: Vec<EnvironmentDescriptor>,
    last_result: Option<ProcessResult>,
}

impl Default for EnvironmentCatalogTask {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentCatalogTask {
    pub fn new() -> Self {
        Self {
            builder: RemoteCommandBuilder::list_environments(),
            environments: Vec::new(),
            last_result: None,
        }
    }

    pub fn frontend(mut self, program: impl Into<String>) -> Self {
        self.builder = self.builder.frontend(program);
        self
    }

    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.builder = self.builder.timeouts(timeouts);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.builder = self.builder.timeout(timeout);
        self
    }

    /// Environments from the most recent successful query.
    pub fn environments(&self) -> &[EnvironmentDescriptor] {
        &self.environments
    }

    /// Names from the most recent successful query.
    pub fn names(&self) -> Vec<String> {
        self.environments.iter().map(|e| e.name.clone()).collect()
    }

    pub fn last_result(&self) -> Option<&ProcessResult> {
        self.last_result.as_ref()
    }

    /// Query the catalog.
    ///
    /// On exit code 0 the environment list is replaced wholesale; on any
    /// other outcome the previous list is left untouched.
    pub async fn execute<R>(&mut self, runner: &R) -> Result<i32>
    where
        R: CommandRunner + ?Sized,
    {
        let Some(result) = self.builder.run(runner).await? else {
            // The listing has no required parameter, so this never happens.
            return Ok(crate::remote::builder::MISSING_PARAMETER_EXIT_CODE);
        };

        let exit_code = result.exit_code();
        if result.is_success() {
            self.environments = parse_catalog(result.output());
            info!(count = self.environments.len(), "environment catalog refreshed");
        } else {
            debug!(
                exit_code,
                completed = result.completed(),
                "catalog query failed; keeping previous environments"
            );
        }

        self.last_result = Some(result);
        Ok(exit_code)
    }
}

/// Parse catalog listing text into environment descriptors.
///
/// Malformed rows (fewer than three columns, non-numeric third column) are
/// skipped; they never abort the whole listing.
pub fn parse_catalog(output: &str) -> Vec<EnvironmentDescriptor> {
    output
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\r', '\n']))
        .filter_map(parse_catalog_line)
        .collect()
}

fn parse_catalog_line(line: &str) -> Option<EnvironmentDescriptor> {
    if line.contains(HEADER_MARKER) {
        return None;
    }

    let trimmed = line.trim_start();
    let cleaned = trimmed.strip_prefix(DEFAULT_MARKER).unwrap_or(trimmed);
    let fields: Vec<&str> = cleaned.split_whitespace().collect();

    if fields.is_empty() {
        return None;
    }
    if fields.len() < 3 {
        debug!(line, "skipping catalog row with fewer than three columns");
        return None;
    }

    let code: i64 = match fields[2].parse() {
        Ok(code) => code,
        Err(_) => {
            debug!(line, "skipping catalog row with non-numeric third column");
            return None;
        }
    };
    if code == EXCLUDED_STATE_CODE {
        return None;
    }

    Some(EnvironmentDescriptor::new(fields[0]))
}
