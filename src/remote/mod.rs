// src/remote/mod.rs

//! Commands executed inside remote Linux environments.
//!
//! - [`command`] enumerates the one-shot commands and their payloads.
//! - [`builder`] composes front end arguments (target environment, root
//!   flag, payload) and executes them through a `CommandRunner`.
//! - [`catalog`] runs the environment listing and parses it.

pub mod builder;
pub mod catalog;
pub mod command;

pub use builder::{DEFAULT_FRONTEND, MISSING_PARAMETER_EXIT_CODE, RemoteCommandBuilder};
pub use catalog::{EnvironmentCatalogTask, EnvironmentDescriptor, parse_catalog};
pub use command::{REMOTE_SHELL, RemoteCommand, TimeoutClass};
