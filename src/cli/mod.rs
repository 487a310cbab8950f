//! CLI module for the lightsaber service
//!
//! Provides:
//! - serve: load config, open the store, run the REST server
//! - list / show / create / edit / replace / toggle / delete: API client

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, PatchArgs, RecordArgs, ServeArgs, ServerArgs};
pub use commands::{run, run_command, serve};
pub use errors::{CliError, CliResult};
