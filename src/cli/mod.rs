//! Non-interactive command line front end over a snapshot file.

pub mod args;
pub mod commands;
pub mod output;

use std::env;

use crate::errors::Result;

pub use args::{parse_args, Command, Invocation, Options};

/// Parses the process arguments and runs the selected command.
pub fn run_cli() -> Result<()> {
    let invocation = parse_args(env::args().skip(1))?;
    commands::execute(invocation)
}
