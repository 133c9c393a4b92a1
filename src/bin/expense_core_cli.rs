use std::process;

use expense_core::{
    cli::{self, output},
    init, CoreError,
};

fn main() {
    init();

    if let Err(err) = cli::run_cli() {
        output::error(format!("Error: {err}"));
        if matches!(err, CoreError::InvalidInput(_)) {
            eprintln!("Run `expense_core_cli help` for usage.");
        }
        process::exit(1);
    }
}
