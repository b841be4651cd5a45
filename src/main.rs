//! xlsxmerge CLI: merge one sheet from every workbook in a folder.

use std::process::ExitCode;

use clap::Parser;

use xlsxmerge::{init_tracing, CliArgs};

fn main() -> ExitCode {
    init_tracing();

    let args = CliArgs::parse();

    let merger = match args.into_merger() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match merger.run_with_stdio() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
