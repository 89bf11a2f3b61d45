//! `zitp` - run a zitp program.

use std::process::ExitCode;

use zitpc::{init_tracing, run_program, CliAction, RunConfig, USAGE};

fn main() -> ExitCode {
    init_tracing();

    let config = match RunConfig::from_args(std::env::args().skip(1)) {
        Ok(CliAction::Run(config)) => config,
        Ok(CliAction::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run_program(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", e.render());
            ExitCode::FAILURE
        }
    }
}
