//! pattern_matching
#![deny(missing_docs)]

use clap::Parser;
use pm_wrap::{init_log, load_parameters, print_error_chain, report, run, PatternMatching};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = PatternMatching::parse();
    init_log(args.verbose);

    match load_parameters().and_then(|params| run(&args, &params)) {
        Ok(matches) => {
            println!("{}", report(matches));
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_error_chain(&err);
            ExitCode::FAILURE
        }
    }
}
