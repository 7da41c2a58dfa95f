use clap::Parser;
use innov_harvester::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    match commands::run(args) {
        Ok(_output) => {
            // success - the summary has already been reported
            process::exit(0);
        }
        Err(error) => {
            // error occurred - print to stderr and exit with error code
            eprintln!("Error: {error}");
            process::exit(1);
        }
    }
}
