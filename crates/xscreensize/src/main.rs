// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod config;
mod logging;
mod paths;
mod print;
mod run;

use clap::Parser;

use crate::cli::Args;
use crate::logging::LogSink;

fn main() {
    let args = Args::parse();

    let sink = LogSink::new(args.log_file.clone(), args.verbose);
    if let Err(e) = sink.init() {
        // logging should never block normal usage
        eprintln!("xscreensize: failed to init logging: {e}");
    }

    eventline::debug!("log_path={}", sink.file.display());

    if let Err(e) = run::run(args) {
        // user-facing error
        eprintln!("{e}");
        std::process::exit(1);
    }
}
