mod app;

use clap::Parser;
use std::process;

use app::cli::Cli;

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.quiet, cli.verbose);

    if let Err(e) = app::run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
