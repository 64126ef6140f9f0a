mod args;
mod cli;
mod console_driver;
mod input;

use clap::Parser;
use log::LevelFilter;

use args::Arguments;

fn main() -> anyhow::Result<()> {
    let args = Arguments::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let ok = if args.command.alloc() {
        cli::alloc(args.options())?
    } else {
        cli::check(args.options())?
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
