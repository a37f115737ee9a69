//! Command-line driver for the cube turn engine.

mod cli;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    color_eyre::install().expect("error initializing panic handler");
    // Initialize logging.
    env_logger::builder().init();

    log::debug!("{}", cube_core::PUZZLE_ENGINE_VERSION_STRING);
    cli::exec(args.subcommand)
}
