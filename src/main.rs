use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod guards;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("armory=debug,info")
    } else {
        EnvFilter::new("armory=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
        cli::Commands::Init(args) => {
            cli::init::run(&args)?;
        }
        cli::Commands::Check(args) => {
            cli::check::run(&args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
