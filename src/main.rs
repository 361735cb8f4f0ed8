use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod exec;
mod sat;
mod solver;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag. Diagnostics go to stderr
    // so the worker reply protocol and TSV output own stdout.
    let filter = if cli.verbose {
        EnvFilter::new("param_solver=debug,info")
    } else {
        EnvFilter::new("param_solver=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Solve(args) => {
            cli::solve::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Batch(args) => {
            cli::batch::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Encode(args) => {
            cli::encode::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::SolveWorker(args) => {
            cli::worker::run(args)?;
        }
    }

    Ok(())
}
