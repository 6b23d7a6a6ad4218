mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{density, income, rank, summary, tract};
use tracing_subscriber::EnvFilter;

/// Log to stderr so table output on stdout stays clean. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Rank(args) => rank::run(&cli, args),
        Commands::Tract(args) => tract::run(&cli, args),
        Commands::Density(args) => density::run(&cli, args),
        Commands::Income(args) => income::run(&cli, args),
        Commands::Summary(args) => summary::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
