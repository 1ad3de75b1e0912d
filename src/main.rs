//! tailwindcss CLI entry point

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tailwind::cli::Cli;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("tailwind=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.execute() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            err.display_with_hints();
            std::process::exit(1);
        }
    }
}
