use clap::Parser;
use passvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise only errors unless --verbose.
    let default_filter = if cli.verbose {
        "passvault=debug"
    } else {
        "passvault=error"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Register => passvault::cli::commands::register::execute(&cli),
        Commands::Store {
            ref title,
            ref text,
        } => passvault::cli::commands::store::execute(&cli, title, text.as_deref()),
        Commands::Retrieve { ref title } => {
            passvault::cli::commands::retrieve::execute(&cli, title)
        }
        Commands::List => passvault::cli::commands::list::execute(&cli),
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
