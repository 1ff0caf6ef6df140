//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers which delegate to `AppCore`.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use autogallery_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::resolve(cli.data_dir)?;

    match command {
        Commands::Paths => handlers::paths::execute(&config),
        Commands::Vehicle { command } => {
            let ctx = bootstrap(config).await?;
            handlers::vehicle::execute(&ctx, command).await
        }
        Commands::Image { command } => {
            let ctx = bootstrap(config).await?;
            handlers::image::execute(&ctx, command).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(CliError::exit_code_for(&err))
        }
    }
}
