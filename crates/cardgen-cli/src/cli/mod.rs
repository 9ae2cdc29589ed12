//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, matches!(cli.command, Commands::Serve(_)));

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Flag beats config file, which beats the default
    let output_format = cli.format.or(config.output_format).unwrap_or_default();

    // Secret from flag or CARDGEN_SECRET, then config
    let secret = cli
        .secret
        .filter(|s| !s.is_empty())
        .or_else(|| config.secret.clone().filter(|s| !s.is_empty()));

    // Create context for commands
    let ctx = commands::Context {
        secret,
        output_format,
        default_brand: config.default_brand.clone(),
        explain: cli.explain,
        verbose: cli.verbose,
        no_color: cli.no_color,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(&ctx, args),
        Commands::Transform(args) => commands::transform::execute(&ctx, &args),
        Commands::Validate(args) => commands::validate::execute(&ctx, &args),
        Commands::Scenarios => commands::scenarios::execute(&ctx),
        Commands::Authorize(args) => commands::authorize::execute(&ctx, args),
        Commands::Serve(args) => commands::serve::execute(&ctx, args, &config).await,
        Commands::Config(args) => commands::config::execute(&ctx, args),
        Commands::Version => {
            println!("cardgen {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over the defaults.
fn init_tracing(verbose: bool, serving: bool) {
    let default = if verbose {
        "debug"
    } else if serving {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
