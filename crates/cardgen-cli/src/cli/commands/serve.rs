//! `cardgen serve` - Run the HTTP fixture server.

use anyhow::Result;
use cardgen_srv::ServerConfig;
use colored::Colorize;

use super::Context;
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::education::Explain;

pub async fn execute(ctx: &Context, args: ServeArgs, config: &Config) -> Result<()> {
    let server_config = build_server_config(args, config)?;

    if ctx.explain {
        Explain::serve(server_config.listen.port()).print();
    }

    eprintln!(
        "{} This server is for TEST/SANDBOX use only",
        "Warning:".yellow().bold()
    );
    eprintln!(
        "{} http://{}",
        "Listening on".bold(),
        server_config.listen.to_string().cyan()
    );

    cardgen_srv::run(server_config).await?;
    Ok(())
}

/// Server settings from the optional TOML file, then the CLI config, then
/// flags.
fn build_server_config(args: ServeArgs, config: &Config) -> Result<ServerConfig> {
    let mut server_config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(port) = args.port.or(config.port) {
        server_config = server_config.with_port(port);
    }

    if let Some(token) = args
        .token
        .filter(|t| !t.is_empty())
        .or_else(|| config.token.clone().filter(|t| !t.is_empty()))
    {
        server_config = server_config.with_token(token);
    }

    if server_config.token.is_empty() {
        anyhow::bail!(
            "A bearer token is required for the API server.\n\n\
             Set it with one of:\n  \
             1. --token <TOKEN>\n  \
             2. CARDGEN_TOKEN environment variable\n  \
             3. cardgen config set token <TOKEN>"
        );
    }

    Ok(server_config)
}
