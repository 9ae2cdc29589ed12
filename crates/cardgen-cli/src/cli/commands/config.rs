//! `cardgen config` - CLI configuration management.

use anyhow::Result;
use cardgen_core::BrandRegistry;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

/// Show the ends of a credential, or `****` when it is short.
fn mask_credential(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = Config::load()?;

    if matches!(ctx.output_format, OutputFormat::Json | OutputFormat::Ndjson) {
        let masked = Config {
            secret: config.secret.as_deref().map(mask_credential),
            token: config.token.as_deref().map(mask_credential),
            ..config
        };
        println!("{}", serde_json::to_string_pretty(&masked)?);
        return Ok(());
    }

    let not_set = || "(not set)".dimmed().to_string();

    println!("{}", "Current Configuration:".bold());
    println!();
    println!(
        "  {} {}",
        "secret:".bold(),
        config
            .secret
            .as_deref()
            .map_or_else(not_set, mask_credential)
    );
    println!(
        "  {} {}",
        "default_brand:".bold(),
        config.default_brand.clone().unwrap_or_else(not_set)
    );
    println!(
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or_default()
    );
    println!(
        "  {} {}",
        "token:".bold(),
        config.token.as_deref().map_or_else(not_set, mask_credential)
    );
    println!(
        "  {} {}",
        "port:".bold(),
        config
            .port
            .map_or_else(not_set, |p| p.to_string())
    );

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "secret" => {
            config.secret = Some(value.to_string());
            println!("{} Secret set.", "Success:".green().bold());
        }
        "default_brand" | "brand" => {
            let profile = BrandRegistry::standard().resolve(value)?;
            config.default_brand = Some(value.to_lowercase());
            println!(
                "{} Default brand set to {}.",
                "Success:".green().bold(),
                profile.name.cyan()
            );
        }
        "output_format" | "format" => {
            config.output_format = Some(value.parse()?);
            println!(
                "{} Output format set to {}.",
                "Success:".green().bold(),
                value.cyan()
            );
        }
        "token" => {
            config.token = Some(value.to_string());
            println!("{} Server token set.", "Success:".green().bold());
        }
        "port" => {
            config.port = Some(value.parse()?);
            println!("{} Server port set to {}.", "Success:".green().bold(), value);
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 secret         - CVC derivation key\n  \
                 default_brand  - Brand used when --brand is omitted (visa/mastercard/amex)\n  \
                 output_format  - Default output format (pretty/json/ndjson/csv)\n  \
                 token          - Bearer token for 'cardgen serve'\n  \
                 port           - Port for 'cardgen serve'",
                key
            );
        }
    }

    config.save()?;

    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
