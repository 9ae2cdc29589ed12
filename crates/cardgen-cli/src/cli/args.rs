//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Synthetic payment-card fixtures for test environments
///
/// Generates Luhn-valid PANs with deterministic CVCs, Track2 data and mock
/// ISO-8583 fields. Use --explain on any command to learn what it does.
///
/// Test data only. Never use against production payment systems.
#[derive(Parser, Debug)]
#[command(name = "cardgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Secret key for deterministic CVC derivation (or set CARDGEN_SECRET)
    #[arg(short, long, env = "CARDGEN_SECRET", global = true, hide_env_values = true)]
    pub secret: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Explain what this command does (educational mode)
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate synthetic test cards
    Generate(GenerateArgs),

    /// Inject CVCs into an existing order file
    Transform(TransformArgs),

    /// Check a PAN with the Luhn algorithm
    Validate(ValidateArgs),

    /// List predefined authorization scenarios
    Scenarios,

    /// Build a mock ISO-8583 authorization request and response
    Authorize(AuthorizeArgs),

    /// Start the HTTP fixture server
    Serve(ServeArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Print version information
    Version,
}

// ============================================================================
// Generate command
// ============================================================================

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Card brand (visa, mastercard, amex)
    #[arg(short, long)]
    pub brand: Option<String>,

    /// BIN prefix overriding the brand's default range (at least 6 digits)
    #[arg(long)]
    pub bin: Option<String>,

    /// Number of cards to generate
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,

    /// Include ISO-8583 authorization fields
    #[arg(long)]
    pub iso: bool,

    /// Include Track2 data
    #[arg(long)]
    pub track2: bool,

    /// Write cards to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Metadata label copied onto every card (repeatable)
    #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub meta: Vec<(String, String)>,
}

// ============================================================================
// Transform command
// ============================================================================

#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Order file to read (JSON array or NDJSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// File to write the transformed orders to (JSON array)
    #[arg(short, long, visible_alias = "output")]
    pub out: PathBuf,
}

// ============================================================================
// Validate command
// ============================================================================

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// PAN to check
    pub pan: String,
}

// ============================================================================
// Authorize command
// ============================================================================

#[derive(Args, Debug)]
pub struct AuthorizeArgs {
    /// Scenario to reproduce (see `cardgen scenarios`)
    #[arg(long, conflicts_with = "code")]
    pub scenario: Option<String>,

    /// Response code to answer with (default: 00)
    #[arg(long)]
    pub code: Option<String>,

    /// Card brand (defaults to the scenario's brand, then visa)
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Amount in minor units
    #[arg(long)]
    pub amount: Option<i64>,

    /// ISO 4217 numeric currency code
    #[arg(long)]
    pub currency: Option<String>,
}

// ============================================================================
// Serve command
// ============================================================================

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on (default: 8080)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bearer token protected endpoints require (or set CARDGEN_TOKEN)
    #[arg(short, long, env = "CARDGEN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Server TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., secret, default_brand, output_format)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("env=staging").unwrap(),
            ("env".to_string(), "staging".to_string())
        );
        assert_eq!(
            parse_key_val("url=a=b").unwrap(),
            ("url".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "cardgen", "generate", "--brand", "amex", "-n", "3", "--meta", "suite=smoke", "-f",
            "csv",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Csv));
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.brand.as_deref(), Some("amex"));
                assert_eq!(args.count, 3);
                assert_eq!(args.meta, vec![("suite".into(), "smoke".into())]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_authorize_scenario_conflicts_with_code() {
        let result = Cli::try_parse_from([
            "cardgen", "authorize", "--scenario", "success_auth", "--code", "05",
        ]);
        assert!(result.is_err());
    }
}
