//! Command implementations.

pub mod authorize;
pub mod config;
pub mod generate;
pub mod scenarios;
pub mod serve;
pub mod transform;
pub mod validate;

use colored::Colorize;

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// CVC key
    pub secret: Option<String>,

    /// Output format
    pub output_format: OutputFormat,

    /// Brand used when a command is given none
    pub default_brand: Option<String>,

    /// Whether to show educational explanations
    pub explain: bool,

    /// Verbose output
    pub verbose: bool,

    /// Disable colors
    pub no_color: bool,
}

impl Context {
    /// The CVC key, if one was configured.
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    /// Get the CVC key, returning an error if not set.
    pub fn require_secret(&self) -> anyhow::Result<&str> {
        self.secret().ok_or_else(|| {
            anyhow::anyhow!(
                "Secret required for CVC derivation.\n\n\
                 Set it with one of:\n  \
                 1. --secret <KEY>\n  \
                 2. CARDGEN_SECRET environment variable\n  \
                 3. cardgen config set secret <KEY>"
            )
        })
    }

    /// Brand to use when the command line names none.
    pub fn brand_or_default(&self, brand: Option<String>) -> String {
        brand
            .or_else(|| self.default_brand.clone())
            .unwrap_or_else(|| String::from("visa"))
    }
}

/// Print a warning to stderr so piped output stays clean.
pub fn warn(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
