//! `cardgen validate` - Luhn check a PAN.

use anyhow::Result;
use cardgen_core::{luhn, mask_pan};
use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::ValidateArgs;
use crate::education::Explain;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: &ValidateArgs) -> Result<()> {
    if ctx.explain {
        Explain::validate().print();
    }

    let pan = args.pan.trim();
    let valid = luhn::validate(pan);
    let masked = mask_pan(pan);

    match ctx.output_format {
        OutputFormat::Json | OutputFormat::Ndjson => {
            println!("{}", json!({ "pan": masked, "valid": valid }));
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
            writer.write_record(["pan", "valid"])?;
            writer.write_record([masked.as_str(), if valid { "true" } else { "false" }])?;
            writer.flush()?;
        }
        OutputFormat::Pretty => {
            if valid {
                println!(
                    "{} Valid: {} is a valid PAN (Luhn check passed)",
                    "✓".green().bold(),
                    masked
                );
            } else {
                println!(
                    "{} Invalid: {} failed Luhn check",
                    "✗".red().bold(),
                    masked
                );
            }
        }
    }

    if !valid {
        std::process::exit(1);
    }

    Ok(())
}
