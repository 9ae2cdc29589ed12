//! `cardgen transform` - Inject CVCs into an order file.

use anyhow::{Context as _, Result};
use cardgen_core::transform_orders;
use colored::Colorize;

use super::Context;
use crate::cli::args::TransformArgs;
use crate::education::Explain;
use crate::orders::{read_orders, write_orders};
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: &TransformArgs) -> Result<()> {
    if ctx.explain {
        Explain::transform().print();
    }

    let secret = ctx.require_secret()?;

    let mut orders = read_orders(&args.input)?;

    let summary = transform_orders(&mut orders, secret).context("failed to transform orders")?;

    // Only reached when the whole batch succeeded
    write_orders(&args.out, &orders)?;

    match ctx.output_format {
        OutputFormat::Json | OutputFormat::Ndjson => {
            println!("{}", serde_json::to_string(&summary)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
            writer.serialize(summary)?;
            writer.flush()?;
        }
        OutputFormat::Pretty => {
            println!(
                "{} Transformed orders and saved to {}",
                "✓".green().bold(),
                args.out.display().to_string().cyan()
            );
            println!(
                "  {} {}  {} {}  {} {}",
                "total:".bold(),
                summary.total,
                "updated:".bold(),
                summary.updated,
                "skipped:".bold(),
                summary.skipped
            );
        }
    }

    Ok(())
}
