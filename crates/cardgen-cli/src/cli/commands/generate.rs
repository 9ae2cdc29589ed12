//! `cardgen generate` - Synthesize test cards.

use anyhow::{Context as _, Result};
use cardgen_core::{Card, CardSynthesizer, GenerateOptions};
use colored::Colorize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::{warn, Context};
use crate::cli::args::GenerateArgs;
use crate::education::Explain;
use crate::output::{cards_table, write_cards, OutputFormat};

pub fn execute(ctx: &Context, args: GenerateArgs) -> Result<()> {
    let brand = ctx.brand_or_default(args.brand);

    if ctx.explain {
        Explain::generate(&brand, args.count, ctx.secret().is_some()).print();
    }

    if ctx.secret().is_none() {
        warn(
            "No secret provided. CVCs will not be generated.\n         \
             Set CARDGEN_SECRET or use --secret.",
        );
    }

    let mut options = GenerateOptions::new(brand)
        .count(args.count)
        .include_iso(args.iso)
        .include_track2(args.track2);
    if let Some(bin) = args.bin {
        options = options.bin(bin);
    }
    if let Some(secret) = ctx.secret() {
        options = options.secret(secret);
    }
    for (key, value) in args.meta {
        options = options.meta(key, value);
    }

    let cards = CardSynthesizer::new()
        .synthesize_batch(&options)
        .context("failed to generate cards")?;

    match args.out {
        None => match ctx.output_format {
            OutputFormat::Pretty => print_pretty(&cards),
            format => write_cards(std::io::stdout().lock(), &cards, format)?,
        },
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_cards(BufWriter::new(file), &cards, ctx.output_format)?;
            print_saved(&cards, &path);
        }
    }

    Ok(())
}

fn print_pretty(cards: &[Card]) {
    if cards.is_empty() {
        println!("{}", "No cards generated.".dimmed());
        return;
    }
    println!("{}", cards_table(cards));
    println!(
        "{} {}",
        "Generated:".bold(),
        cards.len().to_string().cyan()
    );
}

/// Confirmation and a masked sample, on stderr.
fn print_saved(cards: &[Card], path: &Path) {
    eprintln!(
        "{} Generated {} cards and saved to {}",
        "✓".green().bold(),
        cards.len(),
        path.display().to_string().cyan()
    );

    if let Some(sample) = cards.first() {
        eprintln!();
        eprintln!("{}", "Sample card:".bold());
        eprintln!("  PAN (masked): {}", sample.masked_pan);
        eprintln!("  Brand: {}", sample.brand);
        eprintln!("  Expiry: {}", sample.expiry_display());
        if sample.has_cvc() {
            eprintln!("  CVC: {}", sample.cvc);
        }
    }
}
