//! `cardgen scenarios` - List authorization test scenarios.

use anyhow::Result;
use cardgen_core::{standard_scenarios, Scenario};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::education::Explain;
use crate::output::OutputFormat;

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Response")]
    response: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Expected")]
    expected: String,
}

#[derive(Serialize)]
struct ScenarioCsvRow<'a> {
    id: &'a str,
    name: &'a str,
    response_code: &'a str,
    response_text: &'a str,
    amount: i64,
    currency: &'a str,
    card_brand: &'a str,
    expected_outcome: &'a str,
}

pub fn execute(ctx: &Context) -> Result<()> {
    if ctx.explain {
        Explain::scenarios().print();
    }

    let scenarios = standard_scenarios();

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(scenarios)?);
        }
        OutputFormat::Ndjson => {
            for scenario in scenarios {
                println!("{}", serde_json::to_string(scenario)?);
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
            for s in scenarios {
                writer.serialize(ScenarioCsvRow {
                    id: &s.id,
                    name: &s.name,
                    response_code: &s.response_code,
                    response_text: &s.response_text,
                    amount: s.amount,
                    currency: &s.currency,
                    card_brand: &s.card_brand,
                    expected_outcome: &s.expected_outcome,
                })?;
            }
            writer.flush()?;
        }
        OutputFormat::Pretty => print_pretty(scenarios, ctx.verbose),
    }

    Ok(())
}

fn print_pretty(scenarios: &[Scenario], verbose: bool) {
    println!(
        "{} {}",
        "Test Scenarios:".bold(),
        scenarios.len().to_string().cyan()
    );
    println!();

    let rows: Vec<ScenarioRow> = scenarios
        .iter()
        .map(|s| ScenarioRow {
            id: s.id.clone(),
            code: s.response_code.clone(),
            response: s.response_text.clone(),
            amount: format!("{} {}", s.amount, s.currency),
            brand: s.card_brand.clone(),
            expected: s.expected_outcome.clone(),
        })
        .collect();

    println!("{}", Table::new(&rows).with(Style::rounded()));

    if verbose {
        println!();
        for s in scenarios {
            println!("{} {}", s.id.bold(), s.name.dimmed());
            println!("  {}", s.description);
            for (key, value) in &s.metadata {
                println!("  {} {}", format!("{key}:").dimmed(), value);
            }
        }
    }

    println!();
    println!(
        "{} cardgen authorize --scenario <ID>",
        "Try:".bold()
    );
}
