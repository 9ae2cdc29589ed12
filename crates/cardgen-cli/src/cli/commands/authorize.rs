//! `cardgen authorize` - Mock an ISO-8583 authorization exchange.

use anyhow::Result;
use cardgen_core::iso8583::{mock_auth_request, mock_auth_response, RESPONSE_APPROVED};
use cardgen_core::types::{DEFAULT_ISO_AMOUNT, DEFAULT_ISO_CURRENCY};
use cardgen_core::{
    find_scenario, AuthorizationRequest, AuthorizationResponse, BrandRegistry, CardSynthesizer,
    GenerateOptions, Scenario,
};
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use super::Context;
use crate::cli::args::AuthorizeArgs;
use crate::education::Explain;
use crate::output::OutputFormat;

#[derive(Serialize)]
struct Exchange<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<&'a str>,
    request: &'a AuthorizationRequest,
    response: &'a AuthorizationResponse,
}

pub fn execute(ctx: &Context, args: AuthorizeArgs) -> Result<()> {
    if ctx.explain {
        Explain::authorize().print();
    }

    let scenario = args
        .scenario
        .as_deref()
        .map(|id| {
            find_scenario(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown scenario: {id}\n\n\
                     Run 'cardgen scenarios' to list them."
                )
            })
        })
        .transpose()?;

    let brand = args
        .brand
        .or_else(|| scenario.and_then(card_brand))
        .unwrap_or_else(|| ctx.brand_or_default(None));
    let code = args
        .code
        .or_else(|| scenario.map(|s| s.response_code.clone()))
        .unwrap_or_else(|| RESPONSE_APPROVED.to_string());
    let amount = args
        .amount
        .or_else(|| scenario.map(|s| s.amount))
        .unwrap_or(DEFAULT_ISO_AMOUNT);
    let currency = args
        .currency
        .or_else(|| scenario.map(|s| s.currency.clone()))
        .unwrap_or_else(|| DEFAULT_ISO_CURRENCY.to_string());

    let mut options = GenerateOptions::new(brand).include_track2(true);
    if let Some(secret) = ctx.secret() {
        options = options.secret(secret);
    }
    let card = CardSynthesizer::new().synthesize(&options)?;

    let request = mock_auth_request(&card, amount, &currency);
    let response = mock_auth_response(&request, &code);

    let exchange = Exchange {
        scenario: scenario.map(|s| s.id.as_str()),
        request: &request,
        response: &response,
    };

    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&exchange)?),
        OutputFormat::Ndjson => println!("{}", serde_json::to_string(&exchange)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
            writer.write_record(["mti", "field", "value"])?;
            let messages = [
                (&request.mti, &request.fields),
                (&response.mti, &response.fields),
            ];
            for (mti, fields) in messages {
                for (field, value) in fields.iter() {
                    writer.write_record([mti.as_str(), field.to_string().as_str(), value])?;
                }
            }
            writer.flush()?;
        }
        OutputFormat::Pretty => print_pretty(&exchange, &card.masked_pan),
    }

    Ok(())
}

/// The scenario's brand when it names a card brand (not PIX or boleto).
fn card_brand(scenario: &Scenario) -> Option<String> {
    let brand = &scenario.card_brand;
    if BrandRegistry::standard().resolve(brand).is_ok() {
        Some(brand.clone())
    } else {
        debug!(scenario = %scenario.id, brand = %brand, "scenario brand is not a card brand");
        None
    }
}

fn print_pretty(exchange: &Exchange<'_>, masked_pan: &str) {
    if let Some(id) = exchange.scenario {
        println!("{} {}", "Scenario:".bold(), id.cyan());
    }
    println!("{} {}", "Card:".bold(), masked_pan);
    println!();

    println!("{} {}", "Request MTI".bold(), exchange.request.mti.cyan());
    print!("{}", exchange.request.fields.render());
    println!();

    let response = exchange.response;
    let status = if response.is_approved() {
        "APPROVED".green().bold()
    } else {
        "DECLINED".red().bold()
    };
    println!("{} {}", "Response MTI".bold(), response.mti.cyan());
    println!(
        "  {} [{}] {} ({})",
        "Result:".bold(),
        response.response_code,
        response.response_text,
        status
    );
    if !response.auth_code.is_empty() {
        println!("  {} {}", "Auth code:".bold(), response.auth_code);
    }
}
