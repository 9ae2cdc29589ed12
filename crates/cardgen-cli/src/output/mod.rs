//! Output formatting for different formats.

use anyhow::Result;
use cardgen_core::Card;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use tabled::{settings::Style, Table, Tabled};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// Newline-delimited JSON, one record per line
    Ndjson,
    /// CSV output
    Csv,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, ndjson, csv",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Ndjson => write!(f, "ndjson"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// One CSV line per card.
#[derive(Serialize)]
struct CardCsvRow<'a> {
    #[serde(rename = "PAN")]
    pan: &'a str,
    #[serde(rename = "MaskedPAN")]
    masked_pan: &'a str,
    #[serde(rename = "Brand")]
    brand: &'a str,
    #[serde(rename = "ExpiryMonth")]
    expiry_month: u32,
    #[serde(rename = "ExpiryYear")]
    expiry_year: i32,
    #[serde(rename = "CVC")]
    cvc: &'a str,
    #[serde(rename = "Track2")]
    track2: &'a str,
}

impl<'a> From<&'a Card> for CardCsvRow<'a> {
    fn from(card: &'a Card) -> Self {
        Self {
            pan: &card.pan,
            masked_pan: &card.masked_pan,
            brand: &card.brand,
            expiry_month: card.expiry_month,
            expiry_year: card.expiry_year,
            cvc: &card.cvc,
            track2: &card.track2,
        }
    }
}

/// Write cards as data. `Pretty` falls back to a JSON array, since tables
/// are for terminals.
pub fn write_cards<W: Write>(mut out: W, cards: &[Card], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty | OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, cards)?;
            writeln!(out)?;
        }
        OutputFormat::Ndjson => {
            for card in cards {
                serde_json::to_writer(&mut out, card)?;
                writeln!(out)?;
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut out);
            for card in cards {
                writer.serialize(CardCsvRow::from(card))?;
            }
            writer.flush()?;
        }
    }
    out.flush()?;
    Ok(())
}

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "PAN")]
    pan: String,
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Expiry")]
    expiry: String,
    #[tabled(rename = "CVC")]
    cvc: String,
}

/// Render cards as a terminal table.
pub fn cards_table(cards: &[Card]) -> String {
    let rows: Vec<CardRow> = cards
        .iter()
        .map(|c| CardRow {
            pan: c.pan.clone(),
            brand: c.brand.clone(),
            expiry: c.expiry_display(),
            cvc: if c.cvc.is_empty() {
                "-".to_string()
            } else {
                c.cvc.clone()
            },
        })
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}
