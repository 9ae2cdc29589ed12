//! # cardgen-cli
//!
//! Command-line interface for synthesizing payment-card test fixtures.
//!
//! ## Features
//!
//! - **Card generation**: Luhn-valid PANs with keyed CVCs, Track2 and ISO-8583 fields
//! - **Order transform**: inject CVCs into existing JSON or NDJSON order files
//! - **Scenarios**: named authorization outcomes and mock request/response pairs
//! - **Fixture server**: HTTP endpoints for test suites
//! - **Educational mode**: `--explain` describes what a command computes
//! - **Multiple output formats**: Pretty tables, JSON, NDJSON, CSV

pub mod cli;
pub mod config;
pub mod education;
pub mod orders;
pub mod output;

pub use cli::run;
