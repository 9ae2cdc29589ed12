//! cardgen - synthetic payment-card fixtures
//!
//! A command-line interface for generating test cards, retrofitting order
//! files with CVCs and serving fixtures over HTTP.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cardgen_cli::run().await
}
