//! Reading and writing order files.
//!
//! Input is a JSON array or newline-delimited JSON; output is always one
//! pretty-printed JSON array.

use anyhow::{Context, Result};
use cardgen_core::Order;
use std::io::Write;
use std::path::Path;

/// Parse orders from a JSON array, falling back to NDJSON.
pub fn parse_orders(data: &str) -> Result<Vec<Order>> {
    if let Ok(orders) = serde_json::from_str::<Vec<Order>>(data) {
        return Ok(orders);
    }

    data.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<Order>(line)
                .with_context(|| format!("failed to parse NDJSON line {}", i + 1))
        })
        .collect()
}

/// Read orders from a file.
pub fn read_orders(path: &Path) -> Result<Vec<Order>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read orders from {}", path.display()))?;
    parse_orders(&data).with_context(|| format!("failed to parse orders in {}", path.display()))
}

/// Write orders to a file as a pretty-printed JSON array.
pub fn write_orders(path: &Path, orders: &[Order]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, orders)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
