//! CSV sales data loader.
//!
//! Reads the Beans & Pods dataset into a [`SalesTable`]. Required columns:
//!   Channel, Region, Robusta, Arabica, Espresso, Lungo, Latte, Cappuccino
//! Extra columns are ignored.

use crate::error::DashboardError;
use crate::models::{Dimension, Product, SalesRecord, SalesTable};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One CSV row as it appears in the file.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Channel")]
    channel: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Robusta")]
    robusta: f64,
    #[serde(rename = "Arabica")]
    arabica: f64,
    #[serde(rename = "Espresso")]
    espresso: f64,
    #[serde(rename = "Lungo")]
    lungo: f64,
    #[serde(rename = "Latte")]
    latte: f64,
    #[serde(rename = "Cappuccino")]
    cappuccino: f64,
}

impl From<RawRecord> for SalesRecord {
    fn from(raw: RawRecord) -> Self {
        SalesRecord::new(
            raw.channel,
            raw.region,
            [
                raw.robusta,
                raw.arabica,
                raw.espresso,
                raw.lungo,
                raw.latte,
                raw.cappuccino,
            ],
        )
    }
}

/// Every column the loader requires, in file-schema order.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![Dimension::Channel.column(), Dimension::Region.column()];
    columns.extend(Product::ALL.iter().map(|p| p.name()));
    columns
}

/// Load the sales table from a CSV file path.
pub fn load_table(path: &Path) -> Result<SalesTable, DashboardError> {
    info!("Loading sales data from: {}", path.display());

    if !path.is_file() {
        return Err(DashboardError::data_load(path, "file not found"));
    }

    let file =
        std::fs::File::open(path).map_err(|e| DashboardError::data_load(path, e.to_string()))?;

    let table = read_table(file, path)?;
    info!("Loaded {} sales records", table.len());
    Ok(table)
}

/// Load the sales table from any reader. `source` is used in error messages.
pub fn read_table<R: Read>(reader: R, source: &Path) -> Result<SalesTable, DashboardError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DashboardError::data_load(source, format!("cannot read header: {}", e)))?
        .clone();

    let required = required_columns();
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();

    if !missing.is_empty() {
        return Err(DashboardError::data_load(
            source,
            format!("missing required columns: {}", missing.join(", ")),
        ));
    }

    let extra: Vec<&str> = headers
        .iter()
        .filter(|h| !required.iter().any(|column| column == h))
        .collect();
    if !extra.is_empty() {
        debug!("Ignoring extra columns: {}", extra.join(", "));
    }

    let mut records = Vec::new();
    for (row, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(row as u64 + 2);
            DashboardError::data_load(source, format!("CSV parse error at line {}: {}", line, e))
        })?;
        records.push(SalesRecord::from(raw));
    }

    Ok(SalesTable::new(records))
}
