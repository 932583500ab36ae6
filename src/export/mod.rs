//! Export pipeline - email gate, CSV serialization and file delivery.
//!
//! Every export of the complete result set passes through the email gate.
//! Once an address is accepted it is handed to the remote store without
//! waiting for the outcome, and the records are written to a dated file.

mod csv;
mod gate;
pub mod ui;

pub use csv::{escape_value, to_csv, CSV_HEADERS};
pub use gate::{is_valid_email, EmailGate, GateRejection};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::data::GrantRecord;
use crate::error::Result;

/// Prefix of exported file names.
pub const EXPORT_PREFIX: &str = "fta-grants";

/// File name for an export made on `date`, e.g. `fta-grants-2024-03-09.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("{}-{}.csv", EXPORT_PREFIX, date.format("%Y-%m-%d"))
}

/// Write `records` as CSV into `dir` and return the written path.
pub fn write_export(dir: &Path, date: NaiveDate, records: &[GrantRecord]) -> Result<PathBuf> {
    let path = dir.join(export_filename(date));
    fs::write(&path, to_csv(records))?;
    tracing::info!("Exported {} grants to {}", records.len(), path.display());
    Ok(path)
}
