//! Export renderings of a trip list.
//!
//! Read-only consumers of the filtered collection: a CSV table matching the
//! tracker's export columns and a pretty JSON dump. An export that fails
//! leaves stored data untouched; the error surfaces to the caller.

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::trip::TripRecord;

/// Column header row of the CSV rendering.
pub const CSV_HEADER: &str = "date,direction,participants,teams,purpose,comment";

/// Render records as CSV, one row per trip, header first.
#[must_use]
pub fn to_csv(records: &[TripRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for trip in records {
        let row = [
            trip.date_string(),
            trip.direction.clone(),
            trip.participants_label(),
            trip.teams_label(),
            trip.purpose.clone(),
            trip.comment.clone().unwrap_or_default(),
        ];
        let encoded: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        out.push_str(&encoded.join(","));
        out.push('\n');
    }

    out
}

/// Quote a CSV field when it needs it; double any embedded quote.
fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render records as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(records: &[TripRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write the CSV rendering to a file.
///
/// # Errors
///
/// Returns an export error naming the path when the write fails.
pub fn write_csv(records: &[TripRecord], path: &Path) -> Result<()> {
    write_document(path, &to_csv(records))?;
    info!("Exported {} trips to {}", records.len(), path.display());
    Ok(())
}

/// Write the JSON rendering to a file.
///
/// # Errors
///
/// Returns an export error naming the path when serialization or the write
/// fails.
pub fn write_json(records: &[TripRecord], path: &Path) -> Result<()> {
    write_document(path, &to_json(records)?)?;
    info!("Exported {} trips to {}", records.len(), path.display());
    Ok(())
}

fn write_document(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| Error::Export {
        message: format!("cannot write {}: {source}", path.display()),
    })
}
