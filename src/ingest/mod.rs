pub mod normalize;
pub mod read;

pub use normalize::{normalize_key, parse_rows, RawRow};
pub use read::read_sheet_file;

use anyhow::Result;
use tracing::info;

use crate::sheet::coerce::{coerce_row, Record};
use crate::sheet::fields::Variant;

/// The full record set produced by one successful ingestion. Re-ingesting
/// replaces the batch wholesale and restarts id numbering at 1.
#[derive(Debug, Clone)]
pub struct Batch {
    pub variant: Variant,
    pub records: Vec<Record>,
}

/// Parse and coerce one uploaded file's text into a batch.
///
/// Ids are assigned densely from 1 in row order. A structural CSV error
/// fails the whole ingestion; coercion itself never does.
pub fn ingest(variant: Variant, text: &str) -> Result<Batch> {
    let rows = normalize::parse_rows(text)?;
    let records: Vec<Record> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| coerce_row(variant, row, idx + 1))
        .collect();
    info!(?variant, records = records.len(), "ingested line sheet");
    Ok(Batch { variant, records })
}
