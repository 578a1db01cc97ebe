use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Read a dropped line-sheet file to text at the async platform boundary.
///
/// Parsing and state updates stay synchronous and atomic with respect to
/// other view events; this read is the only await in the crate. Pair it
/// with the session's upload tickets so a newer drop supersedes an older
/// one's eventual result.
pub async fn read_sheet_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .await
        .with_context(|| format!("reading line sheet {}", path.display()))
}
