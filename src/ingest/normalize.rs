use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;
use tracing::debug;

/// A single data row: normalized header key → raw cell value.
/// Consumed immediately by the coercer; never held across events.
pub type RawRow = HashMap<String, String>;

/// Collapse header variants onto one key: lowercase and strip all
/// whitespace, so "Min Order Quantity", "minOrderQuantity" and
/// "MIN ORDER QUANTITY" all become `minorderquantity`.
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse raw CSV text into rows keyed by normalized header.
///
/// The first non-empty line is the header row; empty lines are skipped by
/// the reader. The reader runs in strict mode, so a structural error
/// (unterminated quote, ragged row) aborts the whole parse rather than
/// yielding a partial row set.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .context("reading CSV header row")?
        .iter()
        .map(normalize_key)
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("CSV parse error at data row {}", idx + 1))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = headers.len(), "parsed CSV rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_variants_collapse_to_one_key() {
        for header in ["Min Order Quantity", "minOrderQuantity", "MIN ORDER QUANTITY", " min\torder quantity "] {
            assert_eq!(normalize_key(header), "minorderquantity");
        }
    }

    #[test]
    fn rows_are_keyed_by_normalized_header() -> Result<()> {
        let rows = parse_rows("Name,Min Order Quantity\nTee,50\nHoodie,25\n")?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], "Tee");
        assert_eq!(rows[0]["minorderquantity"], "50");
        assert_eq!(rows[1]["name"], "Hoodie");
        Ok(())
    }

    #[test]
    fn empty_lines_are_skipped() -> Result<()> {
        let rows = parse_rows("name,category\nTee,Tops\n\nHoodie,Tops\n\n")?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["name"], "Hoodie");
        Ok(())
    }

    #[test]
    fn header_only_file_yields_no_rows() -> Result<()> {
        let rows = parse_rows("name,balance,category\n")?;
        assert!(rows.is_empty());
        Ok(())
    }

    #[test]
    fn ragged_row_aborts_the_parse() {
        let err = parse_rows("name,category\nTee,Tops,extra\n").unwrap_err();
        assert!(err.to_string().contains("data row 1"), "unexpected error: {err:#}");
    }

    #[test]
    fn unterminated_quote_aborts_the_parse() {
        assert!(parse_rows("name,category\n\"Tee,Tops\n").is_err());
    }
}
