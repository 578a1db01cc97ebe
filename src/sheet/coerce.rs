use serde::Serialize;
use std::collections::HashMap;

use super::fields::{FieldKind, Variant};
use crate::ingest::normalize::RawRow;

/// A coerced cell value. Serializes untagged, so renderers see plain JSON
/// scalars rather than enum wrappers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Quantity(i64),
    Currency(f64),
}

impl FieldKind {
    /// Coerce one raw cell. Total: anything unparseable degrades to the
    /// kind's default instead of failing the row.
    pub fn coerce(self, raw: &str) -> Value {
        match self {
            FieldKind::Text => Value::Text(raw.to_string()),
            FieldKind::Quantity => Value::Quantity(parse_quantity(raw)),
            FieldKind::Currency => Value::Currency(raw.trim().parse().unwrap_or(0.0)),
        }
    }
}

/// Integer parse with fractional input truncated toward zero; anything
/// else is 0. Negative quantities pass through unclamped, matching the
/// currency fields.
fn parse_quantity(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return n;
    }
    match trimmed.parse::<f64>() {
        Ok(f) => f.trunc() as i64,
        Err(_) => 0,
    }
}

/// One coerced line-sheet record: a batch-stable 1-based id plus the
/// variant's coerced fields.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub id: usize,
    #[serde(flatten)]
    pub fields: HashMap<&'static str, Value>,
}

impl Record {
    /// Text field by key; absent or non-text keys read as `""`.
    pub fn text(&self, key: &str) -> &str {
        match self.fields.get(key) {
            Some(Value::Text(s)) => s,
            _ => "",
        }
    }

    /// Quantity field by key; absent or non-quantity keys read as 0.
    pub fn quantity(&self, key: &str) -> i64 {
        match self.fields.get(key) {
            Some(Value::Quantity(n)) => *n,
            _ => 0,
        }
    }

    /// Currency field by key; absent or non-currency keys read as 0.0.
    pub fn currency(&self, key: &str) -> f64 {
        match self.fields.get(key) {
            Some(Value::Currency(v)) => *v,
            _ => 0.0,
        }
    }
}

/// Map one raw row into a typed record. `position` is 1-based and becomes
/// the record id; a source column literally named `id` is ignored.
pub fn coerce_row(variant: Variant, row: &RawRow, position: usize) -> Record {
    let bound = variant.fields();
    let mut fields = HashMap::with_capacity(bound.len());
    for field in bound {
        let raw = row.get(&field.column).map(String::as_str).unwrap_or("");
        fields.insert(field.spec.key, field.spec.kind.coerce(raw));
    }
    Record {
        id: position,
        fields,
    }
}
