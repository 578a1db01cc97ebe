use once_cell::sync::Lazy;
use serde::Serialize;

use crate::ingest::normalize::normalize_key;

/// How a field's raw cell text is coerced. The kind also fixes the default
/// used for absent or unparseable cells: `""`, `0`, or `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    Text,
    Quantity,
    Currency,
}

/// One column of a line-sheet schema. `key` is both the record field name
/// and, once header-normalized, the CSV column it binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
}

const fn text(key: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        kind: FieldKind::Text,
    }
}

const fn quantity(key: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        kind: FieldKind::Quantity,
    }
}

const fn currency(key: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        kind: FieldKind::Currency,
    }
}

/// Field keys referenced by name outside the schema tables.
pub mod keys {
    pub const NAME: &str = "name";
    pub const CATEGORY: &str = "category";
    pub const STATUS: &str = "status";
    pub const PRODUCTION_COST: &str = "productionCost";
    pub const FACTORY_COST: &str = "factoryCost";
}

/// Columns shared by both presentation variants.
const COMMON_FIELDS: &[FieldSpec] = &[
    text(keys::NAME),
    quantity("minOrderQuantity"),
    text("sampleLeadTime"),
    text("bulkLeadTime"),
    text(keys::STATUS),
    text("sizes"),
    text("fabricMaterial"),
    text(keys::CATEGORY),
    text("imageUrl"),
];

const CLIENT_FIELDS: &[FieldSpec] = &[currency("balance")];

const INTERNAL_FIELDS: &[FieldSpec] = &[
    currency("sampleCost"),
    currency(keys::PRODUCTION_COST),
    currency(keys::FACTORY_COST),
    text("shipping"),
    text("note"),
    text("alibabaUrl"),
];

/// A field spec plus the normalized CSV column key it reads from.
#[derive(Debug, Clone)]
pub struct BoundField {
    pub spec: FieldSpec,
    pub column: String,
}

fn bind(groups: &[&[FieldSpec]]) -> Vec<BoundField> {
    groups
        .iter()
        .flat_map(|fields| fields.iter())
        .map(|spec| BoundField {
            spec: *spec,
            column: normalize_key(spec.key),
        })
        .collect()
}

static CLIENT_COLUMNS: Lazy<Vec<BoundField>> =
    Lazy::new(|| bind(&[COMMON_FIELDS, CLIENT_FIELDS]));
static INTERNAL_COLUMNS: Lazy<Vec<BoundField>> =
    Lazy::new(|| bind(&[COMMON_FIELDS, INTERNAL_FIELDS]));

/// The two line-sheet presentation variants. Both run through the same
/// pipeline; everything variant-specific lives in this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Variant {
    Client,
    Internal,
}

impl Variant {
    /// Coercion table for this variant.
    pub fn fields(self) -> &'static [BoundField] {
        match self {
            Variant::Client => &CLIENT_COLUMNS,
            Variant::Internal => &INTERNAL_COLUMNS,
        }
    }

    /// Records per page in the rendered view.
    pub fn page_size(self) -> usize {
        match self {
            Variant::Client => 9,
            Variant::Internal => 10,
        }
    }

    /// Only the internal view derives a margin column.
    pub fn derives_margin(self) -> bool {
        matches!(self, Variant::Internal)
    }

    /// Only the client view offers a grid/table toggle.
    pub fn has_view_mode(self) -> bool {
        matches!(self, Variant::Client)
    }
}
