pub mod coerce;
pub mod fields;
pub mod metrics;

pub use coerce::{coerce_row, Record, Value};
pub use fields::{FieldKind, FieldSpec, Variant};
pub use metrics::margin;
