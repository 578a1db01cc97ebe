use super::coerce::Record;
use super::fields::keys;

/// Percentage markup between production and factory cost, derived fresh at
/// render time and never stored on the record. A zero factory cost yields 0
/// rather than dividing by zero; otherwise the value is unbounded and may
/// be negative.
pub fn margin(record: &Record) -> f64 {
    let factory = record.currency(keys::FACTORY_COST);
    if factory == 0.0 {
        return 0.0;
    }
    (record.currency(keys::PRODUCTION_COST) - factory) / factory * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::normalize::parse_rows;
    use crate::sheet::coerce::coerce_row;
    use crate::sheet::fields::Variant;

    fn record(production: &str, factory: &str) -> Record {
        let csv = format!("name,productionCost,factoryCost\nTee,{production},{factory}\n");
        let rows = parse_rows(&csv).unwrap();
        coerce_row(Variant::Internal, &rows[0], 1)
    }

    #[test]
    fn zero_factory_cost_pins_margin_to_zero() {
        assert_eq!(margin(&record("100", "0")), 0.0);
        assert_eq!(margin(&record("-500", "0")), 0.0);
        assert_eq!(margin(&record("1e12", "0")), 0.0);
        // An unparseable factory cost coerces to 0 and takes the same path.
        assert_eq!(margin(&record("100", "abc")), 0.0);
    }

    #[test]
    fn margin_is_percentage_markup() {
        assert_eq!(margin(&record("150", "100")), 50.0);
        assert_eq!(margin(&record("50", "100")), -50.0);
        assert_eq!(margin(&record("0", "25")), -100.0);
    }
}
