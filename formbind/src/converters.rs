//! Ready-made `convert_in` / `convert_out` functions.

use formbind_types::FieldValue;

use crate::validators::parse_float;

/// Numbers pass through as `Float`; numeric text is parsed. Anything else
/// becomes `Blank`.
pub fn to_number(value: &FieldValue) -> FieldValue {
    parse_float(value).map_or(FieldValue::Blank, FieldValue::Float)
}

/// A number rendered with exactly two decimals, e.g. `"12.50"`.
pub fn to_money(value: &FieldValue) -> FieldValue {
    parse_float(value).map_or(FieldValue::Blank, |n| FieldValue::Text(format!("{n:.2}")))
}

/// Blank text collapses to `Blank`; everything else is kept.
pub fn to_null_if_blank(value: &FieldValue) -> FieldValue {
    if value.is_blank() {
        FieldValue::Blank
    } else {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbind_types::FieldDescriptor;

    #[test]
    fn numbers() {
        assert_eq!(to_number(&FieldValue::Int(4)), FieldValue::Float(4.0));
        assert_eq!(to_number(&"2.25".into()), FieldValue::Float(2.25));
        assert_eq!(to_number(&"two".into()), FieldValue::Blank);
    }

    #[test]
    fn money() {
        assert_eq!(to_money(&FieldValue::Float(12.5)), FieldValue::from("12.50"));
        assert_eq!(to_money(&"3".into()), FieldValue::from("3.00"));
    }

    #[test]
    fn blank_collapses() {
        assert_eq!(to_null_if_blank(&"   ".into()), FieldValue::Blank);
        assert_eq!(to_null_if_blank(&FieldValue::Bool(false)), FieldValue::Bool(false));
    }

    #[test]
    fn price_field_round_trips_its_default() {
        let price = FieldDescriptor::text("price", "Price")
            .value(FieldValue::Float(7.0))
            .convert_in(to_money)
            .convert_out(to_number);

        assert_eq!(price.initial_value(), FieldValue::from("7.00"));
        assert_eq!(
            price.convert_out_value(&price.initial_value()),
            FieldValue::Float(7.0)
        );
    }
}
