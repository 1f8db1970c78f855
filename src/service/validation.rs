//! Presence checks, field coalescing and numeric coercion over raw JSON request bodies.

use crate::error::AppError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

pub type Body = Map<String, Value>;

/// Absent, `null`, or a string that is blank after trimming.
/// Numbers, booleans, arrays and objects always count as present.
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

pub fn all_present(values: &[Option<&Value>]) -> bool {
    values.iter().all(|v| !is_empty(*v))
}

/// Gate for mutating endpoints: fails with the endpoint's static message if any field is empty.
pub fn require(body: &Body, fields: &[&str], message: &str) -> Result<(), AppError> {
    let values: Vec<Option<&Value>> = fields.iter().map(|f| body.get(*f)).collect();
    if all_present(&values) {
        Ok(())
    } else {
        Err(AppError::Validation(message.to_string()))
    }
}

/// First non-empty value among `names`, tried in order.
pub fn first_present<'a>(body: &'a Body, names: &[&str]) -> Option<&'a Value> {
    names.iter().map(|n| body.get(*n)).find(|v| !is_empty(*v)).flatten()
}

/// Scalar rendered as text; `None` when empty or not a scalar.
pub fn scalar_text(value: Option<&Value>) -> Option<String> {
    if is_empty(value) {
        return None;
    }
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Text of a field that must be present. Call after [`require`].
pub fn text_field(body: &Body, name: &str, message: &str) -> Result<String, AppError> {
    scalar_text(body.get(name)).ok_or_else(|| AppError::Validation(message.to_string()))
}

/// Text of an optional field; empty values become `None`.
pub fn optional_text(body: &Body, name: &str) -> Option<String> {
    scalar_text(body.get(name))
}

/// JSON number or numeric string as a decimal.
pub fn to_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)).ok()
        }
        _ => None,
    }
}

/// JSON integer or integral numeric string as `i32`.
pub fn to_integer(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|i| i32::try_from(i).ok()),
        Value::String(s) => {
            let d = Decimal::from_str(s.trim()).ok()?;
            if d.fract().is_zero() {
                d.to_i64().and_then(|i| i32::try_from(i).ok())
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Prices are stored as NUMERIC(10, 2): at most eight digits before the point once rounded.
pub fn fits_price_column(value: Decimal) -> bool {
    value.round_dp(2).abs() < Decimal::from(100_000_000)
}

/// Numeric field that also fits the price column, so overflow is a 400 rather than a store error.
pub fn decimal_field(body: &Body, name: &str, message: &str) -> Result<Decimal, AppError> {
    to_decimal(body.get(name))
        .filter(|d| fits_price_column(*d))
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

pub fn integer_field(body: &Body, name: &str, message: &str) -> Result<i32, AppError> {
    to_integer(body.get(name)).ok_or_else(|| AppError::Validation(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: Value) -> Body {
        match v {
            Value::Object(m) => m,
            _ => panic!("object expected"),
        }
    }

    #[test]
    fn empty_values() {
        assert!(is_empty(None));
        assert!(is_empty(Some(&Value::Null)));
        assert!(is_empty(Some(&json!(""))));
        assert!(is_empty(Some(&json!("   "))));
        assert!(is_empty(Some(&json!("\t\n"))));
    }

    #[test]
    fn non_empty_values() {
        assert!(!is_empty(Some(&json!(0))));
        assert!(!is_empty(Some(&json!(false))));
        assert!(!is_empty(Some(&json!("a"))));
        assert!(!is_empty(Some(&json!({}))));
        assert!(!is_empty(Some(&json!([]))));
    }

    #[test]
    fn all_present_needs_every_value() {
        let a = json!("x");
        let z = json!(0);
        let blank = json!(" ");
        assert!(all_present(&[Some(&a), Some(&z)]));
        assert!(!all_present(&[Some(&a), None]));
        assert!(!all_present(&[Some(&blank), Some(&a)]));
        assert!(all_present(&[]));
    }

    #[test]
    fn require_reports_static_message() {
        let b = body(json!({ "username": "bob", "password": "  " }));
        let err = require(&b, &["username", "password"], "fill everything").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "fill everything"));
        assert!(require(&b, &["username"], "x").is_ok());
    }

    #[test]
    fn first_present_prefers_earlier_names() {
        let b = body(json!({ "image_url": "https://cdn/a.png", "image": "data:image/png;base64,AAA" }));
        assert_eq!(first_present(&b, &["image_url", "image"]), Some(&json!("https://cdn/a.png")));

        let b = body(json!({ "image_url": "", "image": "data:image/png;base64,AAA" }));
        assert_eq!(first_present(&b, &["image_url", "image"]), Some(&json!("data:image/png;base64,AAA")));

        let b = body(json!({ "image_url": null }));
        assert_eq!(first_present(&b, &["image_url", "image"]), None);
    }

    #[test]
    fn scalars_render_as_text() {
        assert_eq!(scalar_text(Some(&json!("0812345678"))), Some("0812345678".into()));
        assert_eq!(scalar_text(Some(&json!(812345678))), Some("812345678".into()));
        assert_eq!(scalar_text(Some(&json!(""))), None);
        assert_eq!(scalar_text(Some(&json!({"a": 1}))), None);
    }

    #[test]
    fn decimals_from_numbers_and_strings() {
        assert_eq!(to_decimal(Some(&json!(199))), Some(Decimal::from(199)));
        assert_eq!(to_decimal(Some(&json!("249.50"))), Decimal::from_str("249.50").ok());
        assert_eq!(to_decimal(Some(&json!(12.5))), Decimal::from_str("12.5").ok());
        assert_eq!(to_decimal(Some(&json!("abc"))), None);
        assert_eq!(to_decimal(Some(&json!(true))), None);
        assert_eq!(to_decimal(None), None);
    }

    #[test]
    fn integers_from_numbers_and_strings() {
        assert_eq!(to_integer(Some(&json!(7))), Some(7));
        assert_eq!(to_integer(Some(&json!(7.0))), Some(7));
        assert_eq!(to_integer(Some(&json!("12"))), Some(12));
        assert_eq!(to_integer(Some(&json!("12.0"))), Some(12));
        assert_eq!(to_integer(Some(&json!("-3"))), Some(-3));
        assert_eq!(to_integer(Some(&json!(2.5))), None);
        assert_eq!(to_integer(Some(&json!("2.5"))), None);
        assert_eq!(to_integer(Some(&json!(5_000_000_000i64))), None);
    }

    #[test]
    fn prices_must_fit_numeric_10_2() {
        let msg = "bad price";
        let ok = body(json!({ "price": "99999999.99", "low": -99999999.99 }));
        assert_eq!(decimal_field(&ok, "price", msg).unwrap(), Decimal::from_str("99999999.99").unwrap());
        assert!(decimal_field(&ok, "low", msg).is_ok());

        let big = body(json!({ "price": 1000000000000i64, "edge": "100000000", "rounds_up": "99999999.999" }));
        for name in ["price", "edge", "rounds_up"] {
            let err = decimal_field(&big, name, msg).unwrap_err();
            assert!(matches!(err, AppError::Validation(ref m) if m == msg), "field {}", name);
        }
    }
}
