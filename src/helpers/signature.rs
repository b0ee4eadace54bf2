// ABOUTME: Declared helper signatures: ordered parameter kinds plus an optional Options slot
// ABOUTME: Also defines how call-site values are coerced into each declared parameter kind

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Natural value, no coercion
    Any,
    String,
    Integer,
    Float,
    Boolean,
}

impl ParamKind {
    /// Coerce `value` into this kind, or `None` when it cannot be represented.
    ///
    /// Absent and null arguments become the kind's zero value.
    pub fn coerce(self, value: Value) -> Option<Value> {
        match self {
            ParamKind::Any => Some(value),
            ParamKind::String => String::from_value(value).map(Value::String),
            ParamKind::Integer => i64::from_value(value).map(Value::Integer),
            ParamKind::Float => f64::from_value(value).map(Value::Float),
            ParamKind::Boolean => bool::from_value(value).map(Value::Bool),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::Any => "any",
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Float => "float",
            ParamKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// What a helper accepts: positional parameter kinds, then optionally Options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    params: Vec<ParamKind>,
    options: bool,
}

impl Signature {
    pub fn new(params: Vec<ParamKind>, options: bool) -> Self {
        Self { params, options }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    pub fn takes_options(&self) -> bool {
        self.options
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        if self.options {
            parts.push("options".to_string());
        }
        write!(f, "({})", parts.join(", "))
    }
}

/// Rust types a helper can declare as positional parameters
pub trait FromValue: Sized {
    const KIND: ParamKind;

    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for Value {
    const KIND: ParamKind = ParamKind::Any;

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl FromValue for String {
    const KIND: ParamKind = ParamKind::String;

    fn from_value(value: Value) -> Option<Self> {
        Some(value.render())
    }
}

impl FromValue for i64 {
    const KIND: ParamKind = ParamKind::Integer;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Absent | Value::Null => Some(0),
            Value::Integer(i) => Some(i),
            Value::Float(f) => integral_f64(f),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// `f` as an i64 when it is a whole number inside the i64 range
fn integral_f64(f: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; 2^63 is the first value out of range
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.fract() == 0.0 && f >= -UPPER && f < UPPER {
        Some(f as i64)
    } else {
        None
    }
}

impl FromValue for f64 {
    const KIND: ParamKind = ParamKind::Float;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Absent | Value::Null => Some(0.0),
            Value::Integer(i) => Some(i as f64),
            Value::Float(f) => Some(f),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const KIND: ParamKind = ParamKind::Boolean;

    fn from_value(value: Value) -> Option<Self> {
        Some(value.is_truthy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_coercion() {
        assert_eq!(i64::from_value(Value::from(-12)), Some(-12));
        assert_eq!(i64::from_value(Value::from(3.0)), Some(3));
        assert_eq!(i64::from_value(Value::from("42")), Some(42));
        assert_eq!(i64::from_value(Value::Absent), Some(0));
        assert_eq!(i64::from_value(Value::from(1.5)), None);
        assert_eq!(i64::from_value(Value::from(true)), None);
    }

    #[test]
    fn test_integer_coercion_rejects_out_of_range_floats() {
        assert_eq!(i64::from_value(Value::from(1e20)), None);
        assert_eq!(i64::from_value(Value::from(-1e20)), None);
        assert_eq!(i64::from_value(Value::from(9_223_372_036_854_775_808.0)), None);
        assert_eq!(i64::from_value(Value::from(-9_223_372_036_854_775_808.0)), Some(i64::MIN));
        assert_eq!(i64::from_value(Value::from(f64::INFINITY)), None);
        assert_eq!(ParamKind::Integer.coerce(Value::from(1e20)), None);
    }

    #[test]
    fn test_string_coercion_renders_any_value() {
        assert_eq!(String::from_value(Value::from(12)), Some("12".to_string()));
        assert_eq!(String::from_value(Value::Absent), Some(String::new()));
        assert_eq!(String::from_value(Value::from(-1.2)), Some("-1.2".to_string()));
    }

    #[test]
    fn test_kind_coerce() {
        assert_eq!(ParamKind::Float.coerce(Value::from(2)), Some(Value::Float(2.0)));
        assert_eq!(ParamKind::Boolean.coerce(Value::from("")), Some(Value::Bool(false)));
        assert_eq!(ParamKind::Any.coerce(Value::from(-12)), Some(Value::Integer(-12)));
        assert_eq!(ParamKind::Integer.coerce(Value::from("nope")), None);
    }

    #[test]
    fn test_signature_display() {
        let signature = Signature::new(vec![ParamKind::String, ParamKind::Integer], true);
        assert_eq!(signature.arity(), 2);
        assert_eq!(signature.to_string(), "(string, integer, options)");
    }
}
