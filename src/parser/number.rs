//! Numeric values found in trace fields and stat lines.
//!
//! Both the `key=value` fields of data lines and the values of stat lines
//! are integers when they parse as one and floats otherwise.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer-or-float trace value
///
/// JSON has no NaN or infinity, so non-finite floats are stored as the
/// strings `"NaN"`, `"inf"` and `"-inf"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NumberRepr", into = "NumberRepr")]
pub enum Number {
    Int(i64),
    Float(f64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Int(i64),
    Float(f64),
    NonFinite(String),
}

impl From<Number> for NumberRepr {
    fn from(value: Number) -> Self {
        match value {
            Number::Int(v) => NumberRepr::Int(v),
            Number::Float(v) if v.is_finite() => NumberRepr::Float(v),
            Number::Float(v) => NumberRepr::NonFinite(v.to_string()),
        }
    }
}

impl TryFrom<NumberRepr> for Number {
    type Error = String;

    fn try_from(repr: NumberRepr) -> Result<Self, Self::Error> {
        match repr {
            NumberRepr::Int(v) => Ok(Number::Int(v)),
            NumberRepr::Float(v) => Ok(Number::Float(v)),
            NumberRepr::NonFinite(text) => match text.parse::<f64>() {
                Ok(v) if !v.is_finite() => Ok(Number::Float(v)),
                _ => Err(format!("'{}' is not a number", text)),
            },
        }
    }
}

impl Number {
    /// Integer value, `None` for floats
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int(v) => Some(*v),
            Number::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(v) => *v as f64,
            Number::Float(v) => *v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

/// Parse a value as an integer, falling back to a float
///
/// Surrounding whitespace is ignored. Returns `None` if the text is neither.
pub fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(v) = text.parse::<i64>() {
        return Some(Number::Int(v));
    }
    text.parse::<f64>().ok().map(Number::Float)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_integer_first() {
        assert_eq!(parse_number("42"), Some(Number::Int(42)));
        assert_eq!(parse_number(" -3 "), Some(Number::Int(-3)));
    }

    #[test]
    fn test_parse_number_float_fallback() {
        assert_eq!(parse_number("9.08"), Some(Number::Float(9.08)));
        assert_eq!(parse_number("1e3"), Some(Number::Float(1000.0)));
    }

    #[test]
    fn test_parse_number_invalid() {
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_number_serde_keeps_kind() {
        let int: Number = serde_json::from_str("5").unwrap();
        let float: Number = serde_json::from_str("2.5").unwrap();
        assert_eq!(int, Number::Int(5));
        assert_eq!(float, Number::Float(2.5));

        let json = serde_json::to_string(&Number::Float(2.0)).unwrap();
        let back: Number = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Number::Float(2.0));
    }

    #[test]
    fn test_number_serde_non_finite() {
        let json = serde_json::to_string(&[
            Number::Float(f64::INFINITY),
            Number::Float(f64::NEG_INFINITY),
            Number::Float(f64::NAN),
        ])
        .unwrap();
        assert_eq!(json, r#"["inf","-inf","NaN"]"#);

        let back: Vec<Number> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0], Number::Float(f64::INFINITY));
        assert_eq!(back[1], Number::Float(f64::NEG_INFINITY));
        assert!(back[2].as_f64().is_nan());
    }

    #[test]
    fn test_number_serde_rejects_text() {
        assert!(serde_json::from_str::<Number>(r#""fast""#).is_err());
        assert!(serde_json::from_str::<Number>(r#""2.5""#).is_err());
    }
}
