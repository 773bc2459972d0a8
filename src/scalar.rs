//! Typed cell values and the coercion that produces them.
//!
//! Every `#pair` value and every `#altrow` cell goes through
//! [`Scalar::coerce`], which tries, in order:
//!
//! 1. **Integer**: optional `+`/`-` followed by ASCII digits, fitting in `i64`
//! 2. **Float**: a decimal literal with optional fraction and exponent
//! 3. **Text**: anything else, kept exactly as written
//!
//! The order matters: `"5"` is an integer, never a float.
//!
//! ```rust
//! use rdb_json::Scalar;
//!
//! assert_eq!(Scalar::coerce("007"), Scalar::Integer(7));
//! assert_eq!(Scalar::coerce("1.23e+09"), Scalar::Float(1.23e9));
//! assert_eq!(Scalar::coerce("2024-01-01"), Scalar::Text("2024-01-01".to_string()));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single typed value from an RDB file.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Infers the type of `token` by ordered trial: integer, then float, then text.
    ///
    /// The token is not trimmed; `" 5"` stays text.
    #[must_use]
    pub fn coerce(token: &str) -> Self {
        if let Some(i) = parse_integer(token) {
            Scalar::Integer(i)
        } else if let Some(f) = parse_float(token) {
            Scalar::Float(f)
        } else {
            Scalar::Text(token.to_string())
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Scalar::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Scalar::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Scalar::Text(_))
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric value of integers and floats.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdb_json::Scalar;
    ///
    /// assert_eq!(Scalar::Integer(2).as_f64(), Some(2.0));
    /// assert_eq!(Scalar::Float(9.25).as_f64(), Some(9.25));
    /// assert_eq!(Scalar::from("n/a").as_f64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            Scalar::Text(_) => None,
        }
    }

    /// If the value is text, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Parses a signed base-10 integer literal.
///
/// Leading zeros are accepted and normalized away. Returns `None` for anything
/// else, including literals that overflow `i64`.
///
/// # Examples
///
/// ```rust
/// use rdb_json::scalar::parse_integer;
///
/// assert_eq!(parse_integer("-042"), Some(-42));
/// assert_eq!(parse_integer("1,000"), None);
/// assert_eq!(parse_integer("4.0"), None);
/// ```
#[must_use]
pub fn parse_integer(token: &str) -> Option<i64> {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<i64>().ok()
}

/// Parses a finite decimal floating-point literal such as `-1.5`, `.5`, `3.` or `1.23e+09`.
///
/// Spellings like `inf`, `NaN` or `0x1p3` are rejected so that every float can be
/// written as a JSON number.
#[must_use]
pub fn parse_float(token: &str) -> Option<f64> {
    if !is_float_literal(token) {
        return None;
    }
    token.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn is_float_literal(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut mantissa_digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        mantissa_digits += pos - frac_start;
    }

    if mantissa_digits == 0 {
        return false;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        pos += 1;
        if pos < bytes.len() && matches!(bytes[pos], b'+' | b'-') {
            pos += 1;
        }
        let exp_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == exp_start {
            return false;
        }
    }

    pos == bytes.len()
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(fl) => write!(f, "{}", fl),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
            Scalar::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer, a float or a string")
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Scalar::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value).map(Scalar::Integer).map_err(|_| {
                    E::invalid_value(de::Unexpected::Unsigned(value), &"a signed 64-bit integer")
                })
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Scalar::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Scalar::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Scalar::Text(value))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

// TryFrom implementations for extracting values from Scalar
impl TryFrom<Scalar> for i64 {
    type Error = Scalar;

    fn try_from(value: Scalar) -> Result<Self, Scalar> {
        match value {
            Scalar::Integer(i) => Ok(i),
            other => Err(other),
        }
    }
}

impl TryFrom<Scalar> for f64 {
    type Error = Scalar;

    fn try_from(value: Scalar) -> Result<Self, Scalar> {
        match value {
            Scalar::Integer(i) => Ok(i as f64),
            Scalar::Float(f) => Ok(f),
            other => Err(other),
        }
    }
}

impl TryFrom<Scalar> for String {
    type Error = Scalar;

    fn try_from(value: Scalar) -> Result<Self, Scalar> {
        match value {
            Scalar::Text(s) => Ok(s),
            other => Err(other),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// Wraps the string as text without coercion; use [`Scalar::coerce`] to infer a type.
impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}
