/// Scalar attribute values carried on graph nodes and edges.
///
/// Every CSV column becomes an entry in an [`AttributeMap`]: a string key
/// mapped to a tagged [`ScalarValue`]. Restricting attributes to four scalar
/// shapes keeps property-kind inference exhaustive: each value reports exactly
/// one [`ScalarKind`].
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single scalar attribute value.
#[derive(Debug, Clone)]
pub enum ScalarValue {
    /// UTF-8 string.
    String(String),
    /// Signed integer (fits in i64).
    Integer(i64),
    /// IEEE 754 double-precision float.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
}

/// A string-keyed bag of scalar attributes.
pub type AttributeMap = BTreeMap<String, ScalarValue>;

/// The runtime representation of a [`ScalarValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    /// [`ScalarValue::String`].
    String,
    /// [`ScalarValue::Integer`].
    Integer,
    /// [`ScalarValue::Float`].
    Float,
    /// [`ScalarValue::Boolean`].
    Boolean,
}

impl ScalarKind {
    /// Short lowercase name used in profile reports (`"str"`, `"int"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "str",
            Self::Integer => "int",
            Self::Float => "float",
            Self::Boolean => "bool",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::String(_) | Self::Integer(_) | Self::Float(_) | Self::Boolean(_), _) => false,
        }
    }
}

impl ScalarValue {
    /// Parses a raw CSV cell into the narrowest matching scalar.
    ///
    /// Returns `None` for empty or whitespace-only cells so that missing
    /// values never appear as attributes. Recognition order: boolean
    /// (`true`/`false`, any case), integer, finite float, string.
    pub fn parse_cell(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Some(Self::Boolean(true));
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Some(Self::Boolean(false));
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Some(Self::Integer(i));
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return Some(Self::Float(f));
            }
        }
        Some(Self::String(raw.to_owned()))
    }

    /// Returns the kind tag of this value.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::String(_) => ScalarKind::String,
            Self::Integer(_) => ScalarKind::Integer,
            Self::Float(_) => ScalarKind::Float,
            Self::Boolean(_) => ScalarKind::Boolean,
        }
    }

    /// Returns the string value if this is a `ScalarValue::String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            Self::Integer(_) | Self::Float(_) | Self::Boolean(_) => None,
        }
    }

    /// Returns the i64 value if this is a `ScalarValue::Integer`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::String(_) | Self::Float(_) | Self::Boolean(_) => None,
        }
    }

    /// Returns the f64 value for floats and integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(n) => Some(*n as f64),
            Self::String(_) | Self::Boolean(_) => None,
        }
    }

    /// Returns the bool value if this is a `ScalarValue::Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            Self::String(_) | Self::Integer(_) | Self::Float(_) => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Boolean(b) => f.write_str(if *b { "True" } else { "False" }),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for ScalarValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl<'de> Deserialize<'de> for ScalarValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarValueVisitor)
    }
}

struct ScalarValueVisitor;

impl Visitor<'_> for ScalarValueVisitor {
    type Value = ScalarValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string, number, or boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ScalarValue, E> {
        Ok(ScalarValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ScalarValue, E> {
        Ok(ScalarValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ScalarValue, E> {
        match i64::try_from(v) {
            Ok(i) => Ok(ScalarValue::Integer(i)),
            Err(_) => Ok(ScalarValue::Float(v as f64)),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ScalarValue, E> {
        Ok(ScalarValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ScalarValue, E> {
        Ok(ScalarValue::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ScalarValue, E> {
        Ok(ScalarValue::String(v))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn parse_cell_empty_is_missing() {
        assert_eq!(ScalarValue::parse_cell(""), None);
        assert_eq!(ScalarValue::parse_cell("   "), None);
    }

    #[test]
    fn parse_cell_recognises_each_kind() {
        assert_eq!(
            ScalarValue::parse_cell("42"),
            Some(ScalarValue::Integer(42))
        );
        assert_eq!(
            ScalarValue::parse_cell("-3.5"),
            Some(ScalarValue::Float(-3.5))
        );
        assert_eq!(
            ScalarValue::parse_cell("TRUE"),
            Some(ScalarValue::Boolean(true))
        );
        assert_eq!(
            ScalarValue::parse_cell("false"),
            Some(ScalarValue::Boolean(false))
        );
        assert_eq!(
            ScalarValue::parse_cell("Traced"),
            Some(ScalarValue::String("Traced".to_owned()))
        );
    }

    #[test]
    fn parse_cell_non_finite_float_stays_string() {
        assert_eq!(
            ScalarValue::parse_cell("NaN"),
            Some(ScalarValue::String("NaN".to_owned()))
        );
        assert_eq!(
            ScalarValue::parse_cell("inf"),
            Some(ScalarValue::String("inf".to_owned()))
        );
    }

    #[test]
    fn parse_cell_keeps_json_strings_intact() {
        let raw = r#"{"EB": {"pre": 2}}"#;
        let v = ScalarValue::parse_cell(raw).expect("non-empty");
        assert_eq!(v.kind(), ScalarKind::String);
        assert_eq!(v.as_str(), Some(raw));
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(ScalarValue::from("x").kind(), ScalarKind::String);
        assert_eq!(ScalarValue::from(1_i64).kind(), ScalarKind::Integer);
        assert_eq!(ScalarValue::from(1.5_f64).kind(), ScalarKind::Float);
        assert_eq!(ScalarValue::from(true).kind(), ScalarKind::Boolean);
    }

    #[test]
    fn integer_and_float_are_not_equal() {
        assert_ne!(ScalarValue::Integer(1), ScalarValue::Float(1.0));
    }

    #[test]
    fn display_renders_stringified_samples() {
        assert_eq!(ScalarValue::Integer(7).to_string(), "7");
        assert_eq!(ScalarValue::Float(2.0).to_string(), "2.0");
        assert_eq!(ScalarValue::Boolean(true).to_string(), "True");
        assert_eq!(ScalarValue::from("abc").to_string(), "abc");
    }

    #[test]
    fn serde_json_round_trip_preserves_kind() {
        let map: AttributeMap = [
            ("a".to_owned(), ScalarValue::Integer(3)),
            ("b".to_owned(), ScalarValue::Float(0.25)),
            ("c".to_owned(), ScalarValue::Boolean(false)),
            ("d".to_owned(), ScalarValue::from("s")),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&map).expect("serialize");
        let back: AttributeMap = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, map);
    }
}
