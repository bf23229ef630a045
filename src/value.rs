use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;

/// Largest integer magnitude an IEEE-754 double represents exactly.
pub(crate) const MAX_SAFE_INTEGER: i128 = (1 << 53) - 1;

/// A string-keyed mapping that preserves insertion order.
pub type Object = IndexMap<String, Value>;

/// A TOON value: the normalized domain the codec operates on.
///
/// Objects keep insertion order, which is also emission order. Numbers are
/// IEEE-754 doubles; non-finite values are coerced to [`Value::Null`] during
/// normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Object),
}

impl Value {
    /// `true` for null, booleans, numbers, and strings.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        !matches!(self, Self::Array(_) | Self::Object(_))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Construct a number, coercing non-finite input to null and negative
    /// zero to zero.
    #[must_use]
    pub fn number(value: f64) -> Self {
        if !value.is_finite() {
            return Self::Null;
        }
        if value == 0.0 {
            return Self::Number(0.0);
        }
        Self::Number(value)
    }

    /// Construct from an integer, applying the safe-integer rule: magnitudes
    /// beyond 2^53 - 1 become their decimal digits as a string.
    #[must_use]
    pub fn integer(value: i128) -> Self {
        if (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value) {
            #[allow(clippy::cast_precision_loss)]
            return Self::Number(value as f64);
        }
        Self::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::number(f64::from(value))
    }
}

macro_rules! impl_from_small_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::Number(f64::from(value))
            }
        })*
    };
}

impl_from_small_int!(i8, i16, i32, u8, u16, u32);

macro_rules! impl_from_big_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::integer(i128::from(value))
            }
        })*
    };
}

impl_from_big_int!(i64, u64, i128);

impl From<u128> for Value {
    fn from(value: u128) -> Self {
        match i128::try_from(value) {
            Ok(value) => Self::integer(value),
            Err(_) => Self::String(value.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::String(value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(items: BTreeSet<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(entries: BTreeMap<String, V>) -> Self {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        )
    }
}

impl<V: Into<Value>> From<IndexMap<String, V>> for Value {
    fn from(entries: IndexMap<String, V>) -> Self {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Self::integer(i128::from(value))
                } else if let Some(value) = number.as_u64() {
                    Self::integer(i128::from(value))
                } else {
                    Self::number(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(value) => Self::String(value),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(value) => Self::Bool(value),
            Value::Number(value) => {
                serde_json::Number::from_f64(value).map_or(Self::Null, Self::Number)
            }
            Value::String(value) => Self::String(value),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => {
                let mut map = serde_json::Map::new();
                for (key, value) in entries {
                    map.insert(key, Self::from(value));
                }
                Self::Object(map)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_conversion_applies_safe_range() {
        assert_eq!(Value::from(42_i64), Value::Number(42.0));
        assert_eq!(
            Value::from(9_007_199_254_740_993_i64),
            Value::String("9007199254740993".to_string())
        );
        assert_eq!(Value::from(u128::MAX), Value::String(u128::MAX.to_string()));
    }

    #[test]
    fn number_constructor_normalizes() {
        assert_eq!(Value::number(f64::NAN), Value::Null);
        assert_eq!(Value::number(f64::INFINITY), Value::Null);
        assert_eq!(Value::number(-0.0), Value::Number(0.0));
    }

    #[test]
    fn dates_normalize_to_iso_8601_strings() {
        let epoch = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(
            Value::from(epoch),
            Value::String("1970-01-01T00:00:00.000Z".to_string())
        );
    }

    #[test]
    fn json_numbers_follow_safe_integer_rule() {
        let json: serde_json::Value = serde_json::from_str("9007199254740993").unwrap();
        assert_eq!(
            Value::from(json),
            Value::String("9007199254740993".to_string())
        );
    }
}
