use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref NUMBER_LITERAL: Regex =
        Regex::new(r"^[+-]?(?:(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?|Infinity)$").unwrap();
    static ref NUMBER_PREFIX: Regex =
        Regex::new(r"^[+-]?(?:(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?|Infinity)").unwrap();
}

/// Strict numeric coercion of a string: surrounding whitespace is ignored,
/// an empty string is zero and anything else must be a complete decimal
/// literal, otherwise the result is NaN.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if NUMBER_LITERAL.is_match(trimmed) {
        trimmed.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Lenient numeric parsing of a string: the longest leading decimal literal
/// is used and trailing text is ignored ("12px" is 12). NaN when the string
/// does not start with a number.
pub fn parse_leading_number(text: &str) -> f64 {
    NUMBER_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(f64::NAN)
}

/// Formats a number the way it is rendered as a key or label: integral
/// values without a fractional part and no negative zero.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// A value produced by an axis accessor: numeric or categorical.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum AxisValue {
    Number(f64),
    Text(String),
}

impl AxisValue {
    /// Numeric interpretation of the value, NaN when it has none.
    pub fn as_number(&self) -> f64 {
        match self {
            AxisValue::Number(n) => *n,
            AxisValue::Text(s) => coerce_number(s),
        }
    }

    /// Like [`as_number`](Self::as_number) but tolerates trailing text.
    pub fn parse_number(&self) -> f64 {
        match self {
            AxisValue::Number(n) => *n,
            AxisValue::Text(s) => parse_leading_number(s),
        }
    }

    pub fn is_numeric_and_finite(&self) -> bool {
        self.as_number().is_finite()
    }
}

impl Display for AxisValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisValue::Number(n) => write!(f, "{}", number_to_string(*n)),
            AxisValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Two numbers compare numerically and two strings lexicographically.
/// A number and a string compare numerically after coercing the string,
/// which is unordered when the string is not numeric.
impl PartialOrd for AxisValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (AxisValue::Text(a), AxisValue::Text(b)) => Some(a.cmp(b)),
            _ => self.as_number().partial_cmp(&other.as_number()),
        }
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        AxisValue::Number(value)
    }
}

impl From<i32> for AxisValue {
    fn from(value: i32) -> Self {
        AxisValue::Number(value as f64)
    }
}

impl From<&str> for AxisValue {
    fn from(value: &str) -> Self {
        AxisValue::Text(value.to_string())
    }
}

impl From<String> for AxisValue {
    fn from(value: String) -> Self {
        AxisValue::Text(value)
    }
}

/// The reduced value of a partition.
///
/// Reducers start from [`PartitionValue::empty`], an aggregate with no
/// fields, and may replace it with a scalar or fill in named numeric fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum PartitionValue {
    Number(f64),
    Text(String),
    Aggregate(IndexMap<String, f64>),
}

impl PartitionValue {
    /// The seed every reduction starts from.
    pub fn empty() -> Self {
        PartitionValue::Aggregate(IndexMap::new())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PartitionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric interpretation used for ordering: numbers as is, numeric
    /// strings coerced, everything else NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            PartitionValue::Number(n) => *n,
            PartitionValue::Text(s) => coerce_number(s),
            PartitionValue::Aggregate(_) => f64::NAN,
        }
    }

    /// Named field of an aggregate value.
    pub fn field(&self, name: &str) -> Option<f64> {
        match self {
            PartitionValue::Aggregate(fields) => fields.get(name).copied(),
            _ => None,
        }
    }

    pub fn to_axis_value(&self) -> Option<AxisValue> {
        match self {
            PartitionValue::Number(n) => Some(AxisValue::Number(*n)),
            PartitionValue::Text(s) => Some(AxisValue::Text(s.clone())),
            PartitionValue::Aggregate(_) => None,
        }
    }
}

impl Default for PartitionValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<f64> for PartitionValue {
    fn from(value: f64) -> Self {
        PartitionValue::Number(value)
    }
}

impl From<i32> for PartitionValue {
    fn from(value: i32) -> Self {
        PartitionValue::Number(value as f64)
    }
}

impl From<&str> for PartitionValue {
    fn from(value: &str) -> Self {
        PartitionValue::Text(value.to_string())
    }
}

impl From<String> for PartitionValue {
    fn from(value: String) -> Self {
        PartitionValue::Text(value)
    }
}

impl From<IndexMap<String, f64>> for PartitionValue {
    fn from(value: IndexMap<String, f64>) -> Self {
        PartitionValue::Aggregate(value)
    }
}

impl<const N: usize> From<[(&str, f64); N]> for PartitionValue {
    fn from(fields: [(&str, f64); N]) -> Self {
        PartitionValue::Aggregate(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}
