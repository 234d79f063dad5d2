use dimchart_common::value::{coerce_number, number_to_string};
use dimchart_common::PartitionValue;

/// Rounds to the nearest integer with halves rounded towards positive infinity.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Compact label for an axis tick or tooltip value.
///
/// Thousands, millions and billions are abbreviated with `k`, `M` and `B` and
/// a single decimal (`1_500_000_000` is `"1.5B"`, `12_000` is `"12k"`).
/// Non-zero values strictly between -1 and 1 keep one decimal, everything
/// else is rounded to an integer.
pub fn format_number(value: f64) -> String {
    if value >= 1e9 {
        format!("{}B", one_decimal_trimmed(value / 1e9))
    } else if value >= 1e6 {
        format!("{}M", one_decimal_trimmed(value / 1e6))
    } else if value >= 1e3 {
        format!("{}k", one_decimal_trimmed(value / 1e3))
    } else if value != 0.0 && value > -1.0 && value < 1.0 {
        to_fixed_one(value)
    } else {
        number_to_string(round_half_up(value))
    }
}

fn one_decimal_trimmed(value: f64) -> String {
    if !value.is_finite() {
        return number_to_string(value);
    }
    let text = to_fixed_one(value);
    match text.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => text,
    }
}

/// One decimal place, rounding an exact tie away from zero.
///
/// `{:.1}` rounds ties to even, so `1.25` would print as `1.2`. A float sits
/// exactly halfway between two tenths only when it is an odd number of
/// quarters, which makes the tie check exact.
fn to_fixed_one(value: f64) -> String {
    let magnitude = value.abs();
    let quarters = magnitude * 4.0;
    let text = if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        format!("{:.1}", (magnitude * 10.0).ceil() / 10.0)
    } else {
        format!("{magnitude:.1}")
    };
    if value < 0.0 {
        format!("-{text}")
    } else {
        text
    }
}

/// Tooltip text for a partition value.
///
/// Numbers and numeric strings go through [`format_number`], other strings
/// are shown verbatim and aggregates are rendered as ` name: value` pairs
/// separated by commas.
pub fn format_partition_value(value: &PartitionValue) -> String {
    match value {
        PartitionValue::Number(n) => format_scalar(*n),
        PartitionValue::Text(text) => {
            let number = coerce_number(text);
            if number.is_finite() {
                format_number(number)
            } else {
                text.clone()
            }
        }
        PartitionValue::Aggregate(fields) => {
            let mut text: String = fields
                .iter()
                .map(|(name, field)| format!(" {name}: {},", format_scalar(*field)))
                .collect();
            text.pop();
            text
        }
    }
}

fn format_scalar(value: f64) -> String {
    if value.is_finite() {
        format_number(value)
    } else {
        number_to_string(value)
    }
}
