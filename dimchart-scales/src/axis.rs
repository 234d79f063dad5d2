use dimchart_common::{AxisValue, Partition, ValueAccessor};
use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use strum::VariantNames;

use crate::error::DimScaleError;
use crate::ticks::{nice_ticks, NiceTicks};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AxisName {
    X,
    Y,
}

/// Numeric extent of an axis. Categorical axes have no range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Fails unless `max` is strictly greater than `min`.
    pub fn validate(&self) -> Result<(), DimScaleError> {
        if self.span() > 0.0 {
            Ok(())
        } else {
            Err(DimScaleError::InvalidRange {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Linearly maps `value` from this range onto `[0, axis_length]`.
    pub fn position(&self, value: f64, axis_length: f64) -> Result<f64, DimScaleError> {
        self.validate()?;
        Ok(axis_length * ((value - self.min) / self.span()))
    }
}

impl From<(f64, f64)> for AxisRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Numeric,
    Categorical,
}

/// Decides how a set of axis values is laid out.
///
/// The axis is numeric only when every value is a finite number (numeric
/// strings included); a single non-numeric value makes it categorical.
/// An empty set counts as numeric.
pub fn classify<'a>(values: impl IntoIterator<Item = &'a AxisValue>) -> AxisKind {
    if values.into_iter().all(AxisValue::is_numeric_and_finite) {
        AxisKind::Numeric
    } else {
        AxisKind::Categorical
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CategoryKey {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl From<&AxisValue> for CategoryKey {
    fn from(value: &AxisValue) -> Self {
        match value {
            AxisValue::Number(n) => CategoryKey::Number(OrderedFloat(*n)),
            AxisValue::Text(s) => CategoryKey::Text(s.clone()),
        }
    }
}

/// Distinct categorical values in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Categories {
    keys: IndexSet<CategoryKey>,
    values: Vec<AxisValue>,
}

impl Categories {
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a AxisValue>) -> Self {
        let mut categories = Self::default();
        for value in values {
            if categories.keys.insert(CategoryKey::from(value)) {
                categories.values.push(value.clone());
            }
        }
        categories
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index_of(&self, value: &AxisValue) -> Option<usize> {
        self.keys.get_index_of(&CategoryKey::from(value))
    }

    /// Center of the band holding `value` when `axis_length` is split into
    /// equal bands. A value outside the categories lands half a band before
    /// the start of the axis.
    pub fn band_center(&self, value: &AxisValue, axis_length: f64) -> f64 {
        let band_width = axis_length / self.len() as f64;
        let index = self.index_of(value).map(|i| i as f64).unwrap_or(-1.0);
        index * band_width + 0.5 * band_width
    }

    pub fn values(&self) -> &[AxisValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<AxisValue> {
        self.values
    }
}

/// Tick values for an axis, following the same classification as positions.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisTicks {
    Numeric(NiceTicks),
    Categorical(Vec<AxisValue>),
}

pub fn axis_ticks(
    partitions: &[Partition],
    accessor: &ValueAccessor,
    range: Option<AxisRange>,
    axis: AxisName,
) -> Result<AxisTicks, DimScaleError> {
    let values: Vec<AxisValue> = partitions.iter().map(|p| accessor(p)).collect();
    match classify(&values) {
        AxisKind::Numeric => {
            let range = range.ok_or(DimScaleError::MissingRange { axis })?;
            Ok(AxisTicks::Numeric(nice_ticks(range.min, range.max)))
        }
        AxisKind::Categorical => Ok(AxisTicks::Categorical(
            Categories::from_values(&values).into_values(),
        )),
    }
}
