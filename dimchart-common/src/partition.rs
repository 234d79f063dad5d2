use crate::value::{AxisValue, PartitionValue};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Maps a partition to the value it contributes to an axis or size channel.
pub type ValueAccessor = Rc<dyn Fn(&Partition) -> AxisValue>;

#[derive(Debug)]
struct PartitionData {
    key: String,
    value: PartitionValue,
}

/// An immutable `(key, value)` pair produced by grouping records.
///
/// A `Partition` is a cheap, shared handle. Two handles compare equal when
/// their keys and values are equal; use [`Partition::ptr_eq`] to ask whether
/// they come from the same partitioning run.
#[derive(Clone)]
pub struct Partition {
    data: Rc<PartitionData>,
}

impl Partition {
    pub fn new(key: impl Into<String>, value: impl Into<PartitionValue>) -> Self {
        Self {
            data: Rc::new(PartitionData {
                key: key.into(),
                value: value.into(),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.data.key
    }

    pub fn value(&self) -> &PartitionValue {
        &self.data.value
    }

    pub fn ptr_eq(&self, other: &Partition) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl PartialEq for Partition {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.key() == other.key() && self.value() == other.value())
    }
}

impl Debug for Partition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Partition")
            .field(&self.data.key)
            .field(&self.data.value)
            .finish()
    }
}

/// Accessor returning the partition key as a categorical value.
pub fn key_accessor() -> ValueAccessor {
    Rc::new(|p: &Partition| AxisValue::Text(p.key().to_string()))
}

/// Accessor returning a scalar partition value. Aggregates map to NaN.
pub fn value_accessor() -> ValueAccessor {
    Rc::new(|p: &Partition| {
        p.value()
            .to_axis_value()
            .unwrap_or(AxisValue::Number(f64::NAN))
    })
}

/// Accessor returning one named field of an aggregate value, NaN if absent.
pub fn field_accessor(name: impl Into<String>) -> ValueAccessor {
    let name = name.into();
    Rc::new(move |p: &Partition| AxisValue::Number(p.value().field(&name).unwrap_or(f64::NAN)))
}
