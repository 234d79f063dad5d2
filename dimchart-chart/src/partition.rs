use std::cmp::Ordering;
use std::rc::Rc;

use dimchart_common::{Partition, PartitionValue};
use indexmap::IndexMap;

use crate::reduce::Reducer;

/// Maps a record to the key of the partition it belongs to.
pub type GroupBy<T> = Rc<dyn Fn(&T) -> String>;

pub type PartitionComparator = Rc<dyn Fn(&Partition, &Partition) -> Ordering>;

/// Orders partitions by descending numeric value. Partitions without a
/// numeric value sort last.
pub fn descending_value() -> PartitionComparator {
    Rc::new(|a: &Partition, b: &Partition| sort_key(b).total_cmp(&sort_key(a)))
}

fn sort_key(partition: &Partition) -> f64 {
    let value = partition.value().to_number();
    if value.is_nan() {
        f64::NEG_INFINITY
    } else {
        value
    }
}

/// Groups `records` by key, reduces every group and sorts the result.
///
/// Groups are built in the order their keys are first encountered and each
/// one is reduced left to right from [`PartitionValue::empty`]. The sort is
/// stable, so partitions that compare equal keep that order.
pub fn compute_partitions<T>(
    records: &[T],
    group_by: &dyn Fn(&T) -> String,
    reducer: &dyn Fn(PartitionValue, &T) -> PartitionValue,
    sort_by: &dyn Fn(&Partition, &Partition) -> Ordering,
) -> Vec<Partition> {
    let mut groups: IndexMap<String, PartitionValue> = IndexMap::new();
    for record in records {
        let acc = groups.entry(group_by(record)).or_default();
        *acc = reducer(std::mem::take(acc), record);
    }

    let mut partitions = groups
        .into_iter()
        .map(|(key, value)| Partition::new(key, value))
        .collect::<Vec<_>>();
    partitions.sort_by(|a, b| sort_by(a, b));
    partitions
}

/// Convenience wrapper over [`compute_partitions`] for shared closures.
pub fn partition_data<T>(
    records: &[T],
    group_by: &GroupBy<T>,
    reducer: &Reducer<T>,
    sort_by: &PartitionComparator,
) -> Vec<Partition> {
    compute_partitions(records, group_by.as_ref(), reducer.as_ref(), sort_by.as_ref())
}
