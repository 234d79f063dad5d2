use std::rc::Rc;

use dimchart_common::PartitionValue;

/// Folds the records of one group into the partition value, starting from
/// [`PartitionValue::empty`].
pub type Reducer<T> = Rc<dyn Fn(PartitionValue, &T) -> PartitionValue>;

fn numeric_or(acc: &PartitionValue, fallback: Option<f64>) -> Option<f64> {
    match acc.as_f64() {
        Some(n) if !n.is_nan() => Some(n),
        _ => fallback,
    }
}

/// Number of records in the group.
pub fn reduce_count<T: 'static>() -> Reducer<T> {
    Rc::new(|acc: PartitionValue, _: &T| match numeric_or(&acc, None) {
        Some(count) => PartitionValue::Number(count + 1.0),
        None => PartitionValue::Number(1.0),
    })
}

/// Sum of `accessor` over the records of the group.
pub fn reduce_sum<T: 'static>(accessor: impl Fn(&T) -> f64 + 'static) -> Reducer<T> {
    Rc::new(move |acc: PartitionValue, record: &T| {
        let total = numeric_or(&acc, Some(0.0)).unwrap_or_default();
        PartitionValue::Number(total + accessor(record))
    })
}

/// The projection of the last record of the group.
pub fn identity<T: 'static>(project: impl Fn(&T) -> PartitionValue + 'static) -> Reducer<T> {
    Rc::new(move |_: PartitionValue, record: &T| project(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_count() {
        let count = reduce_count::<u32>();
        let value = [7, 8, 9]
            .iter()
            .fold(PartitionValue::empty(), |acc, record| count(acc, record));
        assert_eq!(value, PartitionValue::Number(3.0));

        assert_eq!(
            count(PartitionValue::Number(f64::NAN), &7),
            PartitionValue::Number(1.0)
        );
    }

    #[test]
    fn test_reduce_sum() {
        let sum = reduce_sum(|sale: &(u32, f64)| sale.1);
        let value = [(1, 10.5), (1, 4.5)]
            .iter()
            .fold(PartitionValue::empty(), |acc, record| sum(acc, record));
        assert_eq!(value, PartitionValue::Number(15.0));
    }

    #[test]
    fn test_identity_keeps_last() {
        let last = identity(|record: &(u32, i32)| PartitionValue::from(record.1));
        let value = [(1, 1), (2, 2)]
            .iter()
            .fold(PartitionValue::empty(), |acc, record| last(acc, record));
        assert_eq!(value, PartitionValue::Number(2.0));
    }
}
