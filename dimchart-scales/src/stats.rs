use dimchart_common::{AxisValue, Partition, ValueAccessor};
use indexmap::IndexMap;
use itertools::Itertools;

/// The partition with the smallest accessor value. On ties the first one wins.
pub fn min_partition(partitions: &[Partition], accessor: &ValueAccessor) -> Option<Partition> {
    extreme_partition(partitions, accessor, |candidate, best| candidate < best)
}

/// The partition with the largest accessor value. On ties the first one wins.
pub fn max_partition(partitions: &[Partition], accessor: &ValueAccessor) -> Option<Partition> {
    extreme_partition(partitions, accessor, |candidate, best| candidate > best)
}

fn extreme_partition(
    partitions: &[Partition],
    accessor: &ValueAccessor,
    replaces: impl Fn(&AxisValue, &AxisValue) -> bool,
) -> Option<Partition> {
    let (first, rest) = partitions.split_first()?;
    let mut best = first;
    let mut best_value = accessor(first);
    for partition in rest {
        let value = accessor(partition);
        if replaces(&value, &best_value) {
            best = partition;
            best_value = value;
        }
    }
    Some(best.clone())
}

/// Mean of the accessor values.
///
/// Strings are parsed leniently and values that do not parse are left out of
/// the sum, but every partition counts towards the divisor.
pub fn average(partitions: &[Partition], accessor: &ValueAccessor) -> Option<f64> {
    if partitions.is_empty() {
        return None;
    }
    let sum: f64 = partitions
        .iter()
        .map(|p| accessor(p).parse_number())
        .filter(|value| !value.is_nan())
        .sum();
    Some(sum / partitions.len() as f64)
}

pub fn median(partitions: &[Partition], accessor: &ValueAccessor) -> Option<f64> {
    let values = partitions
        .iter()
        .map(|p| accessor(p).as_number())
        .sorted_by(f64::total_cmp)
        .collect::<Vec<_>>();
    if values.is_empty() {
        return None;
    }
    let middle = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[middle - 1] + values[middle]) / 2.0)
    } else {
        Some(values[middle])
    }
}

/// Partition keys grouped by the label of their accessor value, in
/// first-seen order.
pub fn group_partition_keys_by(
    partitions: &[Partition],
    accessor: &ValueAccessor,
) -> IndexMap<String, Vec<String>> {
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
    for partition in partitions {
        groups
            .entry(accessor(partition).to_string())
            .or_default()
            .push(partition.key().to_string());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimchart_common::partition::{key_accessor, value_accessor};
    use float_cmp::assert_approx_eq;
    use std::rc::Rc;

    fn planets() -> Vec<Partition> {
        vec![
            Partition::new("Tatooine", 2),
            Partition::new("Hoth", 5),
            Partition::new("Naboo", 2),
            Partition::new("Dagobah", 5),
            Partition::new("Endor", 1),
        ]
    }

    #[test]
    fn test_min_max_keep_first_on_ties() {
        let partitions = planets();
        let accessor = value_accessor();

        let min = min_partition(&partitions, &accessor).unwrap();
        assert_eq!(min.key(), "Endor");

        let max = max_partition(&partitions, &accessor).unwrap();
        assert!(max.ptr_eq(&partitions[1]));

        let ties = vec![Partition::new("a", 1), Partition::new("b", 1)];
        assert_eq!(min_partition(&ties, &accessor).unwrap().key(), "a");
        assert_eq!(max_partition(&ties, &accessor).unwrap().key(), "a");

        assert_eq!(min_partition(&[], &accessor), None);
        assert_eq!(max_partition(&[], &accessor), None);
    }

    #[test]
    fn test_min_max_by_key() {
        let partitions = planets();
        let min = min_partition(&partitions, &key_accessor()).unwrap();
        assert_eq!(min.key(), "Dagobah");
    }

    #[test]
    fn test_average() {
        let accessor = value_accessor();
        assert_approx_eq!(f64, average(&planets(), &accessor).unwrap(), 3.0);
        assert_eq!(average(&[], &accessor), None);

        let mixed = vec![
            Partition::new("a", "4kg"),
            Partition::new("b", "n/a"),
            Partition::new("c", 2),
        ];
        assert_approx_eq!(f64, average(&mixed, &accessor).unwrap(), 2.0);
    }

    #[test]
    fn test_median() {
        let accessor = value_accessor();
        assert_approx_eq!(f64, median(&planets(), &accessor).unwrap(), 2.0);

        let even = vec![
            Partition::new("a", 10),
            Partition::new("b", 1),
            Partition::new("c", 4),
            Partition::new("d", 3),
        ];
        assert_approx_eq!(f64, median(&even, &accessor).unwrap(), 3.5);
        assert_eq!(median(&[], &accessor), None);
    }

    #[test]
    fn test_group_partition_keys_by() {
        let groups = group_partition_keys_by(&planets(), &value_accessor());
        assert_eq!(
            groups.into_iter().collect::<Vec<_>>(),
            vec![
                ("2".to_string(), vec!["Tatooine".to_string(), "Naboo".to_string()]),
                ("5".to_string(), vec!["Hoth".to_string(), "Dagobah".to_string()]),
                ("1".to_string(), vec!["Endor".to_string()]),
            ]
        );

        let first_letter: ValueAccessor =
            Rc::new(|p: &Partition| AxisValue::from(p.key()[..1].to_string()));
        let groups = group_partition_keys_by(&planets(), &first_letter);
        assert_eq!(groups["D"], vec!["Dagobah".to_string()]);
    }
}
